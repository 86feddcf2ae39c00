//! Descriptores de herramientas derivados del manifiesto.
//!
//! Un `ToolDescriptor` identifica versión, tipo de invocación y ubicación de
//! una herramienta externa. Es inmutable una vez resuelto para un run: la
//! versión que el manifiesto declara es la que selecciona las etapas de la
//! cadena de comandos y no cambia a mitad de run.
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Tipo de invocación soportado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Ejecutable local (spawn de proceso).
    Process,
    /// Endpoint remoto (request HTTP).
    RemoteEndpoint,
}

/// Versión `major.minor` con orden total ("2.0" > "1.10" > "1.2").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, '.');
        let major = parts.next().and_then(|p| p.parse().ok());
        // "2" se lee como "2.0"
        let minor = match parts.next() {
            Some(p) => p.parse().ok(),
            None => Some(0),
        };
        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Self { major, minor }),
            _ => Err(DomainError::InvalidVersion(s.to_string())),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

/// Registro inmutable de una herramienta del manifiesto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    /// Familia de comandos que comparte esta herramienta: `SignFile` y
    /// `SignTool` exponen la misma superficie y ambas declaran `signfile`.
    /// Si el manifiesto no la trae, se deriva del nombre en minúsculas.
    #[serde(default)]
    pub family: Option<String>,
    pub version: Version,
    pub kind: ToolKind,
    /// Path del ejecutable o URL del endpoint según `kind`.
    pub location: String,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

impl ToolDescriptor {
    /// Familia efectiva (explícita o derivada del nombre).
    pub fn family_key(&self) -> String {
        self.family
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }
}
