//! Bloques de contexto de un run.
//!
//! - `ContextBlock` es la variante etiquetada sobre los dominios de bloque:
//!   firma hoy, `Raw` preserva bloques ajenos sin interpretarlos (round-trip
//!   del fichero de contexto).
//! - `SigningBlock` guarda los pares canónicos, las secciones por target y
//!   los resultados acumulados que escribe el merger.
//! - La resolución de target es una función pura de `(bloque, target_id)`:
//!   sin estado oculto, el sub-bloque resuelto es un snapshot inmutable.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::argument::ArgumentPair;
use crate::error::DomainError;

/// Tag que identifica bloques de firma en el fichero de contexto.
pub const SIGNING_KIND: &str = "signing";

fn default_kind() -> String {
    SIGNING_KIND.to_string()
}

/// Variantes de bloque soportadas. Un bloque que no decodifica como firma se
/// conserva como JSON crudo y se reescribe intacto al persistir.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextBlock {
    Signing(SigningBlock),
    Raw(Value),
}

/// Overrides opcionales de los pares canónicos para un target concreto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_algo: Option<ArgumentPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<ArgumentPair>,
}

/// Registro por target que escribe el merger: código de salida, campos
/// parseados del stdout y fingerprint de la invocación que lo produjo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
    pub stdout: String,
    pub fingerprint: String,
}

/// Bloque de firma: dos pares canónicos (algoritmo de hash y certificado),
/// targets declarados con overrides opcionales y resultados por target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningBlock {
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Par canónico del algoritmo de hash (p. ej. `--hash sha256`).
    pub hash_algo: ArgumentPair,
    /// Par canónico del certificado (p. ej. `--cert OWR-EV-20`).
    pub cert: ArgumentPair,
    /// Targets declarados del bloque, en orden.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub targets: IndexMap<String, TargetOverride>,
    /// Resultados acumulados por target (los escribe el merger).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub results: IndexMap<String, SignatureRecord>,
    /// Campos del bloque original que este pipeline no interpreta; se
    /// conservan para el round-trip.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SigningBlock {
    pub fn new(hash_algo: ArgumentPair, cert: ArgumentPair) -> Self {
        Self { kind: default_kind(),
               hash_algo,
               cert,
               targets: IndexMap::new(),
               results: IndexMap::new(),
               extra: IndexMap::new() }
    }

    /// Sub-bloque efectivo para un target: pares canónicos con los overrides
    /// del target aplicados, `targets` recortado al id resuelto y resultados
    /// vacíos. Función pura: no muta el bloque original.
    pub fn resolve_target(&self, target_id: &str) -> Result<SigningBlock, DomainError> {
        let over = self.targets
                       .get(target_id)
                       .ok_or_else(|| DomainError::TargetNotFound(target_id.to_string()))?;
        let mut sub = self.clone();
        if let Some(h) = &over.hash_algo {
            sub.hash_algo = h.clone();
        }
        if let Some(c) = &over.cert {
            sub.cert = c.clone();
        }
        sub.targets = IndexMap::new();
        sub.targets.insert(target_id.to_string(), over.clone());
        sub.results = IndexMap::new();
        Ok(sub)
    }

    /// Id del target cuando el bloque es un sub-bloque resuelto (un único
    /// target retenido).
    pub fn resolved_target(&self) -> Option<&str> {
        if self.targets.len() == 1 {
            self.targets.keys().next().map(|s| s.as_str())
        } else {
            None
        }
    }

    /// Targets declarados, en orden.
    pub fn declared_targets(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }
}

impl ContextBlock {
    /// Nombre del tipo de bloque, para diagnósticos.
    pub fn kind_name(&self) -> &str {
        match self {
            ContextBlock::Signing(b) => &b.kind,
            ContextBlock::Raw(_) => "raw",
        }
    }

    /// Accessor tipado: falla con `WrongBlockKind` en lugar de un downcast.
    pub fn as_signing(&self) -> Result<&SigningBlock, DomainError> {
        match self {
            ContextBlock::Signing(b) if b.kind == SIGNING_KIND => Ok(b),
            other => Err(DomainError::WrongBlockKind { expected: SIGNING_KIND,
                                                      found: other.kind_name().to_string() }),
        }
    }

    /// Resolución de target delegada a la variante concreta.
    pub fn resolve_target(&self, target_id: &str) -> Result<ContextBlock, DomainError> {
        let signing = self.as_signing()?;
        Ok(ContextBlock::Signing(signing.resolve_target(target_id)?))
    }
}
