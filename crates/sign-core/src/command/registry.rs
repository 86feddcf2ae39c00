//! Registro estático de comandos por `(familia, acción)` y overlays por
//! versión.
//!
//! Sustituye al switch por herramienta: familias y acciones nuevas se
//! registran sin tocar las cadenas existentes, y la evolución de contrato de
//! una versión se expresa como un overlay más en el mapa.
use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use sign_domain::Version;

use super::signfile::{SignBaseStage, SignHashFlagV2Stage, ValidateBaseStage};
use super::stage::ArgumentStage;

type StageCtor = fn() -> Box<dyn ArgumentStage>;

#[derive(Default)]
pub struct CommandRegistry {
    base: HashMap<(String, String), StageCtor>,
    overlays: HashMap<(String, String), BTreeMap<Version, StageCtor>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra la etapa base de una acción.
    pub fn register_base(&mut self, family: &str, action: &str, ctor: StageCtor) {
        self.base.insert((family.to_string(), action.to_string()), ctor);
    }

    /// Registra un overlay que aplica desde `version` (inclusive) en
    /// adelante: "2.1" sigue recibiendo el contrato registrado en 2.0.
    pub fn register_overlay(&mut self, family: &str, action: &str, version: Version, ctor: StageCtor) {
        self.overlays
            .entry((family.to_string(), action.to_string()))
            .or_default()
            .insert(version, ctor);
    }

    pub fn supports(&self, family: &str, action: &str) -> bool {
        self.base.contains_key(&(family.to_string(), action.to_string()))
    }

    /// Etapas para una acción con la versión resuelta: base más los overlays
    /// con versión <= resuelta, en orden ascendente. Cada overlay reemplaza
    /// la secuencia del anterior, así la selección queda fija al construir la
    /// cadena.
    pub fn stages_for(&self, family: &str, action: &str, version: Version) -> Option<Vec<Box<dyn ArgumentStage>>> {
        let key = (family.to_string(), action.to_string());
        let base = self.base.get(&key)?;
        let mut stages = vec![base()];
        if let Some(overlays) = self.overlays.get(&key) {
            for (_, ctor) in overlays.range(..=version) {
                stages.push(ctor());
            }
        }
        Some(stages)
    }
}

/// Registro por defecto: familia `signfile` con las acciones `sign` (overlay
/// de contrato en 2.0) y `validate`. Se construye una sola vez al arrancar.
pub static DEFAULT_REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| {
    let mut reg = CommandRegistry::new();
    reg.register_base("signfile", "sign", || Box::new(SignBaseStage));
    reg.register_overlay("signfile", "sign", Version::new(2, 0), || Box::new(SignHashFlagV2Stage));
    reg.register_base("signfile", "validate", || Box::new(ValidateBaseStage));
    reg
});
