//! Etapas de la cadena de comandos.
use sign_domain::{ArgumentPair, SigningBlock};

/// Campos canónicos de un bloque de firma. Cada etapa declara exactamente
/// cuáles consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    HashAlgorithm,
    Certificate,
}

/// Una etapa establece la secuencia base o REEMPLAZA la secuencia de la etapa
/// previa. Override total, nunca merge: la secuencia efectiva de la cadena es
/// exactamente la de la última etapa.
///
/// Una etapa overlay puede renombrar un flag pasando el valor canónico
/// intacto, o recomputar un valor por completo.
pub trait ArgumentStage: Send + Sync {
    /// Nombre estable, para diagnósticos.
    fn id(&self) -> &'static str;

    /// Campos canónicos que esta etapa lee del sub-bloque.
    fn reads(&self) -> &'static [CanonicalField];

    /// Secuencia de esta etapa. `prior` es la secuencia de la etapa anterior
    /// (vacía para la etapa base).
    fn arguments(&self, block: &SigningBlock, prior: &[ArgumentPair]) -> Vec<ArgumentPair>;
}
