//! Etapas de la familia `signfile` (acciones `sign` y `validate`).
//!
//! La etapa base fija el contrato original de la herramienta. El overlay 2.0
//! expresa el cambio de contrato de la versión 2 como transformación de la
//! base, sin editar la implementación original: si el contrato vuelve a
//! cambiar, se registra otro overlay.
use sign_domain::{ArgumentPair, SigningBlock};

use super::stage::{ArgumentStage, CanonicalField};

/// Acción `sign`, contrato 1.0: `--hash <algo> --cert <id>`.
pub struct SignBaseStage;

impl ArgumentStage for SignBaseStage {
    fn id(&self) -> &'static str {
        "sign/base"
    }

    fn reads(&self) -> &'static [CanonicalField] {
        &[CanonicalField::HashAlgorithm, CanonicalField::Certificate]
    }

    fn arguments(&self, block: &SigningBlock, _prior: &[ArgumentPair]) -> Vec<ArgumentPair> {
        vec![block.hash_algo.clone(), block.cert.clone()]
    }
}

/// Overlay 2.0 de `sign`: la versión 2 renombró el flag de hash
/// (`--hash` -> `--hash_algo`); el valor pasa intacto y el par de
/// certificado no se toca.
pub struct SignHashFlagV2Stage;

impl ArgumentStage for SignHashFlagV2Stage {
    fn id(&self) -> &'static str {
        "sign/v2-hash-flag"
    }

    fn reads(&self) -> &'static [CanonicalField] {
        &[CanonicalField::HashAlgorithm, CanonicalField::Certificate]
    }

    fn arguments(&self, block: &SigningBlock, _prior: &[ArgumentPair]) -> Vec<ArgumentPair> {
        vec![ArgumentPair::new("--hash_algo", block.hash_algo.value.clone()),
             block.cert.clone()]
    }
}

/// Acción `validate`: comprueba una firma existente contra el certificado
/// declarado. Sólo lee el par de certificado.
pub struct ValidateBaseStage;

impl ArgumentStage for ValidateBaseStage {
    fn id(&self) -> &'static str {
        "validate/base"
    }

    fn reads(&self) -> &'static [CanonicalField] {
        &[CanonicalField::Certificate]
    }

    fn arguments(&self, block: &SigningBlock, _prior: &[ArgumentPair]) -> Vec<ArgumentPair> {
        vec![block.cert.clone()]
    }
}
