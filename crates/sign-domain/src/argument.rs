//! Pares de argumentos orden-significativos y su forma serializada.
use serde::{Deserialize, Serialize};

/// Par `flag valor`. El orden dentro de la secuencia es significativo: la
/// herramienta externa lo consume posicionalmente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentPair {
    pub flag: String,
    pub value: String,
}

impl ArgumentPair {
    pub fn new(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self { flag: flag.into(),
               value: value.into() }
    }
}

/// Contrato de serialización hacia el CLI externo: cada par se escribe como
/// `flag valor ` (espacio final incluido) en el orden declarado. El parser
/// de la herramienta tolera el espacio final.
pub fn render_argument_string(pairs: &[ArgumentPair]) -> String {
    let mut out = String::new();
    for p in pairs {
        out.push_str(&p.flag);
        out.push(' ');
        out.push_str(&p.value);
        out.push(' ');
    }
    out
}
