use thiserror::Error;

/// Errores del dominio: resolución de bloques/targets y versiones.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("target not found: {0}")]
    TargetNotFound(String),
    #[error("wrong block kind: expected {expected}, found {found}")]
    WrongBlockKind { expected: &'static str, found: String },
    #[error("invalid version: {0}")]
    InvalidVersion(String),
}
