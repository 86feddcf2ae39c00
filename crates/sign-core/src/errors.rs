//! Taxonomía de errores del pipeline.
//!
//! Política de propagación: los errores de resolución (manifiesto, fetch,
//! acción no soportada, target inexistente) abortan el pipeline afectado
//! antes de que exista ningún proceso externo. Un exit code != 0 limpio de la
//! herramienta NO es un error: viaja como `CommandResult` y lo decide el
//! llamador.
use thiserror::Error;

use sign_domain::DomainError;

use crate::constants;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("tool not found in manifest: {0}")]
    ToolNotFound(String),
    #[error("tool fetch failed for {tool}: {reason}")]
    ToolFetchError { tool: String, reason: String },
    #[error("unsupported command {action} for family {family}")]
    UnsupportedCommand { family: String, action: String },
    #[error("context block not found: {0}")]
    BlockNotFound(String),
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("process execution failed: {0}")]
    ProcessExecutionError(String),
    #[error("context serialization failed: {0}")]
    ContextSerializationError(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CoreError {
    /// Código de salida reservado del proceso para este error (banda
    /// separada de los códigos reportados por las herramientas).
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::ToolNotFound(_)
            | CoreError::UnsupportedCommand { .. }
            | CoreError::BlockNotFound(_)
            | CoreError::Domain(_) => constants::EXIT_RESOLUTION,
            CoreError::ToolFetchError { .. } => constants::EXIT_FETCH,
            CoreError::ProcessExecutionError(_) | CoreError::Internal(_) => constants::EXIT_EXECUTION,
            CoreError::ContextSerializationError(_) => constants::EXIT_CONTEXT,
        }
    }
}
