//! Frontera de ejecución externa.
//!
//! El executor es el único punto del pipeline que toca el mundo exterior.
//! Es una frontera síncrona explícita: la invocación bloquea hasta que el
//! proceso termina o el endpoint responde, porque las herramientas invocadas
//! son cajas negras sin hook de cancelación.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sign_domain::ArgumentPair;

use crate::errors::CoreError;
use crate::tool::ToolClient;

/// Resultado crudo y efímero de una invocación; lo consume inmediatamente el
/// merger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResult {
    pub exit_code: i32,
    pub stdout: String,
}

/// Invoca la herramienta (proceso o endpoint) con la secuencia de argumentos.
///
/// Un exit != 0 limpio se devuelve como `RawResult`, nunca como error.
/// `ProcessExecutionError` queda reservado a fallos de invocación: binario
/// ausente, permisos, transporte caído.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, client: &ToolClient, args: &[ArgumentPair]) -> Result<RawResult, CoreError>;
}
