//! Adapter del fichero de contexto de run (JSON).
//!
//! Formato: `{ "run": { tool, action, block, targets? }, "blocks": { nombre:
//! bloque } }`. Los bloques que el pipeline no interpreta se conservan como
//! JSON crudo y se reescriben intactos al persistir.
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use sign_core::{CoreError, RunContext};
use sign_domain::ContextBlock;

/// Directiva del run: qué herramienta y acción ejecutar sobre qué bloque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDirective {
    pub tool: String,
    pub action: String,
    pub block: String,
    /// Subconjunto de targets; por defecto todos los declarados del bloque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextFile {
    pub run: RunDirective,
    pub blocks: IndexMap<String, ContextBlock>,
}

/// Carga el fichero de contexto y construye el RunContext preservando el
/// orden de bloques del fichero.
pub async fn load_context(path: &str) -> Result<(RunDirective, RunContext), CoreError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CoreError::ContextSerializationError(format!("read {path}: {e}")))?;
    let file: ContextFile = serde_json::from_str(&text)
        .map_err(|e| CoreError::ContextSerializationError(format!("decode {path}: {e}")))?;
    debug!("context loaded from {path}: {} blocks", file.blocks.len());
    Ok((file.run, RunContext::from_blocks(file.blocks)))
}

/// Reescribe el fichero con todos los bloques del RunContext (los fusionados
/// por el merger incluidos). Se llama una vez al final del run, y también en
/// un abort fatal para conservar el estado parcial.
pub async fn persist_context(path: &str, run: &RunDirective, ctx: &RunContext) -> Result<(), CoreError> {
    let blocks: IndexMap<String, ContextBlock> = ctx.snapshot().into_iter().collect();
    let file = ContextFile { run: run.clone(),
                             blocks };
    let text = serde_json::to_string_pretty(&file)
        .map_err(|e| CoreError::ContextSerializationError(format!("encode context: {e}")))?;
    tokio::fs::write(path, text)
        .await
        .map_err(|e| CoreError::ContextSerializationError(format!("write {path}: {e}")))?;
    debug!("context persisted to {path}");
    Ok(())
}
