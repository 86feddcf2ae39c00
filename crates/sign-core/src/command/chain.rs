//! Cadena de etapas y ejecución de una acción sobre un target.
use serde::{Deserialize, Serialize};

use sign_domain::{render_argument_string, ArgumentPair, ContextBlock, SigningBlock};

use crate::errors::CoreError;
use crate::exec::ToolExecutor;
use crate::merge::ResultMerger;
use crate::tool::ToolClient;

use super::stage::ArgumentStage;

/// Resultado durable de una invocación. Se fusiona exactamente una vez en el
/// RunContext antes de persistir; nunca se descarta en silencio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    pub code: i32,
    pub stdout: String,
    pub context: ContextBlock,
}

/// Lista ordenada de etapas para una acción. La selección de etapas quedó
/// fijada por la versión resuelta al construir la cadena; la secuencia
/// efectiva es la de la última etapa.
pub struct CommandChain {
    action: String,
    client: ToolClient,
    block: SigningBlock,
    stages: Vec<Box<dyn ArgumentStage>>,
}

impl CommandChain {
    pub(crate) fn new(action: &str,
                      client: ToolClient,
                      block: SigningBlock,
                      stages: Vec<Box<dyn ArgumentStage>>)
                      -> Self {
        Self { action: action.to_string(),
               client,
               block,
               stages }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn client(&self) -> &ToolClient {
        &self.client
    }

    /// Targets declarados por el bloque de la cadena, en orden.
    pub fn declared_targets(&self) -> Vec<String> {
        self.block.declared_targets()
    }

    /// Secuencia efectiva para un sub-bloque: las etapas se pliegan en orden
    /// y cada una reemplaza la secuencia de la anterior.
    pub fn effective_arguments(&self, sub: &SigningBlock) -> Vec<ArgumentPair> {
        let mut seq: Vec<ArgumentPair> = Vec::new();
        for stage in &self.stages {
            seq = stage.arguments(sub, &seq);
        }
        seq
    }

    /// Resuelve el target y construye la secuencia, sin ejecutar nada. El
    /// runner lo usa como pre-vuelo: un error de resolución aborta antes de
    /// que exista ningún proceso externo.
    pub fn prepare(&self, target_id: &str) -> Result<(SigningBlock, Vec<ArgumentPair>), CoreError> {
        let sub = self.block.resolve_target(target_id)?;
        let args = self.effective_arguments(&sub);
        Ok((sub, args))
    }

    /// Forma serializada del contrato CLI para un target.
    pub fn argument_string(&self, target_id: &str) -> Result<String, CoreError> {
        let (_, args) = self.prepare(target_id)?;
        Ok(render_argument_string(&args))
    }

    /// Unidad de trabajo bloqueante: resolver el target, ejecutar la
    /// herramienta y parsear el resultado hacia el sub-bloque de origen.
    pub async fn do_work(&self, target_id: &str, executor: &dyn ToolExecutor) -> Result<CommandResult, CoreError> {
        let (sub, args) = self.prepare(target_id)?;
        let raw = executor.execute(&self.client, &args).await?;
        let context = ResultMerger::parse(&raw, &sub, &self.client, &args);
        Ok(CommandResult { code: raw.exit_code,
                           stdout: raw.stdout,
                           context })
    }
}
