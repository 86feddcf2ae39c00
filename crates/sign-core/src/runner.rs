//! Runner con pool de workers acotado.
//!
//! Cada `do_work` es una unidad de trabajo bloqueante (proceso externo o
//! request remota); ninguna etapa suspende internamente. El bound del pool se
//! dimensiona por debajo del límite de concurrencia de la herramienta: muchas
//! herramientas de firma están limitadas por licencia o token hardware a una
//! invocación simultánea, de ahí el valor por defecto de 1 en el CLI.
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::command::chain::{CommandChain, CommandResult};
use crate::context::RunContext;
use crate::errors::CoreError;
use crate::exec::ToolExecutor;

pub struct PipelineRunner {
    executor: Arc<dyn ToolExecutor>,
    worker_bound: usize,
}

impl PipelineRunner {
    pub fn new(executor: Arc<dyn ToolExecutor>, worker_bound: usize) -> Self {
        Self { executor,
               worker_bound: worker_bound.max(1) }
    }

    /// Ejecuta la acción de la cadena sobre cada target y fusiona cada
    /// resultado exactamente una vez bajo `block_name`. Devuelve los
    /// resultados en el orden declarado de targets.
    ///
    /// Pre-vuelo: todos los targets se resuelven antes de lanzar nada, de
    /// modo que un error de resolución aborta sin efectos externos. Si un
    /// worker falla con ejecuciones en vuelo, las ya lanzadas terminan y sus
    /// resultados quedan fusionados (el join de abajo es el barrier que
    /// protege a `persist`).
    pub async fn run_targets(&self,
                             chain: Arc<CommandChain>,
                             block_name: &str,
                             targets: &[String],
                             ctx: Arc<RunContext>)
                             -> Result<Vec<CommandResult>, CoreError> {
        for t in targets {
            chain.prepare(t)?;
        }

        let semaphore = Arc::new(Semaphore::new(self.worker_bound));
        let mut handles = Vec::with_capacity(targets.len());
        for target in targets {
            let chain = Arc::clone(&chain);
            let executor = Arc::clone(&self.executor);
            let ctx = Arc::clone(&ctx);
            let semaphore = Arc::clone(&semaphore);
            let block_name = block_name.to_string();
            let target = target.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned()
                                       .await
                                       .map_err(|e| CoreError::Internal(e.to_string()))?;
                let result = chain.do_work(&target, executor.as_ref()).await?;
                ctx.merge(block_name, result.context.clone());
                Ok::<CommandResult, CoreError>(result)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut first_error: Option<CoreError> = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(result)) => results.push(result),
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(CoreError::Internal(e.to_string()));
                    }
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use sign_domain::{ArgumentPair, ContextBlock, SigningBlock, TargetOverride, Version};

    use crate::command::factory::CommandFactory;
    use crate::command::registry::DEFAULT_REGISTRY;
    use crate::exec::RawResult;
    use crate::tool::ToolClient;

    /// Executor de test: registra invocaciones y responde un guion fijo.
    struct ScriptedExecutor {
        calls: AtomicUsize,
        exit_code: i32,
        stdout: String,
    }

    impl ScriptedExecutor {
        fn new(exit_code: i32, stdout: &str) -> Self {
            Self { calls: AtomicUsize::new(0),
                   exit_code,
                   stdout: stdout.to_string() }
        }
    }

    #[async_trait]
    impl ToolExecutor for ScriptedExecutor {
        async fn execute(&self,
                         _client: &ToolClient,
                         _args: &[ArgumentPair])
                         -> Result<RawResult, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawResult { exit_code: self.exit_code,
                           stdout: self.stdout.clone() })
        }
    }

    fn chain_for(targets: &[&str], version: Version) -> Arc<CommandChain> {
        let mut b = SigningBlock::new(ArgumentPair::new("--hash", "sha256"),
                                      ArgumentPair::new("--cert", "OWR-EV-20"));
        for t in targets {
            b.targets.insert((*t).to_string(), TargetOverride::default());
        }
        let client = ToolClient::Process { name: "SignFile".into(),
                                           family: "signfile".into(),
                                           version,
                                           path: "/opt/signfile".into() };
        let factory = CommandFactory::new(&DEFAULT_REGISTRY);
        Arc::new(factory.create_command("sign", client, ContextBlock::Signing(b)).expect("supported"))
    }

    #[tokio::test]
    async fn runs_all_targets_and_merges_once_each() {
        let executor = Arc::new(ScriptedExecutor::new(0, "thumbprint: AB12CD\n"));
        let runner = PipelineRunner::new(executor.clone(), 4);
        let chain = chain_for(&["a", "b", "c"], Version::new(1, 0));
        let ctx = Arc::new(RunContext::new());
        ctx.merge("Signing", ContextBlock::Signing(SigningBlock::new(ArgumentPair::new("--hash", "sha256"),
                                                                     ArgumentPair::new("--cert", "OWR-EV-20"))));

        let targets: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let results = runner.run_targets(chain, "Signing", &targets, Arc::clone(&ctx))
                            .await
                            .expect("run completes");
        assert_eq!(results.len(), 3);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 3);

        let merged = ctx.resolve("Signing").expect("block");
        assert_eq!(merged.as_signing().expect("signing").results.len(), 3);
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_result_not_an_error() {
        // exit 3 limpio: el run no lanza y el resultado se fusiona igual
        let executor = Arc::new(ScriptedExecutor::new(3, "token locked\n"));
        let runner = PipelineRunner::new(executor, 1);
        let chain = chain_for(&["a"], Version::new(1, 0));
        let ctx = Arc::new(RunContext::new());

        let results = runner.run_targets(chain, "Signing", &["a".to_string()], Arc::clone(&ctx))
                            .await
                            .expect("clean non-zero exit is not an error");
        assert_eq!(results[0].code, 3);
        assert!(ctx.has_results());
    }

    #[tokio::test]
    async fn unknown_target_aborts_before_any_execution() {
        let executor = Arc::new(ScriptedExecutor::new(0, ""));
        let runner = PipelineRunner::new(executor.clone(), 2);
        let chain = chain_for(&["a"], Version::new(1, 0));
        let ctx = Arc::new(RunContext::new());

        let targets: Vec<String> = vec!["a".into(), "ghost.bin".into()];
        let err = runner.run_targets(chain, "Signing", &targets, Arc::clone(&ctx))
                        .await
                        .unwrap_err();
        assert!(matches!(err, CoreError::Domain(sign_domain::DomainError::TargetNotFound(_))));
        // pre-vuelo: ningún proceso llegó a lanzarse y el contexto quedó intacto
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
        assert!(!ctx.has_results());
    }
}
