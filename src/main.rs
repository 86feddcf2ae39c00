//! Punto de entrada del CLI `signflow`.
//!
//! Uso: `signflow <run-context.json>`. El exit code del proceso replica el
//! `code` del último `CommandResult` de la acción solicitada; los errores del
//! pipeline usan la banda de códigos reservados (ver `sign_core::constants`).
use std::sync::Arc;

use sign_adapters::{load_context, load_manifest, persist_context, DefaultExecutor, HttpToolFetcher,
                    LocalToolFetcher, RunDirective};
use sign_core::resolve::ToolFetcher;
use sign_core::{constants, CommandFactory, CoreError, ManifestRegistry, PipelineRunner, RunContext,
                ToolResolver, DEFAULT_REGISTRY};
use signflow_rust::config::CONFIG;

#[tokio::main]
async fn main() {
    // Cargar .env si existe para obtener SIGNFLOW_MANIFEST y compañía
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Uso: signflow <run-context.json>");
        std::process::exit(constants::EXIT_USAGE);
    }
    let context_path = &args[1];

    let (run, ctx) = match load_context(context_path).await {
        Ok(v) => v,
        Err(e) => {
            eprintln!("[signflow] context error: {e}");
            std::process::exit(constants::EXIT_CONTEXT);
        }
    };
    let registry = match load_manifest(&CONFIG.manifest_path).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[signflow] manifest error: {e}");
            std::process::exit(constants::EXIT_CONTEXT);
        }
    };

    let ctx = Arc::new(ctx);
    match run_pipeline(&run, &registry, Arc::clone(&ctx)).await {
        Ok(code) => {
            if let Err(e) = persist_context(context_path, &run, &ctx).await {
                eprintln!("[signflow] persist error: {e}");
                std::process::exit(constants::EXIT_CONTEXT);
            }
            std::process::exit(code);
        }
        Err(e) => {
            // Abort fatal: si algún resultado llegó a fusionarse se persiste
            // para conservar el diagnóstico parcial; una resolución fallida
            // pura deja el fichero intacto.
            if ctx.has_results() {
                if let Err(pe) = persist_context(context_path, &run, &ctx).await {
                    eprintln!("[signflow] persist error: {pe}");
                }
            }
            eprintln!("[signflow] {e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run_pipeline(run: &RunDirective,
                      registry: &ManifestRegistry,
                      ctx: Arc<RunContext>)
                      -> Result<i32, CoreError> {
    let fetcher: Box<dyn ToolFetcher> = match CONFIG.fetch.as_str() {
        "http" => Box::new(HttpToolFetcher::new(CONFIG.tool_cache_dir.clone())),
        _ => Box::new(LocalToolFetcher),
    };
    let resolver = ToolResolver::new(registry, fetcher);
    let client = resolver.resolve(&run.tool).await?;
    eprintln!("[signflow] run {} tool={} v{} action={}",
              ctx.run_id(),
              client.name(),
              client.version(),
              run.action);

    let block = ctx.resolve(&run.block)?;
    let factory = CommandFactory::new(&DEFAULT_REGISTRY);
    let chain = Arc::new(factory.create_command(&run.action, client, block)?);

    let targets: Vec<String> = match &run.targets {
        Some(list) => list.clone(),
        None => chain.declared_targets(),
    };
    if targets.is_empty() {
        return Err(CoreError::Domain(sign_domain::DomainError::TargetNotFound("<none declared>".into())));
    }

    let runner = PipelineRunner::new(Arc::new(DefaultExecutor::new()), CONFIG.worker_bound);
    let results = runner.run_targets(Arc::clone(&chain), &run.block, &targets, Arc::clone(&ctx))
                        .await?;

    for (target, result) in targets.iter().zip(&results) {
        eprintln!("[signflow] target={target} code={}", result.code);
    }
    Ok(results.last().map(|r| r.code).unwrap_or(0))
}
