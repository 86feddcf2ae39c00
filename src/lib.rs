//! SignFlow: orquestación de herramientas de firma/validación versionadas.
//!
//! Este crate raíz expone el CLI y actúa como fachada de los crates del
//! workspace:
//! - `sign-domain`: modelo de datos (descriptores, bloques, argumentos).
//! - `sign-core`: pipeline de resolución, cadenas versionadas y ejecución.
//! - `sign-adapters`: colaboradores de I/O (ficheros, fetch, spawn, HTTP).

pub mod config;

pub use sign_adapters::{load_context, load_manifest, persist_context, DefaultExecutor,
                        HttpToolFetcher, LocalToolFetcher, RunDirective};
pub use sign_core::{CommandChain, CommandFactory, CommandResult, CoreError, ManifestRegistry,
                    PipelineRunner, RunContext, ToolClient, ToolResolver, DEFAULT_REGISTRY};
pub use sign_domain::{ArgumentPair, ContextBlock, DomainError, SigningBlock, ToolDescriptor,
                      ToolKind, Version};
