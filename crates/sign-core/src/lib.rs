//! sign-core: pipeline de resolución y ejecución versionada de herramientas.
pub mod command;
pub mod constants;
pub mod context;
pub mod errors;
pub mod exec;
pub mod hashing;
pub mod manifest;
pub mod merge;
pub mod resolve;
pub mod runner;
pub mod tool;

pub use command::chain::{CommandChain, CommandResult};
pub use command::factory::CommandFactory;
pub use command::registry::{CommandRegistry, DEFAULT_REGISTRY};
pub use command::stage::{ArgumentStage, CanonicalField};
pub use context::RunContext;
pub use errors::CoreError;
pub use exec::{RawResult, ToolExecutor};
pub use manifest::ManifestRegistry;
pub use merge::ResultMerger;
pub use resolve::{ToolFetcher, ToolResolver};
pub use runner::PipelineRunner;
pub use tool::ToolClient;
