//! sign-adapters: colaboradores de I/O del pipeline.
//!
//! Aquí vive todo lo que el core trata como frontera externa:
//! - decodificación del manifiesto de herramientas,
//! - carga/persistencia del fichero de contexto de run,
//! - fetch de binarios (path local o descarga HTTP),
//! - executors concretos (spawn de proceso y endpoint remoto).
pub mod context_file;
pub mod exec;
pub mod fetch;
pub mod manifest_file;

pub use context_file::{load_context, persist_context, ContextFile, RunDirective};
pub use exec::{DefaultExecutor, HttpExecutor, ProcessExecutor};
pub use fetch::{HttpToolFetcher, LocalToolFetcher};
pub use manifest_file::load_manifest;
