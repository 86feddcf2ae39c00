//! Fábrica, registro y cadena de comandos con overlays por versión.
pub mod chain;
pub mod factory;
pub mod registry;
pub mod signfile;
pub mod stage;
