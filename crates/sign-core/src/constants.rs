//! Constantes del pipeline.
//!
//! Los códigos de salida reservados ocupan una banda propia, separada de los
//! códigos que reportan las herramientas firmantes: un exit != 0 limpio de la
//! herramienta se devuelve tal cual al llamador y nunca colisiona con estos.

/// Versión lógica del pipeline. Entra en el fingerprint de cada invocación
/// para que un cambio de pipeline invalide fingerprints aunque la herramienta
/// y los argumentos no cambien.
pub const PIPELINE_VERSION: &str = "1.0";

/// Uso incorrecto del CLI.
pub const EXIT_USAGE: i32 = 2;
/// Fallo de decodificación/serialización de contexto o manifiesto.
pub const EXIT_CONTEXT: i32 = 3;
/// Error de resolución: tool/bloque/target/acción inexistente o tipo erróneo.
pub const EXIT_RESOLUTION: i32 = 4;
/// La herramienta no pudo obtenerse (fetch terminal).
pub const EXIT_FETCH: i32 = 5;
/// El proceso/endpoint no pudo invocarse (fallo de spawn o transporte).
pub const EXIT_EXECUTION: i32 = 6;
