//! Configuración central del CLI.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`) evaluada una sola vez.
use once_cell::sync::Lazy;
use std::env;

/// Configuración global del proceso (extensible para más secciones).
pub struct AppConfig {
    /// Path del manifiesto de herramientas.
    pub manifest_path: String,
    /// Directorio caché para herramientas descargadas.
    pub tool_cache_dir: String,
    /// Bound del pool de workers. Por defecto 1: muchas herramientas de
    /// firma están limitadas por licencia/token a una invocación simultánea.
    pub worker_bound: usize,
    /// Estrategia de fetch: "local" comprueba el path, "http" descarga a la
    /// caché cuando falta.
    pub fetch: String,
}

/// Instancia global perezosa de configuración.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let manifest_path = env::var("SIGNFLOW_MANIFEST").unwrap_or_else(|_| "manifest.json".to_string());
    let tool_cache_dir = env::var("SIGNFLOW_TOOL_CACHE").unwrap_or_else(|_| ".signflow-cache".to_string());
    let worker_bound = env::var("SIGNFLOW_WORKERS").ok()
        .and_then(|v| v.parse().ok()).unwrap_or(1);
    let fetch = env::var("SIGNFLOW_FETCH").unwrap_or_else(|_| "local".to_string());
    AppConfig { manifest_path, tool_cache_dir, worker_bound, fetch }
});
