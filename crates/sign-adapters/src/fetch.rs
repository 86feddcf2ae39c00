//! Fetchers de herramientas.
//!
//! El resolver delega aquí la garantía de disponibilidad local. Un fallo de
//! fetch es terminal para la herramienta: el pipeline no reintenta por encima
//! de lo que haga el propio fetcher.
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, warn};

use sign_core::{CoreError, ToolFetcher};
use sign_domain::{ToolDescriptor, ToolKind};

/// Fetcher local: comprueba que el ejecutable declarado existe. Los endpoints
/// remotos pasan intactos (su disponibilidad se comprueba al invocar).
pub struct LocalToolFetcher;

#[async_trait]
impl ToolFetcher for LocalToolFetcher {
    async fn ensure_available(&self, descriptor: &ToolDescriptor) -> Result<String, CoreError> {
        match descriptor.kind {
            ToolKind::Process => {
                let exists = tokio::fs::try_exists(&descriptor.location).await.unwrap_or(false);
                if exists {
                    Ok(descriptor.location.clone())
                } else {
                    Err(CoreError::ToolFetchError { tool: descriptor.name.clone(),
                                                    reason: format!("missing executable: {}",
                                                                    descriptor.location) })
                }
            }
            ToolKind::RemoteEndpoint => Ok(descriptor.location.clone()),
        }
    }
}

/// Fetcher con descarga: si el binario no está en la caché local lo baja
/// desde la propiedad `source_url` del descriptor y lo marca ejecutable.
pub struct HttpToolFetcher {
    cache_dir: PathBuf,
    http: reqwest::Client,
}

impl HttpToolFetcher {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into(),
               http: reqwest::Client::new() }
    }

    fn fetch_err(&self, descriptor: &ToolDescriptor, reason: impl ToString) -> CoreError {
        CoreError::ToolFetchError { tool: descriptor.name.clone(),
                                    reason: reason.to_string() }
    }
}

#[async_trait]
impl ToolFetcher for HttpToolFetcher {
    async fn ensure_available(&self, descriptor: &ToolDescriptor) -> Result<String, CoreError> {
        if descriptor.kind == ToolKind::RemoteEndpoint {
            return Ok(descriptor.location.clone());
        }

        let cached = self.cache_dir.join(format!("{}-{}", descriptor.name, descriptor.version));
        if tokio::fs::try_exists(&cached).await.unwrap_or(false) {
            debug!("tool cache hit: {}", cached.display());
            return Ok(cached.display().to_string());
        }

        let url = descriptor.properties
                            .get("source_url")
                            .ok_or_else(|| self.fetch_err(descriptor, "no source_url property"))?;
        warn!("tool {} not cached, downloading from {url}", descriptor.name);

        let response = self.http
                           .get(url)
                           .send()
                           .await
                           .map_err(|e| self.fetch_err(descriptor, e))?;
        if !response.status().is_success() {
            return Err(self.fetch_err(descriptor, format!("download status {}", response.status())));
        }
        let bytes = response.bytes().await.map_err(|e| self.fetch_err(descriptor, e))?;

        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| self.fetch_err(descriptor, e))?;
        tokio::fs::write(&cached, &bytes)
            .await
            .map_err(|e| self.fetch_err(descriptor, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&cached, std::fs::Permissions::from_mode(0o755))
                .await
                .map_err(|e| self.fetch_err(descriptor, e))?;
        }
        debug!("tool {} cached at {}", descriptor.name, cached.display());
        Ok(cached.display().to_string())
    }
}
