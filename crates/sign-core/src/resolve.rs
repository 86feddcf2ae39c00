//! Resolución de herramientas: manifiesto -> fetch -> cliente vivo.
use async_trait::async_trait;

use sign_domain::{ToolDescriptor, ToolKind};

use crate::errors::CoreError;
use crate::manifest::ManifestRegistry;
use crate::tool::ToolClient;

/// Colaborador externo que garantiza que la herramienta está disponible
/// localmente y devuelve su ubicación definitiva (path o endpoint).
///
/// Sin reintentos aquí: un fallo de fetch es terminal para esa herramienta.
/// Este paso no tiene efectos sobre el RunContext.
#[async_trait]
pub trait ToolFetcher: Send + Sync {
    async fn ensure_available(&self, descriptor: &ToolDescriptor) -> Result<String, CoreError>;
}

pub struct ToolResolver<'a> {
    registry: &'a ManifestRegistry,
    fetcher: Box<dyn ToolFetcher>,
}

impl<'a> ToolResolver<'a> {
    pub fn new(registry: &'a ManifestRegistry, fetcher: Box<dyn ToolFetcher>) -> Self {
        Self { registry, fetcher }
    }

    /// Resuelve un nombre de herramienta a un cliente vivo del tipo que el
    /// descriptor declara. Propaga `ToolNotFound` y `ToolFetchError`.
    pub async fn resolve(&self, tool_name: &str) -> Result<ToolClient, CoreError> {
        let descriptor = self.registry.lookup(tool_name)?;
        let location = self.fetcher.ensure_available(descriptor).await?;
        Ok(match descriptor.kind {
            ToolKind::Process => ToolClient::Process { name: descriptor.name.clone(),
                                                       family: descriptor.family_key(),
                                                       version: descriptor.version,
                                                       path: location },
            ToolKind::RemoteEndpoint => ToolClient::Remote { name: descriptor.name.clone(),
                                                             family: descriptor.family_key(),
                                                             version: descriptor.version,
                                                             endpoint: location },
        })
    }
}
