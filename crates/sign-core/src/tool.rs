//! Cliente vivo de una herramienta resuelta.
use sign_domain::{ToolKind, Version};

/// Handle polimórfico sobre el tipo de invocación. La versión resuelta no
/// cambia tras la construcción. El runner clona un cliente por worker: las
/// herramientas limitadas por token de licencia se protegen con el bound del
/// pool, no con estado compartido del cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolClient {
    Process {
        name: String,
        family: String,
        version: Version,
        path: String,
    },
    Remote {
        name: String,
        family: String,
        version: Version,
        endpoint: String,
    },
}

impl ToolClient {
    pub fn name(&self) -> &str {
        match self {
            ToolClient::Process { name, .. } | ToolClient::Remote { name, .. } => name,
        }
    }

    pub fn family(&self) -> &str {
        match self {
            ToolClient::Process { family, .. } | ToolClient::Remote { family, .. } => family,
        }
    }

    pub fn version(&self) -> Version {
        match self {
            ToolClient::Process { version, .. } | ToolClient::Remote { version, .. } => *version,
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolClient::Process { .. } => ToolKind::Process,
            ToolClient::Remote { .. } => ToolKind::RemoteEndpoint,
        }
    }

    /// Ubicación concreta: path del ejecutable o URL del endpoint.
    pub fn location(&self) -> &str {
        match self {
            ToolClient::Process { path, .. } => path,
            ToolClient::Remote { endpoint, .. } => endpoint,
        }
    }
}
