//! Fábrica de cadenas de comando.
use sign_domain::ContextBlock;

use crate::errors::CoreError;
use crate::tool::ToolClient;

use super::chain::CommandChain;
use super::registry::CommandRegistry;

/// Construye cadenas para la familia del cliente resuelto, con las etapas
/// que el registro declara para `(familia, acción, versión)`.
pub struct CommandFactory<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> CommandFactory<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    /// Valida la acción contra el registro y fija las etapas por la versión
    /// resuelta del cliente. El tipo del bloque se comprueba aquí, una vez,
    /// antes de ejecutar nada.
    pub fn create_command(&self,
                          action: &str,
                          client: ToolClient,
                          block: ContextBlock)
                          -> Result<CommandChain, CoreError> {
        let family = client.family().to_string();
        let stages = self.registry
                         .stages_for(&family, action, client.version())
                         .ok_or_else(|| CoreError::UnsupportedCommand { family,
                                                                        action: action.to_string() })?;
        let signing = block.as_signing()?.clone();
        Ok(CommandChain::new(action, client, signing, stages))
    }
}
