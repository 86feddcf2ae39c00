//! Registro de herramientas del manifiesto.
//!
//! El registro es de sólo lectura tras la carga: el adapter de fichero
//! decodifica los descriptores una vez por run y los entrega aquí como datos.
//! La sintaxis concreta del fichero de manifiesto no entra en este crate.
use indexmap::IndexMap;

use sign_domain::ToolDescriptor;

use crate::errors::CoreError;

#[derive(Debug, Default)]
pub struct ManifestRegistry {
    tools: IndexMap<String, ToolDescriptor>,
}

impl ManifestRegistry {
    /// Construye el registro desde descriptores ya decodificados. Si un
    /// nombre se repite, el último descriptor gana.
    pub fn new(descriptors: Vec<ToolDescriptor>) -> Self {
        let mut tools = IndexMap::new();
        for d in descriptors {
            tools.insert(d.name.clone(), d);
        }
        Self { tools }
    }

    /// Busca un descriptor por nombre de herramienta.
    pub fn lookup(&self, tool_name: &str) -> Result<&ToolDescriptor, CoreError> {
        self.tools
            .get(tool_name)
            .ok_or_else(|| CoreError::ToolNotFound(tool_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use sign_domain::{ToolKind, Version};

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor { name: name.into(),
                         family: Some("signfile".into()),
                         version: Version::new(1, 0),
                         kind: ToolKind::Process,
                         location: format!("/opt/{name}"),
                         annotations: vec![],
                         properties: IndexMap::new() }
    }

    #[test]
    fn lookup_known_tool() {
        let reg = ManifestRegistry::new(vec![descriptor("SignFile"), descriptor("SignTool")]);
        assert_eq!(reg.len(), 2);
        let d = reg.lookup("SignTool").expect("registered");
        assert_eq!(d.location, "/opt/SignTool");
    }

    #[test]
    fn lookup_unknown_tool_fails() {
        let reg = ManifestRegistry::new(vec![descriptor("SignFile")]);
        let err = reg.lookup("KlocWork").unwrap_err();
        assert!(matches!(err, CoreError::ToolNotFound(name) if name == "KlocWork"));
    }
}
