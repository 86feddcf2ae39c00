//! Adapter del manifiesto de herramientas (JSON).
//!
//! El registro del core consume descriptores ya decodificados; la sintaxis
//! del fichero vive sólo aquí. Cada registro trae `name, type, version,
//! path|endpoint` y opcionalmente `family, annotations, properties`.
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use sign_core::{CoreError, ManifestRegistry};
use sign_domain::{ToolDescriptor, ToolKind, Version};

/// Registro crudo tal y como aparece en el fichero.
#[derive(Debug, Deserialize)]
struct ManifestRecord {
    name: String,
    #[serde(default)]
    family: Option<String>,
    /// Tipo de invocación: "process"/"cli" o "remote"/"rest".
    #[serde(rename = "type")]
    kind: String,
    version: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    properties: IndexMap<String, String>,
}

/// Carga el manifiesto y construye el registro de sólo lectura del run.
pub async fn load_manifest(path: &str) -> Result<ManifestRegistry, CoreError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CoreError::ContextSerializationError(format!("read {path}: {e}")))?;
    let records: Vec<ManifestRecord> = serde_json::from_str(&text)
        .map_err(|e| CoreError::ContextSerializationError(format!("decode {path}: {e}")))?;
    let mut descriptors = Vec::with_capacity(records.len());
    for record in records {
        descriptors.push(descriptor_from_record(record)?);
    }
    debug!("manifest loaded from {path}: {} tools", descriptors.len());
    Ok(ManifestRegistry::new(descriptors))
}

fn descriptor_from_record(record: ManifestRecord) -> Result<ToolDescriptor, CoreError> {
    let kind = match record.kind.as_str() {
        "process" | "cli" => ToolKind::Process,
        "remote" | "rest" => ToolKind::RemoteEndpoint,
        other => {
            return Err(CoreError::ContextSerializationError(format!("tool {}: unknown type {other}",
                                                                    record.name)))
        }
    };
    let version: Version = record.version.parse()?;
    let location = match kind {
        ToolKind::Process => record.path,
        ToolKind::RemoteEndpoint => record.endpoint,
    };
    let location = location.ok_or_else(|| {
        CoreError::ContextSerializationError(format!("tool {}: missing path/endpoint", record.name))
    })?;
    Ok(ToolDescriptor { name: record.name,
                        family: record.family,
                        version,
                        kind,
                        location,
                        annotations: record.annotations,
                        properties: record.properties })
}
