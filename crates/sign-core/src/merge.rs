//! Fusión de resultados crudos en bloques de contexto.
use chrono::{DateTime, Utc};
use serde_json::json;

use sign_domain::{render_argument_string, ArgumentPair, ContextBlock, SignatureRecord, SigningBlock};

use crate::constants::PIPELINE_VERSION;
use crate::exec::RawResult;
use crate::hashing::hash_value;
use crate::tool::ToolClient;

/// Parser del stdout de la herramienta hacia el sub-bloque de origen.
pub struct ResultMerger;

impl ResultMerger {
    /// Inspecciona el stdout buscando los campos relevantes de un bloque de
    /// firma (`timestamp:` en RFC3339 y `thumbprint:`, sin distinguir
    /// mayúsculas) y devuelve el sub-bloque con el registro del target
    /// añadido: el bloque resultante lleva los campos originales más los
    /// parseados.
    pub fn parse(raw: &RawResult,
                 originating: &SigningBlock,
                 client: &ToolClient,
                 args: &[ArgumentPair])
                 -> ContextBlock {
        let mut timestamp: Option<DateTime<Utc>> = None;
        let mut thumbprint: Option<String> = None;
        for line in raw.stdout.lines() {
            let line = line.trim();
            if let Some(rest) = strip_prefix_ci(line, "timestamp:") {
                timestamp = DateTime::parse_from_rfc3339(rest.trim())
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc));
            } else if let Some(rest) = strip_prefix_ci(line, "thumbprint:") {
                thumbprint = Some(rest.trim().to_string());
            }
        }

        let fingerprint = hash_value(&json!({
            "pipeline": PIPELINE_VERSION,
            "tool": client.name(),
            "version": client.version().to_string(),
            "args": render_argument_string(args),
        }));

        let record = SignatureRecord { code: raw.exit_code,
                                       timestamp,
                                       thumbprint,
                                       stdout: raw.stdout.clone(),
                                       fingerprint };

        let mut block = originating.clone();
        let target = block.resolved_target().unwrap_or_default().to_string();
        block.results.insert(target, record);
        ContextBlock::Signing(block)
    }
}

fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        line.get(prefix.len()..)
    } else {
        None
    }
}
