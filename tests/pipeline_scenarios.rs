//! Escenarios extremo a extremo del pipeline de firma, con herramientas
//! simuladas por scripts reales y ficheros de manifiesto/contexto en disco.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use signflow_rust::{load_context, load_manifest, persist_context, CommandFactory, CoreError,
                    DefaultExecutor, LocalToolFetcher, PipelineRunner, ToolResolver,
                    DEFAULT_REGISTRY};

/// Script que imprime sus argumentos y un resultado de firma válido.
const SIGN_OK: &str = "#!/bin/sh\n\
echo \"args: $@\"\n\
echo \"timestamp: 2026-08-04T12:00:00Z\"\n\
echo \"thumbprint: AB12CD\"\n\
exit 0\n";

/// Script que falla limpio con código 3 pero stdout válido.
const SIGN_FAILS: &str = "#!/bin/sh\n\
echo \"token locked\"\n\
exit 3\n";

struct Scenario {
    _dir: tempfile::TempDir,
    context_path: String,
    manifest_path: String,
}

fn write_tool(dir: &Path, body: &str) -> String {
    let tool = dir.join("fake-signfile");
    std::fs::write(&tool, body).expect("write tool script");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).expect("chmod tool");
    tool.display().to_string()
}

fn setup(tool_body: &str, version: &str, targets: Value) -> Scenario {
    let dir = tempfile::tempdir().expect("tempdir");
    let tool_path = write_tool(dir.path(), tool_body);

    let manifest = json!([{
        "name": "SignFile",
        "type": "process",
        "version": version,
        "path": tool_path
    }]);
    let manifest_path = dir.path().join("manifest.json");
    std::fs::write(&manifest_path, manifest.to_string()).expect("write manifest");

    let context = json!({
        "run": { "tool": "SignFile", "action": "sign", "block": "Signing" },
        "blocks": {
            "Signing": {
                "kind": "signing",
                "hash_algo": { "flag": "--hash", "value": "sha256" },
                "cert": { "flag": "--cert", "value": "OWR-EV-20" },
                "targets": targets
            },
            "Notes": { "text": "bloque ajeno al pipeline" }
        }
    });
    let context_path = dir.path().join("context.json");
    std::fs::write(&context_path, context.to_string()).expect("write context");

    Scenario { context_path: context_path.display().to_string(),
               manifest_path: manifest_path.display().to_string(),
               _dir: dir }
}

/// Ejecuta el pipeline completo como lo hace el CLI y devuelve el código
/// final (o el error).
async fn drive(scenario: &Scenario) -> Result<i32, CoreError> {
    let (run, ctx) = load_context(&scenario.context_path).await?;
    let registry = load_manifest(&scenario.manifest_path).await?;
    let ctx = Arc::new(ctx);

    let resolver = ToolResolver::new(&registry, Box::new(LocalToolFetcher));
    let client = resolver.resolve(&run.tool).await?;
    let block = ctx.resolve(&run.block)?;
    let factory = CommandFactory::new(&DEFAULT_REGISTRY);
    let chain = Arc::new(factory.create_command(&run.action, client, block)?);

    let targets = match &run.targets {
        Some(list) => list.clone(),
        None => chain.declared_targets(),
    };
    let runner = PipelineRunner::new(Arc::new(DefaultExecutor::new()), 1);
    let results = runner.run_targets(Arc::clone(&chain), &run.block, &targets, Arc::clone(&ctx))
                        .await?;

    persist_context(&scenario.context_path, &run, &ctx).await?;
    Ok(results.last().map(|r| r.code).unwrap_or(0))
}

fn written_context(scenario: &Scenario) -> Value {
    serde_json::from_str(&std::fs::read_to_string(&scenario.context_path).expect("reread context"))
        .expect("context json")
}

#[tokio::test]
async fn scenario_a_v1_renders_canonical_flags() {
    let scenario = setup(SIGN_OK, "1.0", json!({ "installer.msi": {} }));
    let code = drive(&scenario).await.expect("run completes");
    assert_eq!(code, 0);

    let written = written_context(&scenario);
    let record = &written["blocks"]["Signing"]["results"]["installer.msi"];
    let stdout = record["stdout"].as_str().expect("stdout string");
    assert!(stdout.contains("args: --hash sha256 --cert OWR-EV-20"),
            "argumentos v1 inesperados: {stdout}");
    assert_eq!(record["thumbprint"], json!("AB12CD"));
}

#[tokio::test]
async fn scenario_b_v2_renames_hash_flag_keeps_value() {
    let scenario = setup(SIGN_OK, "2.0", json!({ "installer.msi": {} }));
    drive(&scenario).await.expect("run completes");

    let written = written_context(&scenario);
    let stdout = written["blocks"]["Signing"]["results"]["installer.msi"]["stdout"]
        .as_str()
        .expect("stdout string");
    assert!(stdout.contains("args: --hash_algo sha256 --cert OWR-EV-20"),
            "argumentos v2 inesperados: {stdout}");
    assert!(!stdout.contains("--hash sha256"), "flag v1 filtrado a la v2: {stdout}");
}

#[tokio::test]
async fn scenario_c_unknown_tool_fails_before_spawn() {
    let scenario = setup(SIGN_OK, "1.0", json!({ "installer.msi": {} }));
    // el contexto pide una herramienta que el manifiesto no declara
    let text = std::fs::read_to_string(&scenario.context_path).expect("read context");
    let patched = text.replace("\"SignFile\"", "\"KlocWork\"");
    assert_ne!(text, patched, "el parche de tool no aplicó");
    std::fs::write(&scenario.context_path, &patched).expect("patch context");

    let err = drive(&scenario).await.unwrap_err();
    assert!(matches!(err, CoreError::ToolNotFound(_)));

    // el fichero quedó como estaba: sin resultados
    let written = written_context(&scenario);
    assert!(written["blocks"]["Signing"].get("results").is_none());
}

#[tokio::test]
async fn scenario_d_unknown_target_never_invokes_executor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let marker = dir.path().join("invoked.marker");
    // script que deja huella si llega a ejecutarse
    let body = format!("#!/bin/sh\ntouch {}\nexit 0\n", marker.display());
    let scenario = setup(&body, "1.0", json!({ "installer.msi": {} }));

    let text = std::fs::read_to_string(&scenario.context_path).expect("read context");
    let patched = text.replace("\"block\":\"Signing\"",
                               "\"block\":\"Signing\",\"targets\":[\"ghost.bin\"]");
    assert_ne!(text, patched, "el parche de targets no aplicó");
    std::fs::write(&scenario.context_path, &patched).expect("patch context");

    let err = drive(&scenario).await.unwrap_err();
    assert!(matches!(err, CoreError::Domain(signflow_rust::DomainError::TargetNotFound(_))));
    assert!(!marker.exists(), "el executor llegó a invocarse para un target inexistente");
}

#[tokio::test]
async fn scenario_e_nonzero_exit_persists_result_without_error() {
    let scenario = setup(SIGN_FAILS, "1.0", json!({ "installer.msi": {} }));
    let code = drive(&scenario).await.expect("clean non-zero exit is not an error");
    assert_eq!(code, 3);

    let written = written_context(&scenario);
    let record = &written["blocks"]["Signing"]["results"]["installer.msi"];
    assert_eq!(record["code"], json!(3));
    assert_eq!(record["stdout"], json!("token locked\n"));
    // el bloque ajeno sobrevive intacto
    assert_eq!(written["blocks"]["Notes"]["text"], json!("bloque ajeno al pipeline"));
}

#[tokio::test]
async fn multiple_targets_report_in_declared_order() {
    let scenario = setup(SIGN_OK, "2.0", json!({ "a.msi": {}, "b.exe": {}, "c.dll": {} }));
    let code = drive(&scenario).await.expect("run completes");
    assert_eq!(code, 0);

    let written = written_context(&scenario);
    let results = written["blocks"]["Signing"]["results"].as_object().expect("results object");
    assert_eq!(results.len(), 3);
}
