//! Round-trip del fichero de contexto: cargar y persistir sin ejecutar
//! comandos reproduce el contenido de los bloques sin cambios.
use serde_json::{json, Value};

use sign_adapters::{load_context, persist_context};

fn sample_context() -> Value {
    json!({
        "run": { "tool": "SignFile", "action": "sign", "block": "Signing" },
        "blocks": {
            "Signing": {
                "kind": "signing",
                "hash_algo": { "flag": "--hash", "value": "sha256" },
                "cert": { "flag": "--cert", "value": "OWR-EV-20" },
                "targets": {
                    "installer.msi": {},
                    "app.exe": { "hash_algo": { "flag": "--hash", "value": "sha384" } }
                },
                "operator": "release-team"
            },
            "Notes": { "free_form": [1, 2, 3], "text": "no firmar en viernes" }
        }
    })
}

#[tokio::test]
async fn persist_after_load_reproduces_block_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("context.json");
    let path_str = path.display().to_string();
    std::fs::write(&path, sample_context().to_string()).expect("seed context file");

    let (run, ctx) = load_context(&path_str).await.expect("load");
    assert_eq!(run.tool, "SignFile");
    assert_eq!(run.action, "sign");
    persist_context(&path_str, &run, &ctx).await.expect("persist");

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("reread")).expect("json");
    let original = sample_context();

    // bloque de firma: pares canónicos, targets y campos extra intactos
    let sig = &written["blocks"]["Signing"];
    assert_eq!(sig["hash_algo"], original["blocks"]["Signing"]["hash_algo"]);
    assert_eq!(sig["cert"], original["blocks"]["Signing"]["cert"]);
    assert_eq!(sig["targets"], original["blocks"]["Signing"]["targets"]);
    assert_eq!(sig["operator"], json!("release-team"));
    // sin comandos ejecutados no aparece sección de resultados
    assert!(sig.get("results").is_none());

    // bloque ajeno reescrito byte a byte a nivel de valor
    assert_eq!(written["blocks"]["Notes"], original["blocks"]["Notes"]);
}

#[tokio::test]
async fn load_rejects_malformed_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").expect("seed broken file");

    let err = load_context(&path.display().to_string()).await.unwrap_err();
    assert!(matches!(err, sign_core::CoreError::ContextSerializationError(_)));
}

#[tokio::test]
async fn load_missing_file_is_a_serialization_error() {
    let err = load_context("/nonexistent/context.json").await.unwrap_err();
    assert_eq!(err.exit_code(), sign_core::constants::EXIT_CONTEXT);
}
