//! Executors concretos: proceso local y endpoint remoto.
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::json;

use sign_core::{CoreError, RawResult, ToolClient, ToolExecutor};
use sign_domain::{render_argument_string, ArgumentPair};

/// Executor de procesos: argv = los pares en orden (flag, valor). El stdout
/// se lee hasta EOF antes de inspeccionar el exit code.
pub struct ProcessExecutor;

#[async_trait]
impl ToolExecutor for ProcessExecutor {
    async fn execute(&self, client: &ToolClient, args: &[ArgumentPair]) -> Result<RawResult, CoreError> {
        let path = match client {
            ToolClient::Process { path, .. } => path,
            ToolClient::Remote { .. } => {
                return Err(CoreError::ProcessExecutionError("remote client handed to process executor".into()))
            }
        };
        let mut cmd = tokio::process::Command::new(path);
        for pair in args {
            cmd.arg(&pair.flag).arg(&pair.value);
        }
        debug!("spawn {path} {}", render_argument_string(args));
        let output = cmd.output()
                        .await
                        .map_err(|e| CoreError::ProcessExecutionError(format!("spawn {path}: {e}")))?;
        // Terminación por señal: no hay exit limpio, cuenta como fallo de
        // invocación y no como resultado.
        let exit_code = output.status
                              .code()
                              .ok_or_else(|| CoreError::ProcessExecutionError(format!("{path} terminated by signal")))?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(RawResult { exit_code, stdout })
    }
}

/// Cuerpo JSON opcional que puede devolver un endpoint de firma.
#[derive(Debug, Deserialize)]
struct RemoteResponse {
    code: i32,
    #[serde(default)]
    stdout: String,
}

/// Executor remoto: POST de los pares como payload JSON. El status HTTP se
/// proyecta sobre la convención de exit codes (0 éxito, != 0 fallo); un
/// transporte caído es el análogo del fallo de spawn.
pub struct HttpExecutor {
    http: reqwest::Client,
}

impl HttpExecutor {
    pub fn new() -> Self {
        Self { http: reqwest::Client::new() }
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HttpExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for HttpExecutor {
    async fn execute(&self, client: &ToolClient, args: &[ArgumentPair]) -> Result<RawResult, CoreError> {
        let endpoint = match client {
            ToolClient::Remote { endpoint, .. } => endpoint,
            ToolClient::Process { .. } => {
                return Err(CoreError::ProcessExecutionError("process client handed to remote executor".into()))
            }
        };
        let payload = json!({ "args": args });
        debug!("POST {endpoint}");
        let response = self.http
                           .post(endpoint)
                           .json(&payload)
                           .send()
                           .await
                           .map_err(|e| CoreError::ProcessExecutionError(format!("request {endpoint}: {e}")))?;
        let status = response.status().as_u16();
        let body = response.text()
                           .await
                           .map_err(|e| CoreError::ProcessExecutionError(format!("response body {endpoint}: {e}")))?;
        Ok(raw_from_response(status, &body))
    }
}

/// Proyección pura `status + body -> RawResult`, testeable sin red.
fn raw_from_response(status: u16, body: &str) -> RawResult {
    if (200..300).contains(&status) {
        match serde_json::from_str::<RemoteResponse>(body) {
            Ok(r) => RawResult { exit_code: r.code,
                                 stdout: r.stdout },
            Err(_) => RawResult { exit_code: 0,
                                  stdout: body.to_string() },
        }
    } else {
        RawResult { exit_code: i32::from(status),
                    stdout: body.to_string() }
    }
}

/// Executor por defecto del CLI: despacha por tipo de cliente.
pub struct DefaultExecutor {
    process: ProcessExecutor,
    remote: HttpExecutor,
}

impl DefaultExecutor {
    pub fn new() -> Self {
        Self { process: ProcessExecutor,
               remote: HttpExecutor::new() }
    }
}

impl Default for DefaultExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for DefaultExecutor {
    async fn execute(&self, client: &ToolClient, args: &[ArgumentPair]) -> Result<RawResult, CoreError> {
        match client {
            ToolClient::Process { .. } => self.process.execute(client, args).await,
            ToolClient::Remote { .. } => self.remote.execute(client, args).await,
        }
    }
}
