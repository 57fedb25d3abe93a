use std::collections::HashSet;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::types::{ConfigResolvedResult, ErrorBody, Hook, Request, Response, TransformResult};
use crate::{
    core::{I18nPlugin, ModuleGraph},
    error::I18nError,
};

const PROTOCOL_ERROR: &str = "ProtocolError";

/// Module ids the host has fetched through `load` and still caches.
#[derive(Debug, Default)]
pub struct LoadedModules {
    ids: HashSet<String>,
}

impl LoadedModules {
    pub fn mark_loaded(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

impl ModuleGraph for LoadedModules {
    /// The host drops its copy once told, so the id is forgotten here too.
    fn invalidate_module(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }
}

impl From<I18nError> for ErrorBody {
    fn from(error: I18nError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ErrorBody {
    fn from(error: serde_json::Error) -> Self {
        Self {
            kind: PROTOCOL_ERROR.to_string(),
            message: error.to_string(),
        }
    }
}

/// Plugin state plus the view of the host's module cache.
#[derive(Debug)]
pub struct Bridge {
    plugin: I18nPlugin,
    modules: LoadedModules,
}

impl Bridge {
    pub fn new(plugin: I18nPlugin) -> Self {
        Self {
            plugin,
            modules: LoadedModules::default(),
        }
    }

    pub fn modules(&self) -> &LoadedModules {
        &self.modules
    }

    /// Answer one raw request line. A line that is not UTF-8 is a protocol error.
    pub fn handle_bytes(&mut self, line: &[u8]) -> Response {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                tracing::warn!("Request is not valid UTF-8: {}", e);
                Response::Err {
                    id: peek_id(&String::from_utf8_lossy(line)),
                    error: ErrorBody {
                        kind: PROTOCOL_ERROR.to_string(),
                        message: format!("Request is not valid UTF-8: {}", e),
                    },
                }
            }
        }
    }

    /// Answer one request line. Never fails: every problem becomes an error response.
    pub fn handle_line(&mut self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                return Response::Err {
                    id: peek_id(line),
                    error: e.into(),
                };
            }
        };

        tracing::debug!(id = request.id, hook = ?request.hook, "Handling request");

        match self.dispatch(request.hook) {
            Ok(result) => Response::Ok {
                id: Some(request.id),
                result,
            },
            Err(error) => Response::Err {
                id: Some(request.id),
                error,
            },
        }
    }

    fn dispatch(&mut self, hook: Hook) -> Result<Value, ErrorBody> {
        match hook {
            Hook::ConfigResolved { root } => {
                self.plugin.config_resolved(root)?;
                to_value(ConfigResolvedResult {
                    root: self.plugin.root().to_path_buf(),
                    locales: self.plugin.store().locale_codes().map(String::from).collect(),
                })
            }
            Hook::ResolveId { specifier } => to_value(self.plugin.resolve_id(&specifier)),
            Hook::Load { module_id } => {
                let module = self.plugin.load(&module_id);
                if module.is_some() {
                    self.modules.mark_loaded(&module_id);
                }
                to_value(module)
            }
            Hook::Transform { code, module_id } => {
                let output = self.plugin.transform(&code, &module_id)?;
                to_value(output.map(TransformResult::from))
            }
            Hook::HandleHotUpdate { file } => {
                let invalidated = self.plugin.handle_hot_update(&file, &mut self.modules)?;
                to_value(invalidated)
            }
        }
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ErrorBody> {
    serde_json::to_value(value).map_err(ErrorBody::from)
}

/// Best-effort id recovery from a request that failed to deserialize.
fn peek_id(line: &str) -> Option<u64> {
    serde_json::from_str::<Value>(line).ok()?.get("id")?.as_u64()
}

/// Answer requests from `reader` on `writer` until end of input.
///
/// Lines are read as raw bytes so that a line which is not UTF-8 gets an
/// error response instead of ending the session.
pub async fn serve<R, W>(bridge: &mut Bridge, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = trim_line_ending(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = bridge.handle_bytes(line);
        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        writer.write_all(payload.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Entry point for the stdio bridge
pub fn run_server(plugin: I18nPlugin) -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let mut bridge = Bridge::new(plugin);
            let stdin = BufReader::new(tokio::io::stdin());
            serve(&mut bridge, stdin, tokio::io::stdout()).await
        })
}
