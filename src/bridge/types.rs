use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{TransformOutput, source_map::SourceMap};

// ============================================================
// Requests
// ============================================================

/// One line from the host.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub id: u64,
    #[serde(flatten)]
    pub hook: Hook,
}

/// The bundler hook being invoked, tagged by `"hook"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "hook", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Hook {
    ConfigResolved { root: PathBuf },
    ResolveId { specifier: String },
    Load { module_id: String },
    Transform { code: String, module_id: String },
    HandleHotUpdate { file: PathBuf },
}

// ============================================================
// Responses
// ============================================================

/// One line back to the host. `id` is `None` only when the request line
/// could not be read far enough to find one.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ok {
        id: Option<u64>,
        result: serde_json::Value,
    },
    Err {
        id: Option<u64>,
        error: ErrorBody,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// `LocaleLoadError`, `MissingTranslationKeyError` or `ProtocolError`.
    pub kind: String,
    pub message: String,
}

/// Result of `configResolved`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResolvedResult {
    pub root: PathBuf,
    pub locales: Vec<String>,
}

/// Result of `transform` for a module with translation calls
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub code: String,
    pub map: SourceMap,
    pub keys: Vec<String>,
}

impl From<TransformOutput> for TransformResult {
    fn from(output: TransformOutput) -> Self {
        Self {
            code: output.code,
            map: output.map,
            keys: output.keys,
        }
    }
}
