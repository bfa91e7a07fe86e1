//! models/remote_model.rs
//! Payloads de la función remota de envío masivo.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBatchRequest {
    pub limit: usize,
    pub test_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBatchResult {
    /// `occurrenceId` en ocurrencias, `recordId` en la planilla
    #[serde(alias = "occurrenceId", deserialize_with = "id_text")]
    pub record_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteBatchResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Ids de texto o numéricos, siempre como texto.
fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("id inválido: {}", other))),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBatchResponse {
    #[serde(default)]
    pub processed: usize,
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub results: Vec<RemoteBatchResult>,
}
