//! Shared models for console packet payloads.

use serde::Deserialize;

/// Opaque key grouping related console records together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decoded console packet payload.
///
/// Only the fields this tool reads are modeled; anything else in the
/// document is ignored. `a_task_id` may be a string or a number in the
/// source data, so it is kept as a raw JSON value.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsolePacket {
    #[serde(default)]
    pub a_task_id: Option<serde_json::Value>,
    #[serde(default)]
    pub a_text: Option<String>,
}

impl ConsolePacket {
    /// Parse one raw payload string as JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Operator-output text carried by this packet, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        match self.a_text.as_deref() {
            Some(t) if !t.is_empty() => Some(t),
            _ => None,
        }
    }
}

/// Result of decoding a batch of raw payload rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodedBatch {
    /// Non-empty text fragments, in row order.
    pub texts: Vec<String>,
    /// Raw payloads that failed to parse as JSON.
    pub invalid: Vec<String>,
}

/// Decode raw payload rows, keeping successes and collecting failures.
///
/// A row whose payload parses but carries no usable `a_text` contributes
/// to neither list. Decode failures never abort the batch.
pub fn decode_packets<I>(rows: I) -> DecodedBatch
where
    I: IntoIterator<Item = String>,
{
    let mut batch = DecodedBatch::default();
    for raw in rows {
        match ConsolePacket::from_json(&raw) {
            Ok(packet) => {
                if let Some(text) = packet.text() {
                    batch.texts.push(text.to_string());
                }
            }
            Err(_) => batch.invalid.push(raw),
        }
    }
    batch
}
