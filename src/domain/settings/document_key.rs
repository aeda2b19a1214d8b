//! Document-scoped storage keys.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Namespace that separates viewer settings from unrelated stored data.
pub const DEFAULT_SETTINGS_PREFIX: &str = "enhancedDocViewer_analysisControls";

/// The identifying part of an analysis result.
///
/// Only `document_id`, `id` and `filename` take part in key derivation; every
/// other field of the result is kept in `extra` untouched. Identifiers may
/// arrive as strings or numbers; numbers are rendered as decimal text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default, deserialize_with = "identifier", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    #[serde(default, deserialize_with = "identifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "identifier", skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultPayload {
    /// Builds a payload from an arbitrary JSON value.
    ///
    /// Returns `None` for anything that is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Sets `document_id`.
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Sets `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets `filename`.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// The identifier settings are scoped by.
    ///
    /// Precedence is `document_id`, then `id`, then `filename`; the first
    /// non-empty value wins. An empty string counts as absent.
    pub fn identifier(&self) -> Option<&str> {
        [&self.document_id, &self.id, &self.filename]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|value| !value.is_empty())
    }
}

fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Storage key for one document's settings: `<prefix>_<identifier>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Derives the key for a result payload.
    ///
    /// Pure and deterministic. Returns `None` when there is no payload or
    /// the payload carries no non-empty identifier.
    pub fn derive(prefix: &str, payload: Option<&ResultPayload>) -> Option<Self> {
        let identifier = payload?.identifier()?;
        Some(Self::compose(prefix, identifier))
    }

    /// Builds the key for an identifier that is already known.
    pub fn for_identifier(prefix: &str, identifier: &str) -> Option<Self> {
        if identifier.is_empty() {
            return None;
        }
        Some(Self::compose(prefix, identifier))
    }

    fn compose(prefix: &str, identifier: &str) -> Self {
        Self(format!("{}_{}", prefix, identifier))
    }

    /// Returns the key as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DocumentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
