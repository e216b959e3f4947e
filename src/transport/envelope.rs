use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// The only status value the API treats as success.
pub const SUCCESS_STATUS: i64 = 200;

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("response is not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Status reported in the envelope's `return` block, preserved as received.
///
/// The service documents an integer, but numeric strings have been observed;
/// [`EnvelopeStatus::code`] coerces those with a trimmed integer parse so the
/// success check treats `200` and `"200"` alike. Anything else compares as
/// non-success.
pub enum EnvelopeStatus {
    Code(i64),
    Text(String),
    Missing,
}

impl EnvelopeStatus {
    fn from_raw(raw: Option<Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Number(number)) => match number.as_i64() {
                Some(code) => Self::Code(code),
                None => Self::Text(number.to_string()),
            },
            Some(Value::String(text)) => Self::Text(text),
            Some(other) => Self::Text(other.to_string()),
        }
    }

    /// The integer status, coercing numeric text.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Missing => None,
        }
    }

    /// Whether this status is the success sentinel.
    pub fn is_success(&self) -> bool {
        self.code() == Some(SUCCESS_STATUS)
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Text(text) => f.write_str(text),
            Self::Missing => f.write_str("missing"),
        }
    }
}

#[derive(Debug, Clone)]
/// The decoded response envelope, before the status is mapped to an error.
pub struct DecodedEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
    /// The `entries` payload. Absent and JSON `null` both collapse to `None`.
    pub entries: Option<Value>,
    /// The full envelope, kept for diagnostics on the error path.
    pub envelope: Value,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "return", default)]
    meta: Option<RawReturn>,
    #[serde(default)]
    entries: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawReturn {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode raw response bytes into the documented envelope shape:
/// `{"return": {"status": <int>, "message": <string>}, "entries": <any>}`.
///
/// Invalid UTF-8 and invalid JSON are [`EnvelopeError`]s; the server could
/// not be understood at all, which the client reports as a transport
/// failure rather than an API one. A missing `return` block or status
/// decodes to [`EnvelopeStatus::Missing`], which routes to the API error
/// path downstream.
pub fn decode_envelope(body: &[u8]) -> Result<DecodedEnvelope, EnvelopeError> {
    let text = std::str::from_utf8(body)?;
    let envelope: Value = serde_json::from_str(text)?;
    let parsed: RawEnvelope = serde_json::from_value(envelope.clone())?;

    let (status, message) = match parsed.meta {
        Some(meta) => (
            EnvelopeStatus::from_raw(meta.status),
            meta.message.unwrap_or_default(),
        ),
        None => (EnvelopeStatus::Missing, String::new()),
    };

    Ok(DecodedEnvelope {
        status,
        message,
        entries: parsed.entries,
        envelope,
    })
}
