//! Parsing of the model's JSON reply.

use serde_json::Value;

/// Fields pulled from a reply object. Missing or non-string labels are `None`.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ModelReply {
    pub l1: Option<String>,
    pub l2: Option<String>,
    pub l3: Option<String>,
    pub confidence: Option<String>,
}

/// Parse a reply. Returns `None` unless the text is a single JSON object.
pub(crate) fn parse_reply(raw: &str) -> Option<ModelReply> {
    let Value::Object(fields) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };

    let label = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
    let confidence = match fields.get("confidence") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Some(ModelReply {
        l1: label("L1"),
        l2: label("L2"),
        l3: label("L3"),
        confidence,
    })
}
