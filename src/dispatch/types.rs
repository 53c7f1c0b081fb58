use serde_json::Value;

/// Fallback text when a successful response carries no usable message.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Action completed.";
/// Fallback text when a failed response carries no usable message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Unknown error";

/// The decoded outcome of one action: a verdict and the text to show.
/// Produced once per invocation and discarded after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

/// Which response fields hold the verdict and the display text.
///
/// Servers disagree on the shape of the payload: some answer
/// `{"message": "..."}` with no explicit flag, others
/// `{"success": false, "output": "..."}`. The field names are
/// configuration, not code.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFields {
    /// Name of the success flag. `None` treats every decoded response
    /// as successful.
    pub success: Option<String>,
    /// Name of the message/output field.
    pub message: String,
}

impl ResponseFields {
    pub fn new(success: Option<&str>, message: &str) -> Self {
        ResponseFields {
            success: success.map(str::to_string),
            message: message.to_string(),
        }
    }

    /// Extracts an [`ActionResult`] from a decoded JSON payload.
    ///
    /// A configured-but-missing success field counts as failure. The
    /// message falls back to a default when the field is absent or empty.
    pub fn decode(&self, payload: &Value) -> ActionResult {
        let success = match &self.success {
            Some(field) => payload.get(field).is_some_and(truthy),
            None => true,
        };

        let message = match payload.get(&self.message) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Null) | Some(Value::String(_)) | None => fallback_message(success),
            // Non-string payloads still get shown, serialized as written.
            Some(other) => other.to_string(),
        };

        ActionResult { success, message }
    }
}

fn fallback_message(success: bool) -> String {
    if success {
        DEFAULT_SUCCESS_MESSAGE.to_string()
    } else {
        DEFAULT_FAILURE_MESSAGE.to_string()
    }
}

/// Loose truthiness for servers that send the flag as whatever is handy:
/// false, zero, the empty string and null are falsy; everything else is
/// truthy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
