// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

impl ChatRequest {
    /// Parse a raw request body.
    ///
    /// Only a zero-length body counts as `{}`. A top-level value that is not
    /// an object carries no message, except `null`, which is rejected. The
    /// message itself may be a string or one of the blank values `null`,
    /// `false` and `0`; anything else is rejected.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        if body.is_empty() {
            return Some(Self { message: String::new() });
        }

        let value: Value = serde_json::from_slice(body).ok()?;
        let field = match &value {
            Value::Null => return None,
            Value::Object(object) => object.get("message"),
            _ => None,
        };

        let message = match field {
            None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return None,
        };

        Some(Self { message })
    }

    pub fn trimmed(&self) -> &str {
        self.message.trim()
    }
}
