use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One entry of the batch posted to the queue endpoint.
///
/// The server decides what an action means; the client only carries the JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct QueueActionRequest(Value);

impl QueueActionRequest {
    /// Conventional `{"type": ..., "request": ...}` descriptor
    pub fn new(kind: impl Into<String>, request: impl Into<String>) -> Self {
        Self(json!({
            "type": kind.into(),
            "request": request.into(),
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for QueueActionRequest {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
