use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JoinGameResponse {
    #[serde(alias = "Token")]
    pub token: String,
    // Whatever else the server sends back (starting position, heading, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JoinGameResponse {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// A message drained from the player's message queue
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct GameMessage(Value);

impl GameMessage {
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}
