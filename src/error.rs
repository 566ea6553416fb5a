use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Queue, clear and message calls need a token from a successful join
    NotJoined,
    /// Join answered 2xx but without a usable token
    EmptyToken,
    /// HTTP 503, the only failure worth waiting out
    ServiceUnavailable,
    Status { status: u16, body: String },
    Transport(String),
    Deserialize(serde_json::Error),
    Serialize(serde_json::Error),
}

impl ClientError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::ServiceUnavailable)
    }

    pub fn from_status(status: u16, body: String) -> Self {
        if status == 503 {
            ClientError::ServiceUnavailable
        } else {
            ClientError::Status { status, body }
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotJoined => write!(f, "Not joined to a game"),
            ClientError::EmptyToken => write!(f, "Join response carried an empty token"),
            ClientError::ServiceUnavailable => write!(f, "Service unavailable"),
            ClientError::Status { status, body } if body.is_empty() => {
                write!(f, "Request failed with status {}", status)
            }
            ClientError::Status { status, body } => {
                write!(f, "Request failed with status {}: {}", status, body)
            }
            ClientError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ClientError::Deserialize(e) => write!(f, "Invalid response body: {}", e),
            ClientError::Serialize(e) => write!(f, "Could not encode request: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Deserialize(e) | ClientError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}
