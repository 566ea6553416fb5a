use tokio::sync::RwLock;

use crate::error::ClientError;

/// Token issued by the server on join. Empty until the first successful join,
/// replaced by every later one.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Snapshot of the current token, or `NotJoined`
    pub async fn require_token(&self) -> Result<String, ClientError> {
        self.token().await.ok_or(ClientError::NotJoined)
    }

    /// Blank tokens are never stored; the session keeps what it had.
    pub async fn set_token(&self, token: String) -> Result<(), ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::EmptyToken);
        }
        *self.token.write().await = Some(token);
        Ok(())
    }

    pub async fn is_joined(&self) -> bool {
        self.token.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_lifecycle() {
        let session = Session::new();
        assert!(!session.is_joined().await);
        assert!(matches!(session.require_token().await, Err(ClientError::NotJoined)));

        session.set_token("first".to_string()).await.unwrap();
        session.set_token("second".to_string()).await.unwrap();
        assert_eq!(session.require_token().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_blank_token_is_rejected() {
        let session = Session::new();
        assert!(matches!(
            session.set_token("  ".to_string()).await,
            Err(ClientError::EmptyToken)
        ));
        assert!(!session.is_joined().await);
        assert!(matches!(session.require_token().await, Err(ClientError::NotJoined)));

        session.set_token("real".to_string()).await.unwrap();
        assert!(session.set_token(String::new()).await.is_err());
        assert_eq!(session.require_token().await.unwrap(), "real");
    }
}
