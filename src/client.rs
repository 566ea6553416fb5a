use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::messages::{GameMessage, JoinGameResponse, QueueActionRequest};
use crate::retry::RetryPolicy;
use crate::routes;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};

/// Client for one player's session on the game server.
///
/// The session token is held behind a lock, so a client can be shared across
/// tasks through an `Arc`. Each call reads the token once before sending, so
/// a request never carries a token that was replaced halfway through.
///
/// Every operation except `join` needs a prior successful join and fails with
/// [`ClientError::NotJoined`] without touching the network otherwise.
#[derive(Debug)]
pub struct GameClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    retry: RetryPolicy,
    session: Session,
}

impl GameClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> GameClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            retry: RetryPolicy::from_config(&config),
            transport,
            config,
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn is_joined(&self) -> bool {
        self.session.is_joined().await
    }

    pub async fn token(&self) -> Option<String> {
        self.session.token().await
    }

    /// Join the game as `name` and keep the returned token for later calls.
    ///
    /// A 503 waits `retry_delay` and tries again; other failures are retried
    /// straight away, except on the last attempt where they are returned.
    /// `Ok(None)` means every attempt got a 503: nothing was joined and any
    /// earlier token is still in place.
    pub async fn join(&self, name: &str) -> Result<Option<JoinGameResponse>, ClientError> {
        let joined = self
            .retry
            .run(move |attempt| {
                debug!("Joining as {} (attempt {})", name, attempt);
                self.try_join(name)
            })
            .await?;

        match joined {
            Some(response) => {
                self.session.set_token(response.token.clone()).await?;
                info!("Successfully joined the game as {}", name);
                Ok(Some(response))
            }
            None => {
                warn!(
                    "Could not join as {} after {} attempts",
                    name, self.retry.max_attempts
                );
                Ok(None)
            }
        }
    }

    async fn try_join(&self, name: &str) -> Result<JoinGameResponse, ClientError> {
        let body = self.transport.send(routes::join(name)).await?.into_body()?;
        let response: JoinGameResponse =
            serde_json::from_str(&body).map_err(ClientError::Deserialize)?;
        if response.token.trim().is_empty() {
            return Err(ClientError::EmptyToken);
        }
        Ok(response)
    }

    /// Submit a batch of actions to the session's queue. Not retried.
    pub async fn queue_action(&self, actions: &[QueueActionRequest]) -> Result<(), ClientError> {
        let token = self.session.require_token().await?;
        let request = routes::queue_actions(&token, actions)?;
        self.transport.send(request).await?.into_body()?;
        debug!("Queued {} action(s)", actions.len());
        Ok(())
    }

    /// Drop everything waiting in the session's queue. Not retried.
    pub async fn clear_action(&self) -> Result<(), ClientError> {
        let token = self.session.require_token().await?;
        self.transport
            .send(routes::clear_actions(&token))
            .await?
            .into_body()?;
        debug!("Cleared action queue");
        Ok(())
    }

    /// Fetch the pending messages, in server order. The server empties the
    /// queue as part of the same call.
    pub async fn read_and_empty_messages(&self) -> Result<Vec<GameMessage>, ClientError> {
        let token = self.session.require_token().await?;
        let body = self
            .transport
            .send(routes::player_messages(&token))
            .await?
            .into_body()?;
        serde_json::from_str(&body).map_err(ClientError::Deserialize)
    }

    /// [`queue_action`](Self::queue_action) for callers that don't act on
    /// failure. Errors are logged and dropped.
    pub async fn queue_action_best_effort(&self, actions: &[QueueActionRequest]) {
        if let Err(e) = self.queue_action(actions).await {
            error!("Failed to queue actions: {}", e);
        }
    }

    pub async fn clear_action_best_effort(&self) {
        if let Err(e) = self.clear_action().await {
            error!("Failed to clear actions: {}", e);
        }
    }

    /// `None` on any failure, which is logged
    pub async fn read_and_empty_messages_or_none(&self) -> Option<Vec<GameMessage>> {
        match self.read_and_empty_messages().await {
            Ok(messages) => Some(messages),
            Err(e) => {
                error!("Failed to read messages: {}", e);
                None
            }
        }
    }
}
