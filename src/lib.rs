//! Client for the Space Wars game server.
//!
//! [`GameClient`] joins a game over HTTP, then queues and clears actions and
//! drains the player's message queue using the session token from the join.

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod messages;
pub mod retry;
pub mod routes;
pub mod session;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use client::GameClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use messages::{GameMessage, JoinGameResponse, QueueActionRequest};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
