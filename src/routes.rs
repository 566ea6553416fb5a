//! Request builders for the game server endpoints.
//!
//! Names and tokens are percent-encoded before they go into a path or query.

use urlencoding::encode;

use crate::error::ClientError;
use crate::messages::QueueActionRequest;
use crate::transport::ApiRequest;

pub fn join(name: &str) -> ApiRequest {
    ApiRequest::get(format!("/game/join?name={}", encode(name)))
}

pub fn queue_actions(token: &str, actions: &[QueueActionRequest]) -> Result<ApiRequest, ClientError> {
    let body = serde_json::to_string(actions).map_err(ClientError::Serialize)?;
    Ok(ApiRequest::post(format!("/game/{}/queue", encode(token)), body))
}

pub fn clear_actions(token: &str) -> ApiRequest {
    ApiRequest::delete(format!("/game/{}/queue/clear", encode(token)))
}

pub fn player_messages(token: &str) -> ApiRequest {
    ApiRequest::get(format!("/game/playermessages?token={}", encode(token)))
}
