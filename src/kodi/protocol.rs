//! Kodi JSON-RPC protocol types.
//!
//! Reference: https://kodi.wiki/view/JSON-RPC_API/v6

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::KodiError;

/// Every request carries the same id; calls are never pipelined.
pub const REQUEST_ID: i64 = 1;

const JSONRPC_VERSION: &str = "2.0";

/// A single remote call: method name plus named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
  pub method: &'static str,
  pub params: Value,
}

impl RpcCall {
  /// Create a call with the given params object.
  pub fn new(method: &'static str, params: Value) -> Self {
    Self { method, params }
  }

  /// List the player instances that are currently active.
  pub fn get_active_players() -> Self {
    Self::new("Player.GetActivePlayers", json!({}))
  }

  /// List every movie in the video library.
  pub fn get_movies() -> Self {
    Self::new("VideoLibrary.GetMovies", json!({}))
  }

  /// Details for one library movie.
  pub fn get_movie_details(movie_id: i64) -> Self {
    Self::new("VideoLibrary.GetMovieDetails", json!({ "movieid": movie_id }))
  }

  /// List the server's playlists.
  pub fn get_playlists() -> Self {
    Self::new("Playlist.GetPlaylists", json!({}))
  }

  /// List the items queued on a playlist.
  pub fn get_playlist_items(playlist_id: i64) -> Self {
    Self::new("Playlist.GetItems", json!({ "playlistid": playlist_id }))
  }

  /// Remove every item from a playlist.
  pub fn clear_playlist(playlist_id: i64) -> Self {
    Self::new("Playlist.Clear", json!({ "playlistid": playlist_id }))
  }

  /// Insert a library movie at a zero-based playlist position.
  pub fn insert_movie(playlist_id: i64, position: u32, movie_id: i64) -> Self {
    Self::new(
      "Playlist.Insert",
      json!({
        "playlistid": playlist_id,
        "position": position,
        "item": { "movieid": movie_id }
      }),
    )
  }

  /// Start playing a playlist from the given position.
  pub fn open_playlist(playlist_id: i64, position: u32) -> Self {
    Self::new(
      "Player.Open",
      json!({ "item": { "playlistid": playlist_id, "position": position } }),
    )
  }

  /// Wrap the call in a JSON-RPC 2.0 envelope.
  pub fn envelope(&self) -> RpcRequest<'_> {
    RpcRequest {
      jsonrpc: JSONRPC_VERSION,
      method: self.method,
      params: &self.params,
      id: REQUEST_ID,
    }
  }
}

/// Request body posted to `/jsonrpc`.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
  pub jsonrpc: &'static str,
  pub method: &'a str,
  pub params: &'a Value,
  pub id: i64,
}

/// Error member of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
  pub code: i64,
  pub message: String,
  #[serde(default)]
  pub data: Option<Value>,
}

/// Response body returned by Kodi.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
  #[serde(default)]
  pub id: Option<Value>,
  #[serde(default)]
  pub result: Option<Value>,
  #[serde(default)]
  pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
  /// Unwrap the `result` member, turning the `error` member into `KodiError::Rpc`.
  pub fn into_result(self) -> Result<Value, KodiError> {
    if let Some(error) = self.error {
      return Err(KodiError::Rpc {
        code: error.code,
        message: error.message,
      });
    }
    self.result.ok_or(KodiError::MissingResult)
  }
}

/// The literal acknowledgement Kodi sends for state-changing calls.
pub const ACK_OK: &str = "OK";

/// Raw acknowledgement of a state-changing call.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcAck(pub Value);

impl RpcAck {
  /// True only when Kodi answered with the literal `"OK"`.
  pub fn is_ok(&self) -> bool {
    self.0.as_str() == Some(ACK_OK)
  }

  /// The raw result value.
  pub fn into_inner(self) -> Value {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_envelope_serialization() {
    let call = RpcCall::insert_movie(1, 0, 493);
    let json = serde_json::to_value(call.envelope()).unwrap();
    assert_eq!(
      json,
      json!({
        "jsonrpc": "2.0",
        "method": "Playlist.Insert",
        "params": { "playlistid": 1, "position": 0, "item": { "movieid": 493 } },
        "id": 1
      })
    );
  }

  #[test]
  fn test_open_playlist_params() {
    let call = RpcCall::open_playlist(1, 0);
    assert_eq!(call.method, "Player.Open");
    assert_eq!(call.params, json!({ "item": { "playlistid": 1, "position": 0 } }));
  }

  #[test]
  fn test_response_result() {
    let json = r#"{"id":1,"jsonrpc":"2.0","result":"OK"}"#;
    let response: RpcResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.into_result().unwrap(), json!("OK"));
  }

  #[test]
  fn test_response_error() {
    let json = r#"{"id":1,"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found."}}"#;
    let response: RpcResponse = serde_json::from_str(json).unwrap();
    match response.into_result() {
      Err(KodiError::Rpc { code, message }) => {
        assert_eq!(code, -32601);
        assert_eq!(message, "Method not found.");
      }
      other => panic!("Expected rpc error, got {:?}", other),
    }
  }

  #[test]
  fn test_response_without_result() {
    let response: RpcResponse = serde_json::from_str(r#"{"id":1,"jsonrpc":"2.0"}"#).unwrap();
    assert!(matches!(response.into_result(), Err(KodiError::MissingResult)));
  }

  #[test]
  fn test_ack_requires_literal_ok() {
    assert!(RpcAck(json!("OK")).is_ok());
    assert!(!RpcAck(json!("ok")).is_ok());
    assert!(!RpcAck(json!({ "status": "OK" })).is_ok());
  }
}
