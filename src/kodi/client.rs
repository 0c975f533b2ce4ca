//! Kodi HTTP client for JSON-RPC calls.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::error::{KodiError, StartMovieError};
use super::protocol::{RpcAck, RpcCall, RpcResponse};
use super::starter::MovieStarter;
use super::transport::RpcTransport;
use super::types::*;
use crate::config::KodiConfig;

/// Kodi JSON-RPC client over HTTP POST.
///
/// Holds only read-only connection settings; it is safe to share between
/// tasks. Kodi's playlists are not, see [`KodiClient::start_movie`].
pub struct KodiClient {
  http: Client,
  config: KodiConfig,
  endpoint: String,
}

impl KodiClient {
  /// Create a client for the given configuration.
  pub fn new(config: KodiConfig) -> Result<Self, KodiError> {
    config.validate()?;

    let http = Client::builder()
      .timeout(config.timeout())
      .user_agent(config.user_agent.clone())
      .build()?;

    Ok(Self {
      http,
      endpoint: config.endpoint(),
      config,
    })
  }

  pub fn config(&self) -> &KodiConfig {
    &self.config
  }

  /// The `/jsonrpc` URL requests are posted to.
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// POST one call and unwrap the JSON-RPC envelope.
  async fn request(&self, call: &RpcCall) -> Result<Value, KodiError> {
    log::debug!("Performing request: {} {}", call.method, call.params);

    let response = self
      .http
      .post(&self.endpoint)
      .header(header::CONTENT_TYPE, "application/json")
      .json(&call.envelope())
      .send()
      .await
      .inspect_err(|e| log::error!("{} request failed: {}", call.method, e))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_else(|e| {
        log::warn!("Could not read {} error body: {}", call.method, e);
        String::new()
      });
      log::error!("{} failed with status {}: {}", call.method, status, body);
      return Err(KodiError::Status {
        status: status.as_u16(),
        body,
      });
    }

    let bytes = response.bytes().await?;
    let envelope: RpcResponse = serde_json::from_slice(&bytes)?;
    envelope
      .into_result()
      .inspect_err(|e| log::warn!("{} returned an error: {}", call.method, e))
  }

  /// Perform a call and decode its `result` member.
  async fn request_as<T: DeserializeOwned>(&self, call: RpcCall) -> Result<T, KodiError> {
    let value = self.request(&call).await?;
    Ok(serde_json::from_value(value)?)
  }

  /// Perform a state-changing call and keep its raw acknowledgement.
  async fn request_ack(&self, call: RpcCall) -> Result<RpcAck, KodiError> {
    let ack = RpcAck(self.request(&call).await?);
    if ack.is_ok() {
      log::info!("{} got ok", call.method);
    } else {
      log::warn!("{} got unexpected response: {}", call.method, ack.0);
    }
    Ok(ack)
  }

  /// Get the active players. Needed for stop/pause, not for playlists.
  pub async fn get_active_players(&self) -> Result<Vec<ActivePlayer>, KodiError> {
    let players: Vec<ActivePlayer> = self.request_as(RpcCall::get_active_players()).await?;
    log::info!("Got {} active player(s)", players.len());
    Ok(players)
  }

  /// Get the movie library.
  pub async fn get_movie_library(&self) -> Result<Vec<MovieSummary>, KodiError> {
    let result: MoviesResult = self.request_as(RpcCall::get_movies()).await?;
    log::info!("Movie library has {} movie(s)", result.movies.len());
    Ok(result.movies)
  }

  /// Get details for a movie id from the library, eg 493.
  pub async fn get_movie_details(&self, movie_id: i64) -> Result<MovieDetails, KodiError> {
    let result: MovieDetailsResult = self
      .request_as(RpcCall::get_movie_details(movie_id))
      .await?;
    log::info!("Got details for movie {}: {}", movie_id, result.moviedetails.label);
    Ok(result.moviedetails)
  }

  /// Get all playlists; usually audio, video and picture.
  ///
  /// A successful reply with no playlists is reported as `NoPlaylists`.
  pub async fn get_playlists(&self) -> Result<Vec<Playlist>, KodiError> {
    let playlists: Vec<Playlist> = self.request_as(RpcCall::get_playlists()).await?;
    if playlists.is_empty() {
      log::warn!("Kodi reported no playlists");
      return Err(KodiError::NoPlaylists);
    }
    Ok(playlists)
  }

  /// Get the items queued on a playlist.
  pub async fn get_playlist_items(&self, playlist_id: i64) -> Result<Vec<PlaylistEntry>, KodiError> {
    let result: PlaylistItemsResult = self
      .request_as(RpcCall::get_playlist_items(playlist_id))
      .await?;
    Ok(result.items)
  }

  pub async fn clear_playlist(&self, playlist_id: i64) -> Result<RpcAck, KodiError> {
    self.request_ack(RpcCall::clear_playlist(playlist_id)).await
  }

  /// Insert a library movie into a playlist at a zero-based position.
  pub async fn insert_into_playlist(
    &self,
    playlist_id: i64,
    position: u32,
    movie_id: i64,
  ) -> Result<RpcAck, KodiError> {
    self
      .request_ack(RpcCall::insert_movie(playlist_id, position, movie_id))
      .await
  }

  /// Start a playlist at a position (0 is first).
  pub async fn open_playlist(&self, playlist_id: i64, position: u32) -> Result<RpcAck, KodiError> {
    self
      .request_ack(RpcCall::open_playlist(playlist_id, position))
      .await
  }

  /// Play a library movie: clear the video playlist, queue the movie and open it.
  ///
  /// Two concurrent calls against the same Kodi race on its single video
  /// playlist; callers must not overlap them.
  pub async fn start_movie(&self, movie_id: i64) -> Result<(), StartMovieError> {
    MovieStarter::new(self).start_movie(movie_id).await
  }

  /// Like [`start_movie`](Self::start_movie), stopping between steps once `cancel` fires.
  pub async fn start_movie_with_cancel(
    &self,
    movie_id: i64,
    cancel: CancellationToken,
  ) -> Result<(), StartMovieError> {
    MovieStarter::new(self)
      .with_cancellation(cancel)
      .start_movie(movie_id)
      .await
  }
}

impl RpcTransport for KodiClient {
  async fn call(&self, call: &RpcCall) -> Result<Value, KodiError> {
    self.request(call).await
  }
}
