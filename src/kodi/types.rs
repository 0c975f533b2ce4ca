//! Kodi API types.
//!
//! These types mirror the `result` members of the JSON-RPC responses used by
//! this crate.

use serde::{Deserialize, Serialize};

/// Media kind of a server-side playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlaylistKind {
  Audio,
  Video,
  Picture,
  /// Anything newer servers report that we do not know about.
  Other(String),
}

impl From<String> for PlaylistKind {
  fn from(value: String) -> Self {
    match value.as_str() {
      "audio" => PlaylistKind::Audio,
      "video" => PlaylistKind::Video,
      "picture" => PlaylistKind::Picture,
      _ => PlaylistKind::Other(value),
    }
  }
}

impl From<PlaylistKind> for String {
  fn from(kind: PlaylistKind) -> Self {
    match kind {
      PlaylistKind::Audio => "audio".to_string(),
      PlaylistKind::Video => "video".to_string(),
      PlaylistKind::Picture => "picture".to_string(),
      PlaylistKind::Other(s) => s,
    }
  }
}

/// A playlist as listed by `Playlist.GetPlaylists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
  #[serde(rename = "playlistid")]
  pub id: i64,
  #[serde(rename = "type")]
  pub kind: PlaylistKind,
}

/// Pick the video playlist nearest the end of the listing.
pub fn select_video_playlist(playlists: &[Playlist]) -> Option<&Playlist> {
  playlists
    .iter()
    .rev()
    .find(|p| p.kind == PlaylistKind::Video)
}

/// An active player as listed by `Player.GetActivePlayers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlayer {
  #[serde(rename = "playerid")]
  pub id: i64,
  #[serde(rename = "type")]
  pub kind: String,
}

/// Library movie as listed by `VideoLibrary.GetMovies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
  #[serde(rename = "movieid")]
  pub id: i64,
  pub label: String,
}

/// `result` of `VideoLibrary.GetMovies`. Kodi omits `movies` for an empty library.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviesResult {
  #[serde(default)]
  pub movies: Vec<MovieSummary>,
}

/// Movie details from `VideoLibrary.GetMovieDetails`.
///
/// Only `movieid` and `label` are always present; any further properties the
/// server includes are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
  #[serde(rename = "movieid")]
  pub id: i64,
  pub label: String,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `result` of `VideoLibrary.GetMovieDetails`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetailsResult {
  pub moviedetails: MovieDetails,
}

/// An item queued on a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
  /// Library id; absent for items added by file path.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  pub label: String,
  #[serde(rename = "type", default)]
  pub kind: String,
}

/// `result` of `Playlist.GetItems`. Kodi omits `items` for an empty playlist.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemsResult {
  #[serde(default)]
  pub items: Vec<PlaylistEntry>,
}
