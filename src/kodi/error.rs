//! Kodi error types.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when talking to Kodi over JSON-RPC.
#[derive(Debug, Error)]
pub enum KodiError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("HTTP error {status}: {body}")]
  Status { status: u16, body: String },

  #[error("JSON-RPC error {code}: {message}")]
  Rpc { code: i64, message: String },

  #[error("JSON serialization error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("No playlists found")]
  NoPlaylists,

  #[error("Response carried neither result nor error")]
  MissingResult,

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// A step of the start-movie sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Discover,
  Clear,
  Insert,
  Open,
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Step::Discover => "get playlists",
      Step::Clear => "clear playlist",
      Step::Insert => "insert movie in playlist",
      Step::Open => "start playlist",
    };
    f.write_str(name)
  }
}

/// Why a start-movie run stopped before playback was initiated.
///
/// An empty playlist set is reported here even though the transport call
/// itself succeeded; Kodi answering with no playlists is treated as failure.
#[derive(Debug, Error)]
pub enum StartMovieError {
  #[error("Could not {step}: {source}")]
  Transport {
    step: Step,
    #[source]
    source: KodiError,
  },

  #[error("No playlists found")]
  EmptyPlaylistSet,

  #[error("No movie playlist found")]
  NoVideoPlaylist,

  #[error("Could not {step}. Response: {response}")]
  UnexpectedResult {
    step: Step,
    response: serde_json::Value,
  },

  #[error("Cancelled before {step}")]
  Cancelled { step: Step },
}

impl StartMovieError {
  /// The step the run stopped at.
  pub fn step(&self) -> Step {
    match self {
      StartMovieError::Transport { step, .. }
      | StartMovieError::UnexpectedResult { step, .. }
      | StartMovieError::Cancelled { step } => *step,
      StartMovieError::EmptyPlaylistSet | StartMovieError::NoVideoPlaylist => Step::Discover,
    }
  }
}
