//! Start-movie sequence: find the video playlist, clear it, queue the movie, open it.
//!
//! Each step waits for the previous one and only proceeds on a literal `"OK"`
//! (or, for discovery, a usable playlist). Nothing is retried and nothing is
//! rolled back: a failed insert leaves the playlist cleared.

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::error::{KodiError, Step, StartMovieError};
use super::protocol::{RpcAck, RpcCall};
use super::transport::RpcTransport;
use super::types::{select_video_playlist, Playlist};

/// The movie always goes first in the freshly cleared playlist.
const START_POSITION: u32 = 0;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Discovering,
  Clearing { playlist_id: i64 },
  Inserting { playlist_id: i64 },
  Opening { playlist_id: i64 },
  Done,
}

impl State {
  fn step(&self) -> Option<Step> {
    match self {
      State::Discovering => Some(Step::Discover),
      State::Clearing { .. } => Some(Step::Clear),
      State::Inserting { .. } => Some(Step::Insert),
      State::Opening { .. } => Some(Step::Open),
      State::Done => None,
    }
  }
}

/// Drives the four dependent calls needed to play a library movie.
pub struct MovieStarter<T> {
  transport: T,
  cancel: Option<CancellationToken>,
}

impl<T: RpcTransport> MovieStarter<T> {
  pub fn new(transport: T) -> Self {
    Self {
      transport,
      cancel: None,
    }
  }

  /// Check `token` before each step and stop once it has fired.
  ///
  /// A request already in flight is not interrupted.
  pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
    self.cancel = Some(token);
    self
  }

  /// Run the whole sequence for `movie_id`.
  ///
  /// Success means Kodi acknowledged `Player.Open`; whether the movie is
  /// actually playing is not checked.
  pub async fn start_movie(&self, movie_id: i64) -> Result<(), StartMovieError> {
    let mut state = State::Discovering;

    while let Some(step) = state.step() {
      if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
        log::info!("Start movie {} cancelled before {}", movie_id, step);
        return Err(StartMovieError::Cancelled { step });
      }

      state = self.advance(state, movie_id).await.inspect_err(|e| {
        log::error!("Start movie {} failed: {}", movie_id, e);
      })?;
    }

    log::info!("Seems like we managed to start movie {}", movie_id);
    Ok(())
  }

  async fn advance(&self, state: State, movie_id: i64) -> Result<State, StartMovieError> {
    match state {
      State::Discovering => {
        let value = self.call(Step::Discover, RpcCall::get_playlists()).await?;
        let playlists: Vec<Playlist> =
          serde_json::from_value(value).map_err(|e| StartMovieError::Transport {
            step: Step::Discover,
            source: KodiError::Json(e),
          })?;

        if playlists.is_empty() {
          return Err(StartMovieError::EmptyPlaylistSet);
        }
        let playlist = select_video_playlist(&playlists).ok_or(StartMovieError::NoVideoPlaylist)?;
        log::debug!("Using video playlist {}", playlist.id);

        Ok(State::Clearing {
          playlist_id: playlist.id,
        })
      }
      State::Clearing { playlist_id } => {
        self
          .expect_ok(Step::Clear, RpcCall::clear_playlist(playlist_id))
          .await?;
        Ok(State::Inserting { playlist_id })
      }
      State::Inserting { playlist_id } => {
        self
          .expect_ok(
            Step::Insert,
            RpcCall::insert_movie(playlist_id, START_POSITION, movie_id),
          )
          .await?;
        Ok(State::Opening { playlist_id })
      }
      State::Opening { playlist_id } => {
        self
          .expect_ok(Step::Open, RpcCall::open_playlist(playlist_id, START_POSITION))
          .await?;
        Ok(State::Done)
      }
      State::Done => Ok(State::Done),
    }
  }

  async fn call(&self, step: Step, call: RpcCall) -> Result<Value, StartMovieError> {
    self
      .transport
      .call(&call)
      .await
      .map_err(|source| StartMovieError::Transport { step, source })
  }

  async fn expect_ok(&self, step: Step, call: RpcCall) -> Result<(), StartMovieError> {
    let ack = RpcAck(self.call(step, call).await?);
    if ack.is_ok() {
      Ok(())
    } else {
      Err(StartMovieError::UnexpectedResult {
        step,
        response: ack.into_inner(),
      })
    }
  }
}
