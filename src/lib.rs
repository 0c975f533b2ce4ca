//! Control a Kodi media center over its JSON-RPC HTTP interface.
//!
//! Kodi must have "Allow remote control via HTTP" enabled; the port is set in
//! Settings -> Services -> Webserver and defaults to 8080.

mod config;
pub mod kodi;

pub use config::KodiConfig;
pub use kodi::{KodiClient, KodiError, MovieStarter, RpcTransport, StartMovieError};
