//! Kodi JSON-RPC client module.
//!
//! Architecture:
//! - `protocol.rs` - JSON-RPC envelope and per-method call builders
//! - `types.rs` - Typed `result` shapes
//! - `transport.rs` - The single-call seam used by the start-movie sequence
//! - `client.rs` - HTTP client with one method per remote call
//! - `starter.rs` - The start-movie state machine

mod client;
mod error;
mod protocol;
mod starter;
mod transport;
mod types;

pub use client::KodiClient;
pub use error::{KodiError, StartMovieError, Step};
pub use protocol::{RpcAck, RpcCall, RpcErrorObject, RpcRequest, RpcResponse};
pub use starter::MovieStarter;
pub use transport::RpcTransport;
pub use types::*;
