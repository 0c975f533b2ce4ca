//! The seam between the start-movie sequence and the wire.

use std::future::Future;

use serde_json::Value;

use super::error::KodiError;
use super::protocol::RpcCall;

/// Performs one JSON-RPC call and hands back the unwrapped `result` member.
///
/// HTTP failures, non-2xx statuses and JSON-RPC `error` members all come back
/// as `Err`; implementations are free to log them differently.
pub trait RpcTransport: Send + Sync {
  fn call(&self, call: &RpcCall) -> impl Future<Output = Result<Value, KodiError>> + Send;
}

impl<T: RpcTransport> RpcTransport for &T {
  fn call(&self, call: &RpcCall) -> impl Future<Output = Result<Value, KodiError>> + Send {
    (**self).call(call)
  }
}
