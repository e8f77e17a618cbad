//! The JSON-RPC collaborator: whatever fetches blockhashes and forwards
//! signed transactions. Transport is left to implementors.

use sol_tx::{Hash, Signature};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Network-level failure; the request may succeed if repeated.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The node refused the transaction. Repeating it will not help.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

impl RpcError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::Transport(_) | RpcError::Timeout(_))
    }
}

/// Minimal node interface used by [`crate::RegistryClient`].
pub trait RpcClient {
    fn get_latest_blockhash(&self) -> Result<Hash, RpcError>;

    /// Forward already-signed wire bytes, returning the transaction id.
    fn send_transaction(&self, wire: &[u8]) -> Result<Signature, RpcError>;
}

impl<T: RpcClient + ?Sized> RpcClient for &T {
    fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        (**self).get_latest_blockhash()
    }

    fn send_transaction(&self, wire: &[u8]) -> Result<Signature, RpcError> {
        (**self).send_transaction(wire)
    }
}
