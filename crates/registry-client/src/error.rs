use thiserror::Error;

use crate::config::ConfigError;
use crate::rpc::RpcError;
use crate::types::{EndpointError, ParseEnumError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("transaction error: {0}")]
    Transaction(#[from] sol_tx::TxError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("crypto runtime error: {0}")]
    Crypto(#[from] crypto_utils::CryptoError),

    #[error(transparent)]
    Parse(#[from] ParseEnumError),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] EndpointError),
}
