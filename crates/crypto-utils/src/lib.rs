//! # crypto-utils
//!
//! Secret-memory wrappers, secure random generation, and the process-wide
//! crypto runtime switch shared by the transaction signer.

pub mod error;
pub mod random;
pub mod runtime;
pub mod zeroizing;

pub use error::CryptoError;
pub use zeroizing::{SecretBytes, SecretString};
