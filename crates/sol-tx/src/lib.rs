//! Solana-style transaction construction and signing.
//!
//! This crate builds the ledger's compact binary wire format by hand, with
//! no `solana-sdk` dependency: its own base-58 codec for 32- and 64-byte
//! identifiers, a message builder that deduplicates accounts into an index
//! table, and a detached Ed25519 signer (via `ed25519-dalek`) that assembles
//! the final transaction bytes.

pub mod base58;
pub mod error;
pub mod keys;
pub mod message;
pub mod pda;
pub mod signer;
pub mod system;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use error::{AddressError, BuildError, CodecError, SigningError, TxError, WireError};
pub use keys::{FixedBytes, Hash, PublicKey, Signature};
pub use message::{
    decode_compact_u16, encode_compact_u16, CompiledInstruction, Instruction, Message,
    MessageHeader, TransactionBuilder, LAMPORTS_PER_SIGNATURE,
};
pub use pda::{create_program_address, find_program_address};
pub use signer::{verify, Keypair, KEYPAIR_LENGTH};
pub use system::SYSTEM_PROGRAM_ID;
pub use transaction::SignedTransaction;
