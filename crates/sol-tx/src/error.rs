use thiserror::Error;

/// Base-58 codec and fixed-size value errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("empty base58 input")]
    EmptyInput,

    #[error("invalid base58 character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("decoded length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Transaction message building errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("fee payer not set")]
    MissingFeePayer,

    #[error("transaction has no instructions")]
    NoInstructions,

    #[error("recent blockhash not set")]
    MissingBlockhash,

    #[error("account table has {count} entries, at most 256 can be indexed")]
    TooManyAccounts { count: usize },

    #[error("{field} length {len} does not fit in compact-u16")]
    LengthOverflow { field: &'static str, len: usize },
}

/// Keypair parsing and signing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("invalid keypair size: expected 64 bytes, got {actual}")]
    InvalidKeySize { actual: usize },

    #[error("signing failed: {0}")]
    SigningFailure(String),
}

/// Errors while parsing wire-format bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unexpected end of data while reading {0}")]
    Truncated(&'static str),

    #[error("non-canonical compact-u16 encoding")]
    NonCanonicalCompactU16,

    #[error("compact-u16 value overflow")]
    CompactU16Overflow,

    #[error("inconsistent message header")]
    InvalidHeader,

    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),

    #[error("account index {index} out of range for {count} accounts")]
    IndexOutOfRange { index: u8, count: usize },

    #[error("transaction has zero signatures")]
    NoSignatures,

    #[error("signature count {signatures} does not match required signers {required}")]
    SignatureCountMismatch { signatures: usize, required: usize },

    #[error("signature {index} failed verification")]
    InvalidSignature { index: usize },
}

/// Program-derived address errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("seed length exceeds 32 bytes")]
    MaxSeedLengthExceeded,

    #[error("more than 16 seeds supplied")]
    TooManySeeds,

    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    #[error("could not find a viable bump seed")]
    NoViableBump,
}

/// Any error this crate can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Address(#[from] AddressError),
}
