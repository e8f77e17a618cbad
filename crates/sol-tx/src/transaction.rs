//! Signed transaction assembly and parsing.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16 (one byte for fewer than 128)
//!   signatures              64 bytes * num_signatures
//!   message                 see `message`
//! ```

use tracing::debug;

use crate::error::{SigningError, TxError, WireError};
use crate::keys::Signature;
use crate::message::{decode_compact_u16, encode_compact_u16, Message, TransactionBuilder};
use crate::signer::{self, Keypair, KEYPAIR_LENGTH};

/// Upper bound for the signature count of a parsed transaction.
const MAX_SIGNATURES: usize = u8::MAX as usize;

/// Signatures plus the serialized message they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    signatures: Vec<Signature>,
    message: Vec<u8>,
}

impl SignedTransaction {
    /// Pair signatures (in signer-table order) with message bytes.
    pub fn new(signatures: Vec<Signature>, message: Vec<u8>) -> Result<Self, WireError> {
        if signatures.is_empty() {
            return Err(WireError::NoSignatures);
        }
        if signatures.len() > MAX_SIGNATURES {
            return Err(WireError::SignatureCountMismatch {
                signatures: signatures.len(),
                required: MAX_SIGNATURES,
            });
        }
        Ok(Self {
            signatures,
            message,
        })
    }

    /// Sign a compiled single-signer message.
    pub fn sign(message: &Message, keypair: &Keypair) -> Result<Self, TxError> {
        let bytes = message.serialize()?;
        let signature = keypair.sign_message(&bytes)?;
        Ok(Self::new(vec![signature], bytes)?)
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn message_bytes(&self) -> &[u8] {
        &self.message
    }

    /// The transaction id: the first (fee payer) signature.
    pub fn id(&self) -> &Signature {
        &self.signatures[0]
    }

    /// Wire bytes ready for submission.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut wire = Vec::with_capacity(1 + 64 * self.signatures.len() + self.message.len());
        // Bounded by MAX_SIGNATURES in `new`.
        encode_compact_u16(self.signatures.len() as u16, &mut wire);
        for signature in &self.signatures {
            wire.extend_from_slice(signature.as_bytes());
        }
        wire.extend_from_slice(&self.message);
        wire
    }

    /// Split wire bytes into signatures and message.
    ///
    /// The message must parse, and its header must require exactly as many
    /// signatures as the transaction carries.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, WireError> {
        let (count, prefix) = decode_compact_u16(bytes)?;
        let count = count as usize;
        if count == 0 {
            return Err(WireError::NoSignatures);
        }

        let sigs_end = prefix + 64 * count;
        if sigs_end > bytes.len() {
            return Err(WireError::Truncated("signatures"));
        }
        let signatures = bytes[prefix..sigs_end]
            .chunks_exact(64)
            .map(|chunk| Signature::try_from_slice(chunk).map_err(|_| WireError::Truncated("signatures")))
            .collect::<Result<Vec<_>, _>>()?;

        let message = &bytes[sigs_end..];
        let parsed = Message::deserialize(message)?;
        let required = parsed.header.num_required_signatures as usize;
        if required != count {
            return Err(WireError::SignatureCountMismatch {
                signatures: count,
                required,
            });
        }

        Self::new(signatures, message.to_vec())
    }

    pub fn decode_message(&self) -> Result<Message, WireError> {
        Message::deserialize(&self.message)
    }

    /// Check every signature against the signer key at the same index.
    pub fn verify(&self) -> Result<(), WireError> {
        let message = self.decode_message()?;
        let signers = message.signer_keys();
        if signers.len() != self.signatures.len() {
            return Err(WireError::SignatureCountMismatch {
                signatures: self.signatures.len(),
                required: signers.len(),
            });
        }
        for (index, (key, signature)) in signers.iter().zip(&self.signatures).enumerate() {
            if !signer::verify(key, &self.message, signature) {
                return Err(WireError::InvalidSignature { index });
            }
        }
        Ok(())
    }
}

impl TransactionBuilder {
    /// Build, sign with the 64-byte keypair, and return final wire bytes.
    ///
    /// The signature covers the message bytes without the signature-count
    /// placeholder. The builder is left untouched, so a failure can be
    /// fixed and the call retried.
    pub fn build_and_sign(&self, keypair_bytes: &[u8]) -> Result<Vec<u8>, TxError> {
        if keypair_bytes.len() != KEYPAIR_LENGTH {
            return Err(SigningError::InvalidKeySize {
                actual: keypair_bytes.len(),
            }
            .into());
        }

        crypto_utils::runtime::initialize()
            .map_err(|e| SigningError::SigningFailure(e.to_string()))?;
        let keypair = Keypair::from_bytes(keypair_bytes)?;

        let unsigned = self.build()?;
        let message = &unsigned[1..];
        let signature = keypair.sign_message(message)?;

        let transaction = SignedTransaction::new(vec![signature], message.to_vec())?;
        debug!(signature = %signature, "signed transaction");
        Ok(transaction.to_wire())
    }
}
