//! Ed25519 keypairs and detached signatures.
//!
//! Keypair material uses the common 64-byte layout: 32-byte seed followed
//! by the 32-byte public key. Parsing rejects a public half that does not
//! belong to the seed.

use std::fmt;

use crypto_utils::{SecretBytes, SecretString};
use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::base58;
use crate::error::{SigningError, TxError};
use crate::keys::{PublicKey, Signature};

/// Seed (32) + public key (32).
pub const KEYPAIR_LENGTH: usize = 64;

/// An Ed25519 signing keypair. The secret half is wiped on drop.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Parse 64 bytes of keypair material.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SigningError::InvalidKeySize {
                actual: bytes.len(),
            });
        }

        let secret = SecretBytes::from_slice(bytes);
        let material = secret
            .to_array::<KEYPAIR_LENGTH>()
            .map_err(|e| SigningError::SigningFailure(e.to_string()))?;
        let signing_key = SigningKey::from_keypair_bytes(&material)
            .map_err(|e| SigningError::SigningFailure(format!("malformed keypair: {e}")))?;

        Ok(Self { signing_key })
    }

    /// Derive a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut seed = *seed;
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Self { signing_key }
    }

    /// Generate a fresh keypair from OS randomness.
    pub fn generate() -> Result<Self, SigningError> {
        let mut seed = crypto_utils::random::random_bytes_fixed::<32>()
            .map_err(|e| SigningError::SigningFailure(e.to_string()))?;
        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        Ok(keypair)
    }

    /// Parse the base-58 text form of the 64-byte keypair.
    pub fn from_base58_string(text: &str) -> Result<Self, TxError> {
        let decoded = SecretBytes::from(base58::decode(text, KEYPAIR_LENGTH)?);
        Ok(Self::from_bytes(&decoded)?)
    }

    pub fn to_base58_string(&self) -> SecretString {
        let bytes = self.to_bytes();
        SecretString::new(base58::encode(&bytes))
    }

    /// The 64-byte keypair material, in zeroizing storage.
    pub fn to_bytes(&self) -> SecretBytes {
        let mut raw = self.signing_key.to_keypair_bytes();
        let out = SecretBytes::from_slice(&raw);
        raw.zeroize();
        out
    }

    pub fn pubkey(&self) -> PublicKey {
        PublicKey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Produce a deterministic detached signature over `message`.
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, SigningError> {
        let signature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| SigningError::SigningFailure(e.to_string()))?;
        Ok(Signature::new(signature.to_bytes()))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

/// Strict Ed25519 verification of a detached signature.
///
/// Returns `false` for keys that are not valid curve points as well as for
/// signatures that do not match.
pub fn verify(pubkey: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(pubkey.as_bytes()) else {
        return false;
    };
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    verifying_key.verify_strict(message, &signature).is_ok()
}
