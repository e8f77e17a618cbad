use thiserror::Error;

/// Cryptographic runtime and secret-handling errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("crypto runtime initialization failed: {0}")]
    InitFailed(String),

    #[error("random source unavailable: {0}")]
    RandomUnavailable(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_init_failed() {
        let err = CryptoError::InitFailed("entropy probe failed".into());
        assert_eq!(
            err.to_string(),
            "crypto runtime initialization failed: entropy probe failed"
        );
    }

    #[test]
    fn display_random_unavailable() {
        let err = CryptoError::RandomUnavailable("getrandom: ENOSYS".into());
        assert_eq!(err.to_string(), "random source unavailable: getrandom: ENOSYS");
    }

    #[test]
    fn display_invalid_key_length() {
        let err = CryptoError::InvalidKeyLength {
            expected: 64,
            actual: 32,
        };
        assert_eq!(err.to_string(), "invalid key length: expected 64, got 32");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(CryptoError::InitFailed("test".into()));
        assert!(err.to_string().contains("test"));
    }
}
