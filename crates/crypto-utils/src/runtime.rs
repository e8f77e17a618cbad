//! Process-wide crypto runtime switch.
//!
//! The Ed25519 backend needs no global setup of its own, but the signer
//! still goes through [`initialize`] before its first signature so that a
//! broken entropy source is reported once, up front, as a typed error.
//!
//! Long-lived users take a claim with [`acquire`] and give it back with
//! [`release`]. The runtime stays up while any claim is outstanding; the
//! last release tears it down.

use std::sync::{Mutex, MutexGuard};

use crate::error::CryptoError;
use crate::random::fill_random;

struct State {
    initialized: bool,
    claims: usize,
}

static STATE: Mutex<State> = Mutex::new(State {
    initialized: false,
    claims: 0,
});

fn state() -> MutexGuard<'static, State> {
    STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn initialize_locked(state: &mut State) -> Result<(), CryptoError> {
    if state.initialized {
        return Ok(());
    }

    let mut probe = [0u8; 32];
    fill_random(&mut probe).map_err(|e| CryptoError::InitFailed(e.to_string()))?;

    state.initialized = true;
    tracing::debug!("crypto runtime initialized");
    Ok(())
}

fn cleanup_locked(state: &mut State) {
    if state.initialized {
        state.initialized = false;
        tracing::debug!("crypto runtime cleaned up");
    }
}

/// Initializes the crypto runtime. A second call is a no-op.
pub fn initialize() -> Result<(), CryptoError> {
    initialize_locked(&mut state())
}

/// Tears the runtime down. Best effort: never fails, never panics.
///
/// Does nothing while claims taken with [`acquire`] are outstanding.
pub fn cleanup() {
    let mut state = state();
    if state.claims == 0 {
        cleanup_locked(&mut state);
    }
}

/// Returns whether [`initialize`] has succeeded since the last cleanup.
pub fn is_initialized() -> bool {
    state().initialized
}

/// Initializes the runtime if needed and registers one more claim on it.
///
/// Every successful call must be paired with one [`release`].
pub fn acquire() -> Result<(), CryptoError> {
    let mut state = state();
    initialize_locked(&mut state)?;
    state.claims += 1;
    tracing::debug!(claims = state.claims, "crypto runtime claim acquired");
    Ok(())
}

/// Gives back one claim. The runtime is cleaned up when the last claim
/// goes; an unpaired call is ignored.
pub fn release() {
    let mut state = state();
    if state.claims == 0 {
        return;
    }
    state.claims -= 1;
    tracing::debug!(claims = state.claims, "crypto runtime claim released");
    if state.claims == 0 {
        cleanup_locked(&mut state);
    }
}

/// Number of outstanding claims.
pub fn claims() -> usize {
    state().claims
}
