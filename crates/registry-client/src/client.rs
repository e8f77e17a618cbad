//! Transaction preparation and submission against an [`RpcClient`].

use sol_tx::{system, Keypair, PublicKey, Signature, TransactionBuilder};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::RegistryError;
use crate::handle::{CryptoRuntime, OwnedHandle};
use crate::rpc::{RpcClient, RpcError};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub signature: Signature,
    /// Attempts made, including the successful one.
    pub attempts: u32,
}

/// Builds, signs and forwards registry transactions.
///
/// Holds a claim on the crypto runtime for its whole lifetime.
pub struct RegistryClient<R: RpcClient> {
    config: ClientConfig,
    rpc: R,
    _runtime: OwnedHandle<CryptoRuntime>,
}

impl<R: RpcClient> RegistryClient<R> {
    pub fn new(config: ClientConfig, rpc: R) -> Result<Self, RegistryError> {
        config.validate()?;
        let runtime = CryptoRuntime::acquire()?;
        info!(
            cluster = %config.cluster,
            rpc_url = config.rpc_url(),
            commitment = %config.commitment,
            "registry client ready"
        );
        Ok(Self {
            config,
            rpc,
            _runtime: runtime,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rpc_url(&self) -> &str {
        self.config.rpc_url()
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// A fresh builder with `fee_payer` already set.
    pub fn transaction_builder(&self, fee_payer: PublicKey) -> TransactionBuilder {
        let mut builder = TransactionBuilder::new();
        builder.set_fee_payer(fee_payer);
        builder
    }

    /// Fetch a recent blockhash into `builder` if it has none yet.
    pub fn prepare(&self, builder: &mut TransactionBuilder) -> Result<(), RegistryError> {
        if builder.recent_blockhash().is_none() {
            let blockhash = self.rpc.get_latest_blockhash()?;
            debug!(%blockhash, "fetched recent blockhash");
            builder.set_recent_blockhash(blockhash);
        }
        Ok(())
    }

    /// Prepare `builder`, then sign with the 64-byte keypair material.
    pub fn build_and_sign(
        &self,
        builder: &mut TransactionBuilder,
        keypair_bytes: &[u8],
    ) -> Result<Vec<u8>, RegistryError> {
        self.prepare(builder)?;
        Ok(builder.build_and_sign(keypair_bytes)?)
    }

    /// Forward signed wire bytes unchanged.
    ///
    /// Transport errors and timeouts are retried up to `max_retries` extra
    /// times when retries are enabled; rejections are returned at once.
    pub fn submit(&self, wire: &[u8]) -> Result<SubmitOutcome, RegistryError> {
        let attempts = self.config.attempts();
        let mut last_error: Option<RpcError> = None;

        for attempt in 1..=attempts {
            match self.rpc.send_transaction(wire) {
                Ok(signature) => {
                    info!(%signature, attempt, "transaction submitted");
                    return Ok(SubmitOutcome {
                        signature,
                        attempts: attempt,
                    });
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(attempt, error = %e, "submission failed, retrying");
                    last_error = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_error
            .unwrap_or_else(|| RpcError::Transport("no submission attempts made".into()))
            .into())
    }

    /// Native SOL payment from `payer` to `recipient`.
    pub fn transfer(
        &self,
        payer: &Keypair,
        recipient: &PublicKey,
        lamports: u64,
    ) -> Result<SubmitOutcome, RegistryError> {
        let payer_key = payer.pubkey();
        let mut builder = self.transaction_builder(payer_key);
        builder.push_instruction(system::transfer(&payer_key, recipient, lamports));

        let wire = self.build_and_sign(&mut builder, &payer.to_bytes())?;
        self.submit(&wire)
    }

    /// Base fee `builder` would be charged.
    pub fn estimate_fee(&self, builder: &TransactionBuilder) -> u64 {
        builder.estimate_fee()
    }
}
