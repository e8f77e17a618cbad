//! # registry-client
//!
//! Client-side plumbing for the agent and MCP-server registries: typed
//! enumerations shared with the on-chain programs, TOML configuration, an
//! RPC seam, and a client that prepares, signs (through `sol-tx`) and
//! submits transactions.

pub mod client;
pub mod config;
pub mod error;
pub mod handle;
pub mod logging;
pub mod rpc;
pub mod types;

pub use client::{RegistryClient, SubmitOutcome};
pub use config::{ClientConfig, ConfigError};
pub use error::RegistryError;
pub use handle::{CryptoRuntime, NativeResource, OwnedHandle};
pub use logging::init_logging;
pub use rpc::{RpcClient, RpcError};
pub use types::{
    AgentCapability, Cluster, ConfirmationStatus, EndpointError, McpCapability, McpProtocol,
    ParseEnumError, PaymentMethod, PaymentStatus, PaymentType, PricingModel,
};
