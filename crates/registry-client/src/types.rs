//! Closed enumerations exchanged with the registry programs and the RPC node.
//!
//! Every enum has a total, bidirectional string table. Parsing an unknown
//! string is an error; nothing falls back to a default variant.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A string that is not in an enum's table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} string: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(D::Error::custom)
            }
        }
    };
}

string_enum! {
    /// Solana cluster to connect to.
    Cluster, "cluster" {
        Devnet => "devnet",
        Testnet => "testnet",
        MainnetBeta => "mainnet-beta",
    }
}

impl Cluster {
    /// Public RPC endpoint for this cluster.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Cluster::MainnetBeta)
    }
}

string_enum! {
    /// Commitment level of a submitted transaction.
    ConfirmationStatus, "confirmation status" {
        Processed => "processed",
        Confirmed => "confirmed",
        Finalized => "finalized",
    }
}

string_enum! {
    AgentCapability, "agent capability" {
        TextGeneration => "TextGeneration",
        ImageGeneration => "ImageGeneration",
        CodeGeneration => "CodeGeneration",
        DataAnalysis => "DataAnalysis",
        WebSearch => "WebSearch",
        Custom => "Custom",
    }
}

string_enum! {
    PricingModel, "pricing model" {
        PerRequest => "PerRequest",
        PerToken => "PerToken",
        Subscription => "Subscription",
        Free => "Free",
    }
}

string_enum! {
    /// Transport an MCP server is reachable over.
    McpProtocol, "protocol" {
        Http => "Http",
        WebSocket => "WebSocket",
        Stdio => "Stdio",
        Custom => "Custom",
    }
}

impl McpProtocol {
    /// Check that `endpoint` is usable with this transport.
    ///
    /// Http needs an `http://` or `https://` URL, WebSocket a `ws://` or
    /// `wss://` one. Stdio and Custom accept any non-empty string.
    pub fn validate_endpoint(&self, endpoint: &str) -> Result<(), EndpointError> {
        if endpoint.is_empty() {
            return Err(EndpointError::Empty);
        }
        let allowed: &[&str] = match self {
            McpProtocol::Http => &["http://", "https://"],
            McpProtocol::WebSocket => &["ws://", "wss://"],
            McpProtocol::Stdio | McpProtocol::Custom => return Ok(()),
        };
        if allowed.iter().any(|scheme| endpoint.starts_with(scheme)) {
            Ok(())
        } else {
            Err(EndpointError::SchemeMismatch {
                protocol: *self,
                endpoint: endpoint.to_string(),
            })
        }
    }
}

/// Why an endpoint was rejected for a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("endpoint cannot be empty")]
    Empty,

    #[error("{protocol} endpoint has the wrong scheme: {endpoint}")]
    SchemeMismatch {
        protocol: McpProtocol,
        endpoint: String,
    },
}

string_enum! {
    McpCapability, "MCP capability" {
        Resources => "Resources",
        Tools => "Tools",
        Prompts => "Prompts",
        Sampling => "Sampling",
        Logging => "Logging",
        Custom => "Custom",
    }
}

string_enum! {
    PaymentMethod, "payment method" {
        Sol => "Sol",
        SvmaiToken => "SvmaiToken",
        Usdc => "Usdc",
        Custom => "Custom",
    }
}

string_enum! {
    /// How a consumer pays for agent or server usage.
    PaymentType, "payment type" {
        Prepay => "Prepay",
        PayAsYouGo => "PayAsYouGo",
        Subscription => "Subscription",
        Stream => "Stream",
    }
}

string_enum! {
    PaymentStatus, "payment status" {
        Pending => "Pending",
        Completed => "Completed",
        Failed => "Failed",
        Refunded => "Refunded",
        Expired => "Expired",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_is_total<T>(all: &[T])
    where
        T: Copy + PartialEq + fmt::Debug + fmt::Display + FromStr<Err = ParseEnumError>,
    {
        for value in all {
            let text = value.to_string();
            assert_eq!(text.parse::<T>().unwrap(), *value);
        }
        // Distinct strings.
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.to_string(), b.to_string());
            }
        }
    }

    #[test]
    fn every_table_roundtrips() {
        assert_table_is_total(Cluster::ALL);
        assert_table_is_total(ConfirmationStatus::ALL);
        assert_table_is_total(AgentCapability::ALL);
        assert_table_is_total(PricingModel::ALL);
        assert_table_is_total(McpProtocol::ALL);
        assert_table_is_total(McpCapability::ALL);
        assert_table_is_total(PaymentMethod::ALL);
        assert_table_is_total(PaymentType::ALL);
        assert_table_is_total(PaymentStatus::ALL);
    }

    #[test]
    fn known_strings() {
        assert_eq!(Cluster::MainnetBeta.as_str(), "mainnet-beta");
        assert_eq!(ConfirmationStatus::Finalized.as_str(), "finalized");
        assert_eq!(AgentCapability::TextGeneration.as_str(), "TextGeneration");
        assert_eq!(PaymentMethod::SvmaiToken.as_str(), "SvmaiToken");
        assert_eq!(PaymentType::PayAsYouGo.as_str(), "PayAsYouGo");
        assert_eq!("Stream".parse::<PaymentType>(), Ok(PaymentType::Stream));
        assert!("Postpay".parse::<PaymentType>().is_err());
        assert_eq!(McpProtocol::WebSocket.to_string(), "WebSocket");
    }

    #[test]
    fn unknown_strings_are_errors() {
        assert_eq!(
            "Unknown".parse::<AgentCapability>(),
            Err(ParseEnumError {
                kind: "agent capability",
                value: "Unknown".into()
            })
        );
        assert!("Mainnet".parse::<Cluster>().is_err());
        // Case matters.
        assert!("textgeneration".parse::<AgentCapability>().is_err());
        assert!("".parse::<PricingModel>().is_err());
    }

    #[test]
    fn parse_error_message() {
        let err = "bogus".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.to_string(), "invalid payment method string: \"bogus\"");
    }

    #[test]
    fn cluster_urls() {
        assert_eq!(Cluster::Devnet.rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(Cluster::Testnet.rpc_url(), "https://api.testnet.solana.com");
        assert_eq!(
            Cluster::MainnetBeta.rpc_url(),
            "https://api.mainnet-beta.solana.com"
        );
        assert!(Cluster::MainnetBeta.is_mainnet());
        assert!(!Cluster::Devnet.is_mainnet());
    }

    #[test]
    fn serde_uses_table_strings() {
        let json = serde_json::to_string(&vec![McpCapability::Tools, McpCapability::Prompts]).unwrap();
        assert_eq!(json, r#"["Tools","Prompts"]"#);
        let back: Vec<McpCapability> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![McpCapability::Tools, McpCapability::Prompts]);

        assert!(serde_json::from_str::<Cluster>(r#""localnet""#).is_err());
    }

    #[test]
    fn endpoint_validation() {
        assert!(McpProtocol::Http.validate_endpoint("https://mcp.example.com").is_ok());
        assert!(McpProtocol::WebSocket.validate_endpoint("wss://mcp.example.com").is_ok());
        assert!(McpProtocol::Stdio.validate_endpoint("/usr/bin/server").is_ok());
        assert!(McpProtocol::Custom.validate_endpoint("grpc://host").is_ok());

        assert_eq!(
            McpProtocol::Stdio.validate_endpoint(""),
            Err(EndpointError::Empty)
        );
        assert!(matches!(
            McpProtocol::Http.validate_endpoint("ws://mcp.example.com"),
            Err(EndpointError::SchemeMismatch {
                protocol: McpProtocol::Http,
                ..
            })
        ));
        assert!(McpProtocol::WebSocket
            .validate_endpoint("https://mcp.example.com")
            .is_err());
    }
}
