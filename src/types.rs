//! Shapes of the standardized wallet contract, plus Nightly wire types.
//!
//! Wire types mirror what the extension actually sends (camelCase JSON);
//! the normalized types are what dApp frontends consume. Conversion is
//! one-directional, wire → normalized, and narrowing where the standardized
//! contract surfaces less than the provider returns.

use serde::{Deserialize, Serialize};

use crate::key::AptosPublicKey;

/// Chain identifier literal echoed in every sign-message response.
pub const MESSAGE_PREFIX: &str = "APTOS";

// ─── Account ─────────────────────────────────────────────────────────────────

/// Normalized connected-account identity.
///
/// Both fields are derived together from the same provider key; an identity
/// with only one of them never exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: String,
    pub public_key: String,
}

impl From<&AptosPublicKey> for AccountInfo {
    fn from(key: &AptosPublicKey) -> Self {
        Self {
            address: key.address(),
            public_key: key.to_hex(),
        }
    }
}

// ─── Network ─────────────────────────────────────────────────────────────────

/// Normalized network descriptor.
///
/// Only the lower-cased network name is surfaced; the endpoint and chain id
/// the extension also reports stay on [`NetworkResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkInfo {
    pub name: String,
}

/// Raw network response from the extension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub api: String,
    pub chain_id: u64,
    pub network: String,
}

impl From<NetworkResponse> for NetworkInfo {
    fn from(response: NetworkResponse) -> Self {
        Self {
            name: response.network.to_lowercase(),
        }
    }
}

// ─── Transactions ────────────────────────────────────────────────────────────

/// Opaque transaction payload, forwarded to the extension untouched.
pub type TransactionPayload = serde_json::Value;

/// Submit options accepted for contract compatibility. Nightly's native
/// sign operation takes none, so they are never forwarded.
pub type TransactionOptions = serde_json::Value;

/// Result of a sign-and-submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingTransaction {
    pub hash: String,
}

// ─── Message signing ─────────────────────────────────────────────────────────

/// Sign-message request. The nonce is echoed back, never forwarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignMessagePayload {
    pub message: String,
    pub nonce: String,
}

/// Sign-message response, richer than the raw signature the extension
/// returns: message and nonce are echoed from the request, the prefix is
/// the fixed [`MESSAGE_PREFIX`] literal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageResponse {
    pub full_message: String,
    pub message: String,
    pub nonce: String,
    pub prefix: String,
    pub signature: String,
}
