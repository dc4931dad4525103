//! Unified adapter error types.

use thiserror::Error;

/// Operations of the standardized wallet-plugin contract.
///
/// Carried inside [`WalletError`] so every failure names the operation it
/// came from, using the method names dApp frontends see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Connect,
    Account,
    Disconnect,
    SignAndSubmitTransaction,
    SignMessage,
    Network,
    OnNetworkChange,
    OnAccountChange,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Account => "account",
            Self::Disconnect => "disconnect",
            Self::SignAndSubmitTransaction => "signAndSubmitTransaction",
            Self::SignMessage => "signMessage",
            Self::Network => "network",
            Self::OnNetworkChange => "onNetworkChange",
            Self::OnAccountChange => "onAccountChange",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level adapter error.
///
/// Provider-thrown values are preserved structurally in
/// [`WalletError::Provider`] rather than flattened to a message string, so
/// callers can still branch on the failing operation.
#[derive(Error, Debug)]
pub enum WalletError {
    /// The extension is not installed, or its global binding is missing.
    #[error("Nightly provider is unavailable (is the extension installed?)")]
    ProviderUnavailable,

    /// The provider resolved with nothing where a value was required.
    #[error("Nightly {0} returned an empty response")]
    EmptyResponse(Operation),

    /// A genuine capability gap of the wallet, not a transient failure.
    #[error("Nightly does not support {0}")]
    Unsupported(Operation),

    /// The caller-supplied payload failed validation before any provider call.
    #[error("Nightly invalid payload: {0}")]
    InvalidPayload(String),

    /// The provider itself rejected the call.
    #[error("Nightly {operation} failed: {source}")]
    Provider {
        operation: Operation,
        #[source]
        source: ProviderError,
    },
}

impl WalletError {
    /// Wrap a provider rejection with the operation it interrupted.
    pub fn provider(operation: Operation, source: ProviderError) -> Self {
        Self::Provider { operation, source }
    }
}

/// An error value thrown by the underlying extension provider.
///
/// Providers have no fixed error taxonomy; whatever they reject with is
/// preserved as text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Public-key decoding errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid base58 public key: {0}")]
    InvalidBase58(String),

    #[error("invalid hex public key: {0}")]
    InvalidHex(String),
}
