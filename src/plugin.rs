//! The standardized wallet-plugin contract consumed by dApp frontends.

use async_trait::async_trait;

use crate::error::WalletError;
use crate::types::{
    AccountInfo, NetworkInfo, PendingTransaction, SignMessagePayload, SignMessageResponse,
    TransactionOptions, TransactionPayload,
};

/// Callback invoked when the connected account changes.
pub type AccountChangeCallback = Box<dyn Fn(AccountInfo)>;

/// Callback invoked when the wallet's active network changes.
pub type NetworkChangeCallback = Box<dyn Fn(NetworkInfo)>;

/// The uniform operation set every wallet adapter implements, so a dApp can
/// treat wallets interchangeably.
///
/// Every operation is an independent async unit of work; no operation
/// depends on another's completion, and nothing is retried. Failures
/// surface as [`WalletError`] values, never as panics — a missing provider
/// is an `Err`, not a fault.
#[async_trait(?Send)]
pub trait WalletPlugin {
    /// Wallet display name.
    fn name(&self) -> &'static str;

    /// Where to install the wallet extension.
    fn url(&self) -> &'static str;

    /// Wallet icon as a data URI.
    fn icon(&self) -> &'static str;

    async fn connect(&self) -> Result<AccountInfo, WalletError>;

    async fn account(&self) -> Result<AccountInfo, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    async fn sign_and_submit_transaction(
        &self,
        payload: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> Result<PendingTransaction, WalletError>;

    async fn sign_message(
        &self,
        payload: &SignMessagePayload,
    ) -> Result<SignMessageResponse, WalletError>;

    async fn network(&self) -> Result<NetworkInfo, WalletError>;

    async fn on_network_change(
        &self,
        callback: NetworkChangeCallback,
    ) -> Result<(), WalletError>;

    async fn on_account_change(
        &self,
        callback: AccountChangeCallback,
    ) -> Result<(), WalletError>;
}
