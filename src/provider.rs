//! The native Nightly provider surface.
//!
//! [`NightlyProvider`] is the narrow capability seam between the adapter and
//! the extension. In the browser it is implemented over the injected
//! `window.nightly.aptos` object (see `injected`); in tests over an
//! in-memory double. The adapter never touches a global binding itself.

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;

use crate::error::ProviderError;
use crate::key::AptosPublicKey;
use crate::types::{NetworkResponse, TransactionPayload};

/// Handler installed into the provider's single account-change slot.
///
/// Invoked with the raw base58 public key of the new account, or `None`
/// when the account was removed. Returns a future because the
/// removed-account path performs a full reconnect before relaying.
pub type AccountChangeHandler = Box<dyn Fn(Option<String>) -> LocalBoxFuture<'static, ()>>;

/// Capability surface of the injected Nightly extension object.
///
/// `Option` in a return position means the provider resolved with nothing,
/// as distinct from rejecting with a [`ProviderError`]. All async methods
/// suspend exactly once, on the provider's own asynchronous call; there is
/// no timeout, so a hung provider call hangs the adapter call with it.
#[async_trait(?Send)]
pub trait NightlyProvider {
    /// Establish a connection and return the connected account's key.
    ///
    /// The native method also accepts an on-disconnect callback and an
    /// eager-connect flag; the adapter passes neither.
    async fn connect(&self) -> Result<Option<AptosPublicKey>, ProviderError>;

    async fn disconnect(&self) -> Result<(), ProviderError>;

    /// Sign a transaction payload, submitting it when `submit` is set.
    async fn sign_transaction(
        &self,
        payload: &TransactionPayload,
        submit: bool,
    ) -> Result<Option<Vec<u8>>, ProviderError>;

    /// Sign a batch of payloads. Part of the native surface; not reachable
    /// through the standardized plugin operations.
    async fn sign_all_transactions(
        &self,
        payloads: &[TransactionPayload],
    ) -> Result<Option<Vec<Vec<u8>>>, ProviderError>;

    async fn sign_message(&self, message: &str) -> Result<Option<Vec<u8>>, ProviderError>;

    async fn network(&self) -> Result<Option<NetworkResponse>, ProviderError>;

    /// Current connected key, if any. A synchronous property read.
    fn public_key(&self) -> Option<AptosPublicKey>;

    /// Install the account-change handler. A synchronous slot assignment:
    /// last write wins, there is no unsubscribe.
    fn set_on_account_change(&self, handler: AccountChangeHandler);
}
