//! `NightlyWallet` — the bridge from the standardized plugin contract to
//! the native Nightly provider.
//!
//! Each operation delegates to the provider, then normalizes the result or
//! error at the boundary. The adapter keeps no wallet state of its own; the
//! provider owns connection state, and the only registration the adapter
//! performs is the single account-change handler slot.

use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;

use crate::error::{Operation, WalletError};
use crate::icon::NIGHTLY_ICON;
use crate::key::AptosPublicKey;
use crate::plugin::{AccountChangeCallback, NetworkChangeCallback, WalletPlugin};
use crate::provider::NightlyProvider;
use crate::types::{
    AccountInfo, NetworkInfo, PendingTransaction, SignMessagePayload, SignMessageResponse,
    TransactionOptions, TransactionPayload, MESSAGE_PREFIX,
};

/// Wallet display name reported through the standardized metadata.
pub const NIGHTLY_WALLET_NAME: &str = "Nightly";

/// Chrome Web Store entry for the extension.
pub const NIGHTLY_WALLET_URL: &str =
    "https://chrome.google.com/webstore/detail/nightly/fiikommddbeccaoicoejoniammnalkfa";

/// Adapter over an injected Nightly provider.
///
/// The provider reference is fixed at construction and never reassigned.
/// `None` models the extension being absent: the adapter still constructs,
/// and every operation fails with [`WalletError::ProviderUnavailable`].
pub struct NightlyWallet<P> {
    provider: Option<Arc<P>>,
}

impl<P> NightlyWallet<P>
where
    P: NightlyProvider + 'static,
{
    /// Build an adapter over an already-located provider.
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider: provider.map(Arc::new),
        }
    }

    fn provider(&self) -> Result<&Arc<P>, WalletError> {
        self.provider.as_ref().ok_or(WalletError::ProviderUnavailable)
    }
}

#[cfg(feature = "wasm")]
impl NightlyWallet<crate::injected::InjectedProvider> {
    /// Locate `window.nightly.aptos` and build the adapter over it.
    pub fn from_window() -> Self {
        Self::new(crate::injected::InjectedProvider::locate())
    }
}

/// The full connect flow, shared between `connect()` and the
/// account-removal fallback inside the change handler.
async fn connect_via<P: NightlyProvider>(provider: &P) -> Result<AccountInfo, WalletError> {
    let key = provider
        .connect()
        .await
        .map_err(|source| WalletError::provider(Operation::Connect, source))?
        .ok_or(WalletError::EmptyResponse(Operation::Connect))?;
    Ok(AccountInfo::from(&key))
}

/// Signature and hash bytes come back raw from the provider; their textual
/// form is what the standardized contract carries.
fn render_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[async_trait(?Send)]
impl<P> WalletPlugin for NightlyWallet<P>
where
    P: NightlyProvider + 'static,
{
    fn name(&self) -> &'static str {
        NIGHTLY_WALLET_NAME
    }

    fn url(&self) -> &'static str {
        NIGHTLY_WALLET_URL
    }

    fn icon(&self) -> &'static str {
        NIGHTLY_ICON
    }

    async fn connect(&self) -> Result<AccountInfo, WalletError> {
        connect_via(self.provider()?.as_ref()).await
    }

    async fn account(&self) -> Result<AccountInfo, WalletError> {
        // A property read, not a fresh connect. "Never connected",
        // "disconnected" and "no key" all collapse into one failure.
        let key = self
            .provider()?
            .public_key()
            .ok_or(WalletError::EmptyResponse(Operation::Account))?;
        Ok(AccountInfo::from(&key))
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.provider()?
            .disconnect()
            .await
            .map_err(|source| WalletError::provider(Operation::Disconnect, source))
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: &TransactionPayload,
        _options: Option<&TransactionOptions>,
    ) -> Result<PendingTransaction, WalletError> {
        let response = self
            .provider()?
            .sign_transaction(payload, true)
            .await
            .map_err(|source| {
                WalletError::provider(Operation::SignAndSubmitTransaction, source)
            })?
            .ok_or(WalletError::EmptyResponse(Operation::SignAndSubmitTransaction))?;
        Ok(PendingTransaction {
            hash: render_bytes(&response),
        })
    }

    async fn sign_message(
        &self,
        payload: &SignMessagePayload,
    ) -> Result<SignMessageResponse, WalletError> {
        if payload.nonce.is_empty() {
            return Err(WalletError::InvalidPayload(
                "signMessage payload requires a nonce".to_string(),
            ));
        }
        // Only the message text crosses the boundary; nonce and prefix are
        // echoed back in the response.
        let signature = self
            .provider()?
            .sign_message(&payload.message)
            .await
            .map_err(|source| WalletError::provider(Operation::SignMessage, source))?
            .ok_or(WalletError::EmptyResponse(Operation::SignMessage))?;
        Ok(SignMessageResponse {
            full_message: payload.message.clone(),
            message: payload.message.clone(),
            nonce: payload.nonce.clone(),
            prefix: MESSAGE_PREFIX.to_string(),
            signature: render_bytes(&signature),
        })
    }

    async fn network(&self) -> Result<NetworkInfo, WalletError> {
        let response = self
            .provider()?
            .network()
            .await
            .map_err(|source| WalletError::provider(Operation::Network, source))?
            .ok_or(WalletError::EmptyResponse(Operation::Network))?;
        Ok(NetworkInfo::from(response))
    }

    async fn on_network_change(
        &self,
        _callback: NetworkChangeCallback,
    ) -> Result<(), WalletError> {
        // The extension exposes no network-change event.
        Err(WalletError::Unsupported(Operation::OnNetworkChange))
    }

    async fn on_account_change(
        &self,
        callback: AccountChangeCallback,
    ) -> Result<(), WalletError> {
        let provider = Arc::clone(self.provider()?);
        let callback: Rc<AccountChangeCallback> = Rc::new(callback);

        let slot_provider = Arc::clone(&provider);
        provider.set_on_account_change(Box::new(move |raw_key| {
            let provider = Arc::clone(&slot_provider);
            let callback = Rc::clone(&callback);
            async move {
                match raw_key {
                    Some(raw) if !raw.is_empty() => match AptosPublicKey::from_base58(&raw) {
                        Ok(key) => (*callback)(AccountInfo::from(&key)),
                        Err(err) => {
                            tracing::error!("account change carried an undecodable key: {err}");
                        }
                    },
                    Some(_) => {
                        tracing::error!("account change reported an empty public key");
                    }
                    // No key means the account was removed; reconnect and
                    // relay whatever identity the provider yields.
                    None => match connect_via(provider.as_ref()).await {
                        Ok(account) => (*callback)(account),
                        Err(err) => {
                            tracing::error!("reconnect after account removal failed: {err}");
                        }
                    },
                }
            }
            .boxed_local()
        }));
        Ok(())
    }
}
