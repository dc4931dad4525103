//! # Nightly Wallet Adapter
//!
//! Aptos wallet-adapter plugin for the Nightly browser extension, exposing
//! the standardized multi-wallet contract dApp frontends expect.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — account/network/message shapes, key decoding, errors,
//!    static wallet metadata (always available, WASM-safe)
//! 2. **Capability seam** — [`provider::NightlyProvider`], the narrow trait
//!    modeling the extension's native surface; injected at construction, so
//!    the adapter never reads ambient global state
//! 3. **Standardized surface** — [`plugin::WalletPlugin`] implemented by
//!    [`adapter::NightlyWallet`]
//! 4. **WASM binding** — `injected` (behind the `wasm` feature) locates
//!    `window.nightly.aptos` and implements the capability trait over it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nightly_wallet_adapter::prelude::*;
//!
//! let wallet = NightlyWallet::from_window(); // `wasm` feature
//! let account = wallet.connect().await?;
//! let network = wallet.network().await?;
//! ```
//!
//! There is no timeout or cancellation layer anywhere: a provider call that
//! never settles hangs the corresponding adapter call with it.

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified adapter error types.
pub mod error;

/// Aptos public-key decoding and address derivation.
pub mod key;

/// Standardized contract shapes and Nightly wire types.
pub mod types;

/// Static wallet metadata assets.
pub mod icon;

// ── Layer 2: Capability seam ─────────────────────────────────────────────────

/// The native Nightly provider surface.
pub mod provider;

// ── Layer 3: Standardized surface ────────────────────────────────────────────

/// The uniform wallet-plugin contract.
pub mod plugin;

/// `NightlyWallet` — the provider-to-plugin bridge.
pub mod adapter;

// ── Layer 4: WASM binding ────────────────────────────────────────────────────

/// Binding to the injected `window.nightly.aptos` object.
#[cfg(feature = "wasm")]
pub mod injected;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::adapter::{NightlyWallet, NIGHTLY_WALLET_NAME, NIGHTLY_WALLET_URL};
    pub use crate::error::{KeyError, Operation, ProviderError, WalletError};
    pub use crate::icon::NIGHTLY_ICON;
    pub use crate::key::AptosPublicKey;
    pub use crate::plugin::{AccountChangeCallback, NetworkChangeCallback, WalletPlugin};
    pub use crate::provider::{AccountChangeHandler, NightlyProvider};
    pub use crate::types::{
        AccountInfo, NetworkInfo, NetworkResponse, PendingTransaction, SignMessagePayload,
        SignMessageResponse, TransactionOptions, TransactionPayload, MESSAGE_PREFIX,
    };

    #[cfg(feature = "wasm")]
    pub use crate::injected::InjectedProvider;
}
