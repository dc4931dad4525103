//! Adapter behavior against a scripted in-memory provider.
//!
//! The mock shares its handler slot and call counters through `Rc` so tests
//! can fire provider-side events after the adapter has taken ownership.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use nightly_wallet_adapter::prelude::*;

/// Base58 of the 32-byte key `0x0101…01`.
const TEST_KEY_B58: &str = "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi";

#[derive(Default)]
struct MockProvider {
    connect_key: Option<AptosPublicKey>,
    connect_err: Option<&'static str>,
    connect_calls: Rc<Cell<u32>>,
    current_key: Option<AptosPublicKey>,
    disconnect_err: Option<&'static str>,
    sign_bytes: Option<Vec<u8>>,
    last_submit: Rc<Cell<Option<bool>>>,
    message_bytes: Option<Vec<u8>>,
    forwarded_message: Rc<RefCell<Option<String>>>,
    network_response: Option<NetworkResponse>,
    handler_slot: Rc<RefCell<Option<AccountChangeHandler>>>,
}

#[async_trait(?Send)]
impl NightlyProvider for MockProvider {
    async fn connect(&self) -> Result<Option<AptosPublicKey>, ProviderError> {
        self.connect_calls.set(self.connect_calls.get() + 1);
        if let Some(message) = self.connect_err {
            return Err(ProviderError::new(message));
        }
        Ok(self.connect_key.clone())
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        match self.disconnect_err {
            Some(message) => Err(ProviderError::new(message)),
            None => Ok(()),
        }
    }

    async fn sign_transaction(
        &self,
        _payload: &TransactionPayload,
        submit: bool,
    ) -> Result<Option<Vec<u8>>, ProviderError> {
        self.last_submit.set(Some(submit));
        Ok(self.sign_bytes.clone())
    }

    async fn sign_all_transactions(
        &self,
        _payloads: &[TransactionPayload],
    ) -> Result<Option<Vec<Vec<u8>>>, ProviderError> {
        Ok(None)
    }

    async fn sign_message(&self, message: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        *self.forwarded_message.borrow_mut() = Some(message.to_string());
        Ok(self.message_bytes.clone())
    }

    async fn network(&self) -> Result<Option<NetworkResponse>, ProviderError> {
        Ok(self.network_response.clone())
    }

    fn public_key(&self) -> Option<AptosPublicKey> {
        self.current_key.clone()
    }

    fn set_on_account_change(&self, handler: AccountChangeHandler) {
        *self.handler_slot.borrow_mut() = Some(handler);
    }
}

fn test_key() -> AptosPublicKey {
    AptosPublicKey::from_base58(TEST_KEY_B58).unwrap()
}

/// Invoke the provider-side handler the way the extension would.
async fn fire(slot: &Rc<RefCell<Option<AccountChangeHandler>>>, key: Option<&str>) {
    let pending = {
        let slot = slot.borrow();
        let handler = slot.as_ref().expect("no handler registered");
        handler(key.map(str::to_string))
    };
    pending.await;
}

fn collecting_callback() -> (AccountChangeCallback, Rc<RefCell<Vec<AccountInfo>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let callback: AccountChangeCallback = Box::new(move |info| sink.borrow_mut().push(info));
    (callback, seen)
}

// ─── connect / account / disconnect ──────────────────────────────────────────

#[tokio::test]
async fn test_connect_normalizes_account_identity() {
    let key = test_key();
    let wallet = NightlyWallet::new(Some(MockProvider {
        connect_key: Some(key.clone()),
        ..Default::default()
    }));

    let account = wallet.connect().await.unwrap();
    assert_eq!(account.address, key.address());
    assert_eq!(account.public_key, key.to_hex());
}

#[tokio::test]
async fn test_connect_empty_account_fails() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    let err = wallet.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::EmptyResponse(Operation::Connect)));
    assert!(err.to_string().contains("connect"));
}

#[tokio::test]
async fn test_connect_propagates_provider_rejection() {
    let wallet = NightlyWallet::new(Some(MockProvider {
        connect_err: Some("user rejected the request"),
        ..Default::default()
    }));

    match wallet.connect().await.unwrap_err() {
        WalletError::Provider { operation, source } => {
            assert_eq!(operation, Operation::Connect);
            assert_eq!(source.0, "user rejected the request");
        }
        other => panic!("expected a provider error, got {other}"),
    }
}

#[tokio::test]
async fn test_account_reads_public_key_property() {
    let key = test_key();
    let connect_calls = Rc::new(Cell::new(0));
    let wallet = NightlyWallet::new(Some(MockProvider {
        current_key: Some(key.clone()),
        connect_calls: Rc::clone(&connect_calls),
        ..Default::default()
    }));

    let account = wallet.account().await.unwrap();
    assert_eq!(account.address, key.address());
    assert_eq!(account.public_key, key.to_hex());
    // A property read, never a fresh connect.
    assert_eq!(connect_calls.get(), 0);
}

#[tokio::test]
async fn test_account_without_key_fails() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    let err = wallet.account().await.unwrap_err();
    assert!(matches!(err, WalletError::EmptyResponse(Operation::Account)));
}

#[tokio::test]
async fn test_disconnect_propagates_provider_rejection() {
    let wallet = NightlyWallet::new(Some(MockProvider {
        disconnect_err: Some("not connected"),
        ..Default::default()
    }));

    match wallet.disconnect().await.unwrap_err() {
        WalletError::Provider { operation, source } => {
            assert_eq!(operation, Operation::Disconnect);
            assert_eq!(source.0, "not connected");
        }
        other => panic!("expected a provider error, got {other}"),
    }
}

// ─── sign-and-submit ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sign_and_submit_wraps_response_as_hash() {
    let last_submit = Rc::new(Cell::new(None));
    let wallet = NightlyWallet::new(Some(MockProvider {
        sign_bytes: Some(b"0xdeadbeef".to_vec()),
        last_submit: Rc::clone(&last_submit),
        ..Default::default()
    }));

    let payload = serde_json::json!({
        "type": "entry_function_payload",
        "function": "0x1::coin::transfer",
    });
    let pending = wallet
        .sign_and_submit_transaction(&payload, None)
        .await
        .unwrap();
    assert_eq!(pending, PendingTransaction { hash: "0xdeadbeef".to_string() });
    assert_eq!(last_submit.get(), Some(true));
}

#[tokio::test]
async fn test_sign_and_submit_empty_response_fails() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    let err = wallet
        .sign_and_submit_transaction(&serde_json::json!({}), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WalletError::EmptyResponse(Operation::SignAndSubmitTransaction)
    ));
    assert!(err.to_string().contains("signAndSubmitTransaction"));
}

// ─── sign-message ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sign_message_synthesizes_full_response() {
    let forwarded = Rc::new(RefCell::new(None));
    let wallet = NightlyWallet::new(Some(MockProvider {
        message_bytes: Some(b"sig1".to_vec()),
        forwarded_message: Rc::clone(&forwarded),
        ..Default::default()
    }));

    let payload = SignMessagePayload {
        message: "hello".to_string(),
        nonce: "n1".to_string(),
    };
    let response = wallet.sign_message(&payload).await.unwrap();
    assert_eq!(
        response,
        SignMessageResponse {
            full_message: "hello".to_string(),
            message: "hello".to_string(),
            nonce: "n1".to_string(),
            prefix: "APTOS".to_string(),
            signature: "sig1".to_string(),
        }
    );
    // Only the message text crosses the boundary.
    assert_eq!(forwarded.borrow().as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_sign_message_rejects_empty_nonce() {
    let forwarded = Rc::new(RefCell::new(None));
    let wallet = NightlyWallet::new(Some(MockProvider {
        message_bytes: Some(b"sig1".to_vec()),
        forwarded_message: Rc::clone(&forwarded),
        ..Default::default()
    }));

    let payload = SignMessagePayload {
        message: "hello".to_string(),
        nonce: String::new(),
    };
    let err = wallet.sign_message(&payload).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidPayload(_)));
    // Validation happens before any provider call.
    assert!(forwarded.borrow().is_none());
}

#[tokio::test]
async fn test_sign_message_empty_response_fails() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    let payload = SignMessagePayload {
        message: "hello".to_string(),
        nonce: "n1".to_string(),
    };
    let err = wallet.sign_message(&payload).await.unwrap_err();
    assert!(matches!(err, WalletError::EmptyResponse(Operation::SignMessage)));
    assert!(err.to_string().contains("signMessage"));
}

// ─── network ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_network_lowercases_and_narrows() {
    let wallet = NightlyWallet::new(Some(MockProvider {
        network_response: Some(NetworkResponse {
            api: "x".to_string(),
            chain_id: 1,
            network: "MAINNET".to_string(),
        }),
        ..Default::default()
    }));

    let network = wallet.network().await.unwrap();
    assert_eq!(network, NetworkInfo { name: "mainnet".to_string() });
}

#[tokio::test]
async fn test_network_empty_response_fails() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    let err = wallet.network().await.unwrap_err();
    assert!(matches!(err, WalletError::EmptyResponse(Operation::Network)));
}

// ─── change subscriptions ────────────────────────────────────────────────────

#[tokio::test]
async fn test_on_network_change_is_unsupported() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    let err = wallet
        .on_network_change(Box::new(|_| {}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WalletError::Unsupported(Operation::OnNetworkChange)
    ));
}

#[tokio::test]
async fn test_account_change_with_key_decodes_without_connect() {
    let slot = Rc::new(RefCell::new(None));
    let connect_calls = Rc::new(Cell::new(0));
    let wallet = NightlyWallet::new(Some(MockProvider {
        connect_key: Some(test_key()),
        connect_calls: Rc::clone(&connect_calls),
        handler_slot: Rc::clone(&slot),
        ..Default::default()
    }));

    let (callback, seen) = collecting_callback();
    wallet.on_account_change(callback).await.unwrap();

    fire(&slot, Some("abc123")).await;

    let expected = AptosPublicKey::from_base58("abc123").unwrap();
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].address, expected.address());
    assert_eq!(seen[0].public_key, expected.to_hex());
    assert_eq!(connect_calls.get(), 0);
}

#[tokio::test]
async fn test_account_change_without_key_reconnects_once() {
    let slot = Rc::new(RefCell::new(None));
    let connect_calls = Rc::new(Cell::new(0));
    let key = test_key();
    let wallet = NightlyWallet::new(Some(MockProvider {
        connect_key: Some(key.clone()),
        connect_calls: Rc::clone(&connect_calls),
        handler_slot: Rc::clone(&slot),
        ..Default::default()
    }));

    let (callback, seen) = collecting_callback();
    wallet.on_account_change(callback).await.unwrap();

    fire(&slot, None).await;

    assert_eq!(connect_calls.get(), 1);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].address, key.address());
    assert_eq!(seen[0].public_key, key.to_hex());
}

#[tokio::test]
async fn test_account_change_registration_is_last_write_wins() {
    let slot = Rc::new(RefCell::new(None));
    let wallet = NightlyWallet::new(Some(MockProvider {
        handler_slot: Rc::clone(&slot),
        ..Default::default()
    }));

    let (first, first_seen) = collecting_callback();
    let (second, second_seen) = collecting_callback();
    wallet.on_account_change(first).await.unwrap();
    wallet.on_account_change(second).await.unwrap();

    fire(&slot, Some("abc123")).await;

    assert!(first_seen.borrow().is_empty());
    assert_eq!(second_seen.borrow().len(), 1);
}

#[tokio::test]
async fn test_account_change_empty_key_fires_nothing() {
    let slot = Rc::new(RefCell::new(None));
    let connect_calls = Rc::new(Cell::new(0));
    let wallet = NightlyWallet::new(Some(MockProvider {
        connect_key: Some(test_key()),
        connect_calls: Rc::clone(&connect_calls),
        handler_slot: Rc::clone(&slot),
        ..Default::default()
    }));

    let (callback, seen) = collecting_callback();
    wallet.on_account_change(callback).await.unwrap();

    fire(&slot, Some("")).await;

    assert!(seen.borrow().is_empty());
    assert_eq!(connect_calls.get(), 0);
}

// ─── provider absent ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_all_operations_fail_cleanly_without_provider() {
    let wallet = NightlyWallet::<MockProvider>::new(None);

    assert!(matches!(
        wallet.connect().await.unwrap_err(),
        WalletError::ProviderUnavailable
    ));
    assert!(matches!(
        wallet.account().await.unwrap_err(),
        WalletError::ProviderUnavailable
    ));
    assert!(matches!(
        wallet.disconnect().await.unwrap_err(),
        WalletError::ProviderUnavailable
    ));
    assert!(matches!(
        wallet
            .sign_and_submit_transaction(&serde_json::json!({}), None)
            .await
            .unwrap_err(),
        WalletError::ProviderUnavailable
    ));
    let payload = SignMessagePayload {
        message: "hello".to_string(),
        nonce: "n1".to_string(),
    };
    assert!(matches!(
        wallet.sign_message(&payload).await.unwrap_err(),
        WalletError::ProviderUnavailable
    ));
    assert!(matches!(
        wallet.network().await.unwrap_err(),
        WalletError::ProviderUnavailable
    ));
    assert!(matches!(
        wallet.on_account_change(Box::new(|_| {})).await.unwrap_err(),
        WalletError::ProviderUnavailable
    ));
}

// ─── metadata ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wallet_metadata() {
    let wallet = NightlyWallet::new(Some(MockProvider::default()));

    assert_eq!(wallet.name(), "Nightly");
    assert_eq!(wallet.url(), NIGHTLY_WALLET_URL);
    assert_eq!(wallet.icon(), NIGHTLY_ICON);
}
