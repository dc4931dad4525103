//! Binding to the injected `window.nightly.aptos` provider object.
//!
//! The extension owns the object and all wallet state; this module only
//! shapes calls across the JS boundary:
//!
//! - methods are resolved by name through `js_sys::Reflect` and awaited as
//!   promises via `wasm-bindgen-futures`
//! - rejections are flattened to readable text before becoming
//!   [`ProviderError`]s
//! - the account-change `Closure` is kept alive in a `RefCell` slot and
//!   dropped when a new registration replaces it

use std::cell::RefCell;

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::ProviderError;
use crate::key::AptosPublicKey;
use crate::provider::{AccountChangeHandler, NightlyProvider};
use crate::types::{NetworkResponse, TransactionPayload};

/// Non-owning handle to the injected extension object, valid for the page
/// session.
pub struct InjectedProvider {
    inner: JsValue,
    on_account_change: RefCell<Option<Closure<dyn FnMut(JsValue)>>>,
}

impl InjectedProvider {
    /// Read `window.nightly.aptos`. `None` when the extension is not
    /// installed or the page has no window.
    pub fn locate() -> Option<Self> {
        let window = web_sys::window()?;
        let nightly = get_defined(window.as_ref(), "nightly")?;
        let aptos = get_defined(&nightly, "aptos")?;
        Some(Self {
            inner: aptos,
            on_account_change: RefCell::new(None),
        })
    }

    fn method(&self, name: &str) -> Result<Function, ProviderError> {
        Reflect::get(&self.inner, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| ProviderError::new(format!("provider method {name} is missing")))
    }

    /// Call a provider method and await its promise.
    async fn invoke(&self, name: &str, args: &Array) -> Result<JsValue, ProviderError> {
        let method = self.method(name)?;
        let result = method
            .apply(&self.inner, args)
            .map_err(|e| ProviderError::new(js_error_text(&e)))?;
        JsFuture::from(Promise::resolve(&result))
            .await
            .map_err(|e| ProviderError::new(js_error_text(&e)))
    }
}

#[async_trait(?Send)]
impl NightlyProvider for InjectedProvider {
    async fn connect(&self) -> Result<Option<AptosPublicKey>, ProviderError> {
        let value = self.invoke("connect", &Array::new()).await?;
        key_from_account_object(&value)
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.invoke("disconnect", &Array::new()).await?;
        Ok(())
    }

    async fn sign_transaction(
        &self,
        payload: &TransactionPayload,
        submit: bool,
    ) -> Result<Option<Vec<u8>>, ProviderError> {
        let args = Array::new();
        args.push(&payload_to_js(payload)?);
        args.push(&JsValue::from_bool(submit));
        let value = self.invoke("signTransaction", &args).await?;
        bytes_from_js(value)
    }

    async fn sign_all_transactions(
        &self,
        payloads: &[TransactionPayload],
    ) -> Result<Option<Vec<Vec<u8>>>, ProviderError> {
        let batch = Array::new();
        for payload in payloads {
            batch.push(&payload_to_js(payload)?);
        }
        let args = Array::new();
        args.push(&batch);
        let value = self.invoke("signAllTransactions", &args).await?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        if !Array::is_array(&value) {
            return Err(ProviderError::new(
                "signAllTransactions did not return an array",
            ));
        }
        let entries = Array::from(&value);
        let mut signed = Vec::with_capacity(entries.length() as usize);
        for entry in entries.iter() {
            match bytes_from_js(entry)? {
                Some(bytes) => signed.push(bytes),
                None => {
                    return Err(ProviderError::new(
                        "signAllTransactions returned an empty entry",
                    ))
                }
            }
        }
        Ok(Some(signed))
    }

    async fn sign_message(&self, message: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        let args = Array::new();
        args.push(&JsValue::from_str(message));
        let value = self.invoke("signMessage", &args).await?;
        bytes_from_js(value)
    }

    async fn network(&self) -> Result<Option<NetworkResponse>, ProviderError> {
        let value = self.invoke("network", &Array::new()).await?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        let network = Reflect::get(&value, &JsValue::from_str("network"))
            .ok()
            .and_then(|v| v.as_string())
            .ok_or_else(|| ProviderError::new("network response carries no network name"))?;
        let api = Reflect::get(&value, &JsValue::from_str("api"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let chain_id = Reflect::get(&value, &JsValue::from_str("chainId"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or_default() as u64;
        Ok(Some(NetworkResponse {
            api,
            chain_id,
            network,
        }))
    }

    fn public_key(&self) -> Option<AptosPublicKey> {
        let value = Reflect::get(&self.inner, &JsValue::from_str("publicKey")).ok()?;
        match key_from_account_object(&value) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!("could not read provider publicKey: {err}");
                None
            }
        }
    }

    fn set_on_account_change(&self, handler: AccountChangeHandler) {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
            // Undefined or null signals account removal; the handler's
            // fallback path is async, so it runs as its own task.
            wasm_bindgen_futures::spawn_local(handler(raw.as_string()));
        });
        if Reflect::set(
            &self.inner,
            &JsValue::from_str("onAccountChange"),
            closure.as_ref(),
        )
        .is_err()
        {
            tracing::error!("failed to install onAccountChange handler on the provider");
        }
        // The provider slot was just overwritten, so the previous closure
        // can no longer be called; replacing it here drops it.
        *self.on_account_change.borrow_mut() = Some(closure);
    }
}

// ─── JS value coercion ───────────────────────────────────────────────────────

fn get_defined(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn payload_to_js(payload: &TransactionPayload) -> Result<JsValue, ProviderError> {
    js_sys::JSON::parse(&payload.to_string())
        .map_err(|e| ProviderError::new(js_error_text(&e)))
}

/// Native account objects expose the key through an `asString()` accessor
/// returning `0x`-hex.
fn key_from_account_object(value: &JsValue) -> Result<Option<AptosPublicKey>, ProviderError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let as_string = Reflect::get(value, &JsValue::from_str("asString"))
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| ProviderError::new("account object has no asString accessor"))?;
    let hex = as_string
        .call0(value)
        .map_err(|e| ProviderError::new(js_error_text(&e)))?
        .as_string()
        .ok_or_else(|| ProviderError::new("account asString() did not return a string"))?;
    AptosPublicKey::from_hex(&hex)
        .map(Some)
        .map_err(|e| ProviderError::new(e.to_string()))
}

/// Coerce a signature-ish provider result into bytes.
///
/// The extension resolves with a `Uint8Array` for plain signing, a pending
/// transaction object (with a `hash` field) for submits, and occasionally a
/// bare string.
fn bytes_from_js(value: JsValue) -> Result<Option<Vec<u8>>, ProviderError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    if let Some(array) = value.dyn_ref::<Uint8Array>() {
        return Ok(Some(array.to_vec()));
    }
    if let Some(hash) = Reflect::get(&value, &JsValue::from_str("hash"))
        .ok()
        .and_then(|v| v.as_string())
    {
        return Ok(Some(hash.into_bytes()));
    }
    if let Some(text) = value.as_string() {
        return Ok(Some(text.into_bytes()));
    }
    Err(ProviderError::new("unexpected signing response from provider"))
}

fn js_error_text(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        let name = String::from(error.name());
        let message = String::from(error.message());
        if message.is_empty() {
            return name;
        }
        return format!("{name}: {message}");
    }

    if let Some(text) = err.as_string() {
        if !text.is_empty() {
            return text;
        }
    }

    if let Ok(json) = js_sys::JSON::stringify(err) {
        let text = String::from(json);
        if !text.is_empty() && text != "null" && text != "undefined" {
            return text;
        }
    }

    "unknown provider error".to_string()
}
