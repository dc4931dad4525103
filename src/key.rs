//! Aptos public keys as surfaced by the Nightly extension.

use sha3::{Digest, Sha3_256};

use crate::error::KeyError;

/// Authentication-key scheme byte for a single ed25519 signer.
const SINGLE_SIGNER_SCHEME: u8 = 0x00;

/// An ed25519 public key held as raw bytes.
///
/// Renders as `0x`-prefixed lowercase hex. The extension hands keys out
/// either as hex strings (account objects) or base58 (account-change
/// events); both decode into this one type.
///
/// Decoding is deliberately lenient about length — the provider is the
/// authority on what it emits, and the address derivation is well defined
/// for any byte string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AptosPublicKey {
    bytes: Vec<u8>,
}

impl AptosPublicKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Decode from base58, the encoding used in account-change events.
    pub fn from_base58(raw: &str) -> Result<Self, KeyError> {
        let bytes = bs58::decode(raw)
            .into_vec()
            .map_err(|e| KeyError::InvalidBase58(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Decode from hex, with or without the `0x` prefix.
    pub fn from_hex(raw: &str) -> Result<Self, KeyError> {
        let stripped = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(stripped).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The key as a `0x`-prefixed lowercase hex string — the normalized
    /// `publicKey` field of an account identity.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }

    /// Derive the account address: `sha3-256(key_bytes || scheme_byte)`,
    /// `0x`-hex encoded.
    pub fn address(&self) -> String {
        let mut hasher = Sha3_256::new();
        hasher.update(&self.bytes);
        hasher.update([SINGLE_SIGNER_SCHEME]);
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

impl std::fmt::Display for AptosPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
