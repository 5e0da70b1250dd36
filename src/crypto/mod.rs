// SPDX-License-Identifier: GPL-3.0-only

//! Per-session keystroke cipher.
//!
//! Every literal key activation is encrypted under a session key and
//! immediately decrypted again before the character reaches the bound field.
//! The round trip is an obfuscation step, not a security boundary: the
//! AES-256-GCM key lives only for the process lifetime, is never serialized,
//! and the nonce is fixed for the whole session. Reusing a nonce like this
//! is a known weakening that is acceptable only because every token is
//! consumed immediately and never persisted or transmitted — the observable
//! token format depends on it, so it stays.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;

/// Length of the AES-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Errors from the keystroke cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The platform's crypto primitives are not accessible (no OS random
    /// source, or the cipher rejected the operation). Fatal to the
    /// literal-key path; control and modifier keys keep working.
    CryptoUnavailable,
    /// A token was malformed or not produced under this session's key and
    /// nonce. The key activation carrying it is dropped.
    DecryptionFailed,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::CryptoUnavailable => {
                write!(f, "platform crypto primitives are unavailable")
            }
            CipherError::DecryptionFailed => {
                write!(f, "token could not be authenticated or decoded")
            }
        }
    }
}

impl std::error::Error for CipherError {}

/// Authenticated symmetric cipher over a session key and fixed nonce.
///
/// Constructed once per session alongside the keyboard; regenerated only
/// when the process restarts.
#[derive(Clone)]
pub struct CipherService {
    cipher: Aes256Gcm,
    nonce: [u8; NONCE_LEN],
}

impl fmt::Debug for CipherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("CipherService").finish_non_exhaustive()
    }
}

impl CipherService {
    /// Generates a fresh session key and nonce from the OS random source.
    ///
    /// # Errors
    ///
    /// `CipherError::CryptoUnavailable` when the OS random source cannot be
    /// read.
    pub fn new() -> Result<Self, CipherError> {
        let mut key_bytes = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut key_bytes)
            .map_err(|_| CipherError::CryptoUnavailable)?;

        let mut nonce = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|_| CipherError::CryptoUnavailable)?;

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
        Ok(Self { cipher, nonce })
    }

    /// Encrypts `text` under the session key and nonce into a base64 token.
    ///
    /// # Errors
    ///
    /// `CipherError::CryptoUnavailable` when the primitive rejects the
    /// operation.
    pub fn encode(&self, text: &str) -> Result<String, CipherError> {
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&self.nonce), text.as_bytes())
            .map_err(|_| CipherError::CryptoUnavailable)?;
        Ok(BASE64.encode(ciphertext))
    }

    /// Decrypts a token produced by `encode` back into its plaintext.
    ///
    /// # Errors
    ///
    /// `CipherError::DecryptionFailed` when the token is not valid base64,
    /// fails authentication, or was produced under a different session
    /// key/nonce.
    pub fn decode(&self, token: &str) -> Result<String, CipherError> {
        let ciphertext = BASE64
            .decode(token)
            .map_err(|_| CipherError::DecryptionFailed)?;
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&self.nonce), ciphertext.as_ref())
            .map_err(|_| CipherError::DecryptionFailed)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::DecryptionFailed)
    }

    /// The encode-then-decode round trip for one keystroke, suspending at
    /// the executor like the platform crypto call it stands in for.
    pub async fn round_trip(&self, text: String) -> Result<String, CipherError> {
        let token = self.encode(&text)?;
        self.decode(&token)
    }
}

// ============================================================================
// Tests
// ============================================================================
