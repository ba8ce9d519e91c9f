//! Cryptographic primitives for Titanium.
//!
//! This module provides:
//! - Argon2id key derivation behind the `KeyDerivation` trait (`kdf`)
//! - AES-256-GCM behind the `AeadCipher` trait (`encryption`)
//! - Self-wiping key material (`keys`)
//! - The hardware-token secret adapter (`hardware`)

pub mod encryption;
pub mod hardware;
pub mod kdf;
pub mod keys;

pub use encryption::{generate_nonce, AeadCipher, Aes256GcmCipher, NONCE_LEN, TAG_LEN};
pub use hardware::{derive_secret_from_hardware_token, load_hardware_token};
pub use kdf::{
    derive_key, generate_salt, legacy_encoded_key, Argon2id, KdfParams, KeyDerivation, ARGON2ID,
    SALT_LEN,
};
pub use keys::{DerivedKey, KEY_LEN};
