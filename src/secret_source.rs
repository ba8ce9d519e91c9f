//! Secret-source port.
//!
//! The engine accepts "some bytes" as its secret.  Where they come from is
//! up to the caller: a typed passphrase, or a token handed over by an
//! external hardware-authentication ceremony.  Sources never hand out a
//! pre-derived key; everything still goes through the KDF.

use std::path::Path;

use zeroize::Zeroizing;

use crate::crypto::hardware::{derive_secret_from_hardware_token, load_hardware_token};
use crate::errors::Result;

/// Something that can produce the secret fed to key derivation.
pub trait SecretSource {
    fn secret(&self) -> Result<Zeroizing<Vec<u8>>>;
}

/// A UTF-8 master password.
pub struct Passphrase(Zeroizing<String>);

impl Passphrase {
    pub fn new(password: Zeroizing<String>) -> Self {
        Self(password)
    }
}

impl SecretSource for Passphrase {
    fn secret(&self) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.0.as_bytes().to_vec()))
    }
}

/// An opaque token from a hardware authenticator, hashed to 32 bytes.
pub struct HardwareToken(Zeroizing<Vec<u8>>);

impl HardwareToken {
    pub fn new(token: Zeroizing<Vec<u8>>) -> Self {
        Self(token)
    }

    /// Read the token from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        load_hardware_token(path).map(Self)
    }
}

impl SecretSource for HardwareToken {
    fn secret(&self) -> Result<Zeroizing<Vec<u8>>> {
        let hashed = derive_secret_from_hardware_token(&self.0);
        Ok(Zeroizing::new(hashed.to_vec()))
    }
}
