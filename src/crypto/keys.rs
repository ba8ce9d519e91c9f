//! Owned key material that wipes itself.
//!
//! Every 256-bit key produced by the KDF lives inside a `DerivedKey`, so
//! whichever path an operation leaves by (success, error, or an abandoned
//! background job) the bytes are zeroed when the value is dropped.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a derived symmetric key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key that is zeroed on drop.
///
/// Deliberately not `Clone` and not `Debug`: there is exactly one copy of
/// the key and it never ends up in a log line.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    ///
    /// The caller's array is `Copy`, so it should zeroize its own copy
    /// once this returns.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// An all-zero key, to be filled in place by a KDF.
    pub(crate) fn zeroed() -> Self {
        Self {
            bytes: [0u8; KEY_LEN],
        }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroize_clears_bytes() {
        let mut key = DerivedKey::new([0x5Au8; KEY_LEN]);
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn zeroed_key_can_be_filled_in_place() {
        let mut key = DerivedKey::zeroed();
        key.as_mut_bytes()[0] = 7;
        assert_eq!(key.as_bytes()[0], 7);
    }
}
