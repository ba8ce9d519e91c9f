//! Run encrypt / decrypt off the caller's thread.
//!
//! Key derivation takes on the order of a second by design, so interactive
//! callers hand the work to a worker thread and collect the result later.
//!
//! Cancellation is fire-and-forget: dropping a `PendingOperation` does not
//! interrupt the KDF.  The worker runs to completion, fails to deliver, and
//! its result is dropped on the worker thread.  Key material is wiped by
//! the codec itself and decrypted entries wipe themselves on drop.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::debug;
use zeroize::Zeroizing;

use super::codec::VaultCodec;
use super::entry::{Vault, VaultEntry};
use super::envelope::Envelope;
use crate::crypto::{AeadCipher, KeyDerivation};
use crate::errors::{Result, TitaniumError};

/// Handle to an encrypt or decrypt running on a worker thread.
pub struct PendingOperation<T> {
    receiver: Receiver<Result<T>>,
}

impl<T> PendingOperation<T> {
    /// Block until the operation finishes.
    pub fn wait(self) -> Result<T> {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(worker_lost()))
    }

    /// Return the result if it is ready, without blocking.
    pub fn try_take(&mut self) -> Option<Result<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost())),
        }
    }
}

fn worker_lost() -> TitaniumError {
    TitaniumError::CommandFailed("vault worker stopped without a result".into())
}

fn spawn<T, F>(label: &'static str, job: F) -> Result<PendingOperation<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (sender, receiver) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name(format!("titanium-{label}"))
        .spawn(move || {
            let result = job();
            if sender.send(result).is_err() {
                debug!(operation = label, "caller went away, discarding result");
            }
        })?;
    Ok(PendingOperation { receiver })
}

/// Encrypt `vault` on a worker thread.
pub fn spawn_encrypt<K, C>(
    codec: Arc<VaultCodec<K, C>>,
    vault: Vec<VaultEntry>,
    secret: Zeroizing<Vec<u8>>,
) -> Result<PendingOperation<Envelope>>
where
    K: KeyDerivation + 'static,
    C: AeadCipher + 'static,
{
    spawn("encrypt", move || codec.encrypt(&vault, &secret))
}

/// Decrypt `envelope` on a worker thread.
pub fn spawn_decrypt<K, C>(
    codec: Arc<VaultCodec<K, C>>,
    envelope: Envelope,
    secret: Zeroizing<Vec<u8>>,
) -> Result<PendingOperation<Vault>>
where
    K: KeyDerivation + 'static,
    C: AeadCipher + 'static,
{
    spawn("decrypt", move || codec.decrypt(&envelope, &secret))
}
