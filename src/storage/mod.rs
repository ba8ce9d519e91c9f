//! Storage port for encrypted envelopes.
//!
//! The engine never touches the filesystem.  Whatever persists envelopes
//! implements `EnvelopeStore`; the CLI uses `FileEnvelopeStore`.  Export
//! and import move envelopes between a store and a standalone file and
//! never decrypt anything.

pub mod file;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::{Result, TitaniumError};
use crate::vault::Envelope;

pub use file::FileEnvelopeStore;

/// Somewhere an envelope can be saved and loaded.
pub trait EnvelopeStore {
    /// Load the stored envelope, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Envelope>>;

    /// Replace the stored envelope.
    fn save(&self, envelope: &Envelope) -> Result<()>;
}

/// Write the stored envelope to `dest` as JSON.
pub fn export_envelope(store: &dyn EnvelopeStore, dest: &Path) -> Result<()> {
    let envelope = store
        .load()?
        .ok_or_else(|| TitaniumError::Storage("no vault to export".into()))?;

    fs::write(dest, envelope.to_json()?)
        .map_err(|e| TitaniumError::Storage(format!("failed to write export file: {e}")))?;

    info!(dest = %dest.display(), "envelope exported");
    Ok(())
}

/// Read an envelope file from `src`, validate it, and store it.
///
/// Validation is structural only (version, hex encoding, field lengths);
/// the secret is not needed.  Returns the imported envelope.
pub fn import_envelope(store: &dyn EnvelopeStore, src: &Path) -> Result<Envelope> {
    let contents = fs::read_to_string(src)
        .map_err(|e| TitaniumError::Storage(format!("failed to read import file: {e}")))?;

    let envelope = Envelope::from_json(&contents)?;
    envelope.validate()?;
    store.save(&envelope)?;

    info!(src = %src.display(), "envelope imported");
    Ok(envelope)
}
