//! File-backed envelope store.
//!
//! The envelope is stored as a single JSON file.  Writes go to a temp file
//! in the same directory and are renamed over the target, so readers never
//! see a half-written vault.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::EnvelopeStore;
use crate::errors::{Result, TitaniumError};
use crate::vault::Envelope;

/// Stores one envelope at a fixed path.
#[derive(Debug, Clone)]
pub struct FileEnvelopeStore {
    path: PathBuf,
}

impl FileEnvelopeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the envelope file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if an envelope has been written.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the envelope, failing if none has been written.
    pub fn load_existing(&self) -> Result<Envelope> {
        self.load()?
            .ok_or_else(|| TitaniumError::VaultNotFound(self.path.clone()))
    }
}

impl EnvelopeStore for FileEnvelopeStore {
    fn load(&self) -> Result<Option<Envelope>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        debug!(path = %self.path.display(), bytes = contents.len(), "envelope loaded");
        Envelope::from_json(&contents).map(Some)
    }

    fn save(&self, envelope: &Envelope) -> Result<()> {
        let json = envelope.to_json()?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: temp file in the same directory, then rename.
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), "envelope saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KdfParams, ARGON2ID, NONCE_LEN, SALT_LEN, TAG_LEN};
    use crate::vault::KeyDerivationInfo;
    use tempfile::TempDir;

    fn sample() -> Envelope {
        Envelope::new(
            &[1; SALT_LEN],
            &[2; NONCE_LEN],
            &[3; TAG_LEN],
            KeyDerivationInfo::new(ARGON2ID, &KdfParams::default()),
        )
    }

    #[test]
    fn load_returns_none_when_missing() {
        let dir = TempDir::new().unwrap();
        let store = FileEnvelopeStore::new(dir.path().join("vault.encrypted"));
        assert!(store.load().unwrap().is_none());
        assert!(matches!(
            store.load_existing().unwrap_err(),
            TitaniumError::VaultNotFound(_)
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileEnvelopeStore::new(dir.path().join("nested").join("vault.encrypted"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileEnvelopeStore::new(dir.path().join("vault.encrypted"));
        store.save(&sample()).unwrap();
        assert!(!dir.path().join(".vault.encrypted.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileEnvelopeStore::new(dir.path().join("vault.encrypted"));
        store.save(&sample()).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
