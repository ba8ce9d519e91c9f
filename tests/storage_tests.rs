//! Integration tests for storage, export/import, secret sources and the
//! background runner.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use titanium::crypto::kdf::MIN_MEMORY_KIB;
use titanium::crypto::KdfParams;
use titanium::errors::TitaniumError;
use titanium::secret_source::{HardwareToken, Passphrase, SecretSource};
use titanium::storage::{export_envelope, import_envelope, EnvelopeStore, FileEnvelopeStore};
use titanium::vault::{spawn_decrypt, spawn_encrypt, Envelope, VaultCodec, VaultEntry};
use zeroize::Zeroizing;

fn fast_codec() -> VaultCodec {
    VaultCodec::new(KdfParams {
        time_cost: 1,
        memory_kib: MIN_MEMORY_KIB,
        parallelism: 1,
    })
}

fn entries() -> Vec<VaultEntry> {
    vec![
        VaultEntry::new("Gmail", "user@example.com", "strongpassword123", "https://mail.google.com"),
        VaultEntry::new("GitHub", "octocat", "hunter2", "https://github.com"),
    ]
}

fn sealed_store(dir: &TempDir) -> (FileEnvelopeStore, Envelope) {
    let store = FileEnvelopeStore::new(dir.path().join(".titanium/vault.encrypted"));
    let envelope = fast_codec().encrypt(&entries(), b"master-pass").unwrap();
    store.save(&envelope).unwrap();
    (store, envelope)
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_returns_same_envelope() {
    let dir = TempDir::new().unwrap();
    let (store, envelope) = sealed_store(&dir);

    assert!(store.exists());
    assert_eq!(store.load().unwrap(), Some(envelope));
}

#[test]
fn stored_file_is_plain_envelope_json() {
    let dir = TempDir::new().unwrap();
    let (store, _) = sealed_store(&dir);

    let raw = fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for field in ["version", "salt", "iv", "data", "keyDerivationInfo"] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["keyDerivationInfo"]["type"], "argon2id");
    assert!(!raw.contains("strongpassword123"));
}

#[test]
fn load_existing_without_vault_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = FileEnvelopeStore::new(dir.path().join("missing.encrypted"));

    assert!(store.load().unwrap().is_none());
    let err = store.load_existing().unwrap_err();
    assert!(matches!(err, TitaniumError::VaultNotFound(_)));
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[test]
fn export_then_import_into_fresh_store_decrypts() {
    let dir = TempDir::new().unwrap();
    let (store, envelope) = sealed_store(&dir);
    let backup = dir.path().join("backup.json");

    export_envelope(&store, &backup).unwrap();

    let other = FileEnvelopeStore::new(dir.path().join("other/vault.encrypted"));
    let imported = import_envelope(&other, &backup).unwrap();
    assert_eq!(imported, envelope);

    let reloaded = other.load_existing().unwrap();
    let vault = fast_codec().decrypt(&reloaded, b"master-pass").unwrap();
    assert_eq!(vault, entries());
}

#[test]
fn export_with_empty_store_fails() {
    let dir = TempDir::new().unwrap();
    let store = FileEnvelopeStore::new(dir.path().join("vault.encrypted"));

    let err = export_envelope(&store, &dir.path().join("out.json")).unwrap_err();
    assert!(matches!(err, TitaniumError::Storage(_)));
}

#[test]
fn import_rejects_future_version_and_keeps_existing_vault() {
    let dir = TempDir::new().unwrap();
    let (store, envelope) = sealed_store(&dir);

    let mut future = envelope.clone();
    future.version = 2;
    let src = dir.path().join("future.json");
    fs::write(&src, future.to_json().unwrap()).unwrap();

    let err = import_envelope(&store, &src).unwrap_err();
    assert!(matches!(err, TitaniumError::UnsupportedVersion(2)));
    assert_eq!(store.load_existing().unwrap(), envelope);
}

#[test]
fn import_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let store = FileEnvelopeStore::new(dir.path().join("vault.encrypted"));
    let src = dir.path().join("garbage.json");
    fs::write(&src, "this is not an envelope").unwrap();

    let err = import_envelope(&store, &src).unwrap_err();
    assert!(matches!(err, TitaniumError::Encoding(_)));
    assert!(!store.exists());
}

#[test]
fn import_rejects_truncated_nonce() {
    let dir = TempDir::new().unwrap();
    let (store, envelope) = sealed_store(&dir);

    let mut broken = envelope;
    broken.nonce.truncate(8);
    let src = dir.path().join("broken.json");
    fs::write(&src, broken.to_json().unwrap()).unwrap();

    let err = import_envelope(&store, &src).unwrap_err();
    assert!(matches!(err, TitaniumError::Encoding(_)));
}

// ---------------------------------------------------------------------------
// Secret sources
// ---------------------------------------------------------------------------

#[test]
fn hardware_token_file_unlocks_what_it_sealed() {
    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("token.bin");
    fs::write(&token_path, b"assertion-from-authenticator").unwrap();

    let source = HardwareToken::from_file(&token_path).unwrap();
    let secret = source.secret().unwrap();
    assert_eq!(secret.len(), 32);

    let codec = fast_codec();
    let envelope = codec.encrypt(&entries(), &secret).unwrap();
    let again = HardwareToken::from_file(&token_path).unwrap().secret().unwrap();
    assert_eq!(codec.decrypt(&envelope, &again).unwrap(), entries());
}

#[test]
fn passphrase_cannot_open_hardware_sealed_vault() {
    let token = HardwareToken::new(Zeroizing::new(b"token".to_vec()));
    let codec = fast_codec();
    let envelope = codec.encrypt(&entries(), &token.secret().unwrap()).unwrap();

    let passphrase = Passphrase::new(Zeroizing::new("token".to_string()));
    let err = codec
        .decrypt(&envelope, &passphrase.secret().unwrap())
        .unwrap_err();
    assert!(matches!(err, TitaniumError::Authentication));
}

// ---------------------------------------------------------------------------
// Background runner
// ---------------------------------------------------------------------------

#[test]
fn background_encrypt_then_decrypt() {
    let codec = Arc::new(fast_codec());
    let secret = || Zeroizing::new(b"bg-secret".to_vec());

    let envelope = spawn_encrypt(Arc::clone(&codec), entries(), secret())
        .unwrap()
        .wait()
        .unwrap();

    let vault = spawn_decrypt(codec, envelope, secret())
        .unwrap()
        .wait()
        .unwrap();
    assert_eq!(vault, entries());
}

#[test]
fn background_decrypt_reports_authentication_failure() {
    let codec = Arc::new(fast_codec());
    let envelope = codec.encrypt(&entries(), b"right").unwrap();

    let err = spawn_decrypt(codec, envelope, Zeroizing::new(b"wrong".to_vec()))
        .unwrap()
        .wait()
        .unwrap_err();
    assert!(matches!(err, TitaniumError::Authentication));
}

#[test]
fn try_take_eventually_yields_result() {
    let codec = Arc::new(fast_codec());
    let mut pending =
        spawn_encrypt(codec, entries(), Zeroizing::new(b"poll".to_vec())).unwrap();

    let result = loop {
        if let Some(result) = pending.try_take() {
            break result;
        }
        std::thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(result.unwrap().version, 1);
}

#[test]
fn dropping_pending_operation_does_not_block_or_panic() {
    let codec = Arc::new(fast_codec());
    let pending = spawn_encrypt(
        Arc::clone(&codec),
        entries(),
        Zeroizing::new(b"abandoned".to_vec()),
    )
    .unwrap();
    drop(pending);

    // The codec is still usable while the abandoned worker finishes.
    let envelope = codec.encrypt(&entries(), b"still-works").unwrap();
    assert_eq!(codec.decrypt(&envelope, b"still-works").unwrap(), entries());
}
