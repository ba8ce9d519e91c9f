//! Credential records stored inside a vault.
//!
//! Entries serialize to camelCase JSON in a fixed field order, which is
//! the plaintext that gets encrypted.  Absent optionals are omitted rather
//! than written as `null`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An ordered collection of credential records.
pub type Vault = Vec<VaultEntry>;

/// A single credential record.
///
/// Every field is wiped when the entry is dropped, so a decrypted vault
/// does not outlive its last owner in memory.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    /// Stable unique identifier.
    #[serde(default)]
    pub id: String,

    pub title: String,

    pub username: String,

    pub password: String,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,

    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: i64,
}

impl VaultEntry {
    /// Create a new entry with a fresh id and both timestamps set to now.
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            username: username.into(),
            password: password.into(),
            url: url.into(),
            notes: None,
            category: None,
            tags: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Replace the password and bump `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn set_password(&mut self, password: impl Into<String>) {
        let mut old = std::mem::replace(&mut self.password, password.into());
        old.zeroize();
        self.touch();
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.max(Utc::now().timestamp_millis());
    }

    /// Case-insensitive substring search over title, username, url,
    /// category and tags.  Notes and the password are never searched.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&query);

        hit(&self.title)
            || hit(&self.username)
            || hit(&self.url)
            || self.category.as_deref().is_some_and(hit)
            || self
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| hit(t)))
    }

    /// Does this entry match an id or a case-insensitive title?
    pub fn matches(&self, id_or_title: &str) -> bool {
        self.id == id_or_title || self.title.eq_ignore_ascii_case(id_or_title)
    }
}

// Hand-written so passwords never reach a log or panic message.
impl std::fmt::Debug for VaultEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .field("category", &self.category)
            .field("tags", &self.tags)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
