//! Content store: CRUD over the flat key-value namespace
//!
//! Owns the storage backend and imposes the key conventions on it:
//!
//! - `post_<id>` - one serialized [`Post`] per key
//! - `post_tombstone_<id>` - deletion marker for a seed-originated post
//! - `post_draft_<ts>` / `post_create_draft` / `post_edit_draft_<id>` -
//!   auto-saved form state, excluded from post scans
//! - `media_library` - the whole media array under one key, rewritten in
//!   full on every mutation
//! - `blogAdminUser` - the logged-in admin session
//!
//! Contract checks against the merged seed+store view live one layer up,
//! in [`crate::catalog::Catalog`]; this layer only knows about keys.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;

use crate::error::{BlogError, BlogResult};
use crate::models::{fresh_id, MediaItem, Post, PostDraft, Session};
use crate::storage::Storage;

/// Prefix for published post records
pub const POST_PREFIX: &str = "post_";
/// Prefix for seed-post deletion markers
pub const TOMBSTONE_PREFIX: &str = "post_tombstone_";
/// Prefix for timer-stamped create drafts
pub const DRAFT_PREFIX: &str = "post_draft_";
/// Key for the unsaved create-form draft
pub const CREATE_DRAFT_KEY: &str = "post_create_draft";
/// Prefix for per-post edit drafts
pub const EDIT_DRAFT_PREFIX: &str = "post_edit_draft_";
/// Key holding the media library array
pub const MEDIA_KEY: &str = "media_library";
/// Key holding the admin session
pub const SESSION_KEY: &str = "blogAdminUser";

/// Storage key for a post id
pub fn post_key(id: &str) -> String {
    format!("{}{}", POST_PREFIX, id)
}

/// Storage key for the edit draft of a post
pub fn edit_draft_key(id: &str) -> String {
    format!("{}{}", EDIT_DRAFT_PREFIX, id)
}

fn tombstone_key(id: &str) -> String {
    format!("{}{}", TOMBSTONE_PREFIX, id)
}

/// Whether a key holds draft form state rather than a published record
pub fn is_draft_key(key: &str) -> bool {
    key == CREATE_DRAFT_KEY || key.starts_with(DRAFT_PREFIX) || key.starts_with(EDIT_DRAFT_PREFIX)
}

/// Whether a key holds a published post record
///
/// Draft and tombstone keys share the `post_` prefix and must be
/// positively excluded, or a partial form snapshot would corrupt the
/// read model.
fn is_post_key(key: &str) -> bool {
    key.starts_with(POST_PREFIX) && !is_draft_key(key) && !key.starts_with(TOMBSTONE_PREFIX)
}

/// CRUD layer over a [`Storage`] backend
pub struct ContentStore {
    storage: Box<dyn Storage>,
}

impl ContentStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    // ==================== Post records ====================

    /// Read one post record; a malformed record is a typed error here
    /// (point lookups surface corruption, scans skip it)
    pub fn read_post(&self, id: &str) -> BlogResult<Option<Post>> {
        let key = post_key(id);
        match self.storage.get(&key)? {
            Some(json) => {
                let post = serde_json::from_str(&json)
                    .map_err(|source| BlogError::Parse { key, source })?;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    /// Whether a post record exists under this id (no parse)
    pub fn has_post(&self, id: &str) -> BlogResult<bool> {
        Ok(self.storage.get(&post_key(id))?.is_some())
    }

    /// Serialize and write one post record
    pub fn write_post(&mut self, post: &Post) -> BlogResult<()> {
        let json = serde_json::to_string(post).map_err(|source| BlogError::Parse {
            key: post_key(&post.id),
            source,
        })?;
        self.storage.put(&post_key(&post.id), &json)?;
        Ok(())
    }

    /// Remove one post record
    pub fn remove_post(&mut self, id: &str) -> BlogResult<()> {
        self.storage.delete(&post_key(id))?;
        Ok(())
    }

    /// Scan every published post record, in storage-enumeration order
    ///
    /// Draft and tombstone keys are excluded by key pattern. A record that
    /// fails to parse is logged and skipped; one corrupt record must not
    /// take down the whole listing.
    pub fn scan_posts(&self) -> BlogResult<Vec<Post>> {
        let mut posts = Vec::new();
        for key in self.storage.keys()? {
            if !is_post_key(&key) {
                continue;
            }
            let Some(json) = self.storage.get(&key)? else {
                continue;
            };
            match serde_json::from_str::<Post>(&json) {
                Ok(post) => posts.push(post),
                Err(err) => {
                    tracing::warn!(%key, %err, "skipping malformed post record");
                }
            }
        }
        Ok(posts)
    }

    // ==================== Tombstones ====================

    /// Mark a seed-originated id as deleted
    pub fn set_tombstone(&mut self, id: &str) -> BlogResult<()> {
        self.storage.put(&tombstone_key(id), "1")?;
        Ok(())
    }

    /// Clear a deletion marker (a re-created id becomes visible again)
    pub fn clear_tombstone(&mut self, id: &str) -> BlogResult<()> {
        self.storage.delete(&tombstone_key(id))?;
        Ok(())
    }

    /// Whether a deletion marker exists for this id
    pub fn is_tombstoned(&self, id: &str) -> BlogResult<bool> {
        Ok(self.storage.get(&tombstone_key(id))?.is_some())
    }

    // ==================== Media library ====================

    /// The whole media library; an absent key is an empty library
    pub fn all_media(&self) -> BlogResult<Vec<MediaItem>> {
        match self.storage.get(MEDIA_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| BlogError::Parse {
                key: MEDIA_KEY.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Append one item, rewriting the whole array
    pub fn add_media(&mut self, item: MediaItem) -> BlogResult<MediaItem> {
        let mut media = self.all_media()?;
        media.push(item.clone());
        self.write_media(&media)?;
        Ok(item)
    }

    /// Remove one item by id, rewriting the whole array
    ///
    /// Returns whether an item was actually removed.
    pub fn delete_media(&mut self, id: &str) -> BlogResult<bool> {
        let media = self.all_media()?;
        let before = media.len();
        let media: Vec<MediaItem> = media.into_iter().filter(|m| m.id != id).collect();
        let removed = media.len() != before;
        if removed {
            self.write_media(&media)?;
        }
        Ok(removed)
    }

    /// Store an uploaded file inline as a `data:` URL media item
    pub fn upload_file(&mut self, name: &str, mime: &str, bytes: &[u8]) -> BlogResult<MediaItem> {
        let url = format!("data:{};base64,{}", mime, BASE64.encode(bytes));
        let item = MediaItem {
            id: fresh_id(),
            name: name.to_string(),
            // Thumbnail generation would need an image pipeline; the
            // original URL stands in at this scale
            thumbnail_url: url.clone(),
            url,
            media_type: mime.to_string(),
            size: bytes.len() as u64,
            upload_date: Utc::now().to_rfc3339(),
        };
        self.add_media(item)
    }

    fn write_media(&mut self, media: &[MediaItem]) -> BlogResult<()> {
        let json = serde_json::to_string(media).map_err(|source| BlogError::Parse {
            key: MEDIA_KEY.to_string(),
            source,
        })?;
        self.storage.put(MEDIA_KEY, &json)?;
        Ok(())
    }

    // ==================== Drafts ====================

    /// Save a draft with compare-and-swap against its version stamp
    ///
    /// The autosave timer and a manual save are two independent writers to
    /// the same key. A writer passes the version it last observed; if the
    /// stored draft has moved past it, the write fails with
    /// `DraftConflict` instead of clobbering the other writer. Passing
    /// `None` forces the write (last writer wins).
    ///
    /// Returns the new version stamp.
    pub fn save_draft(
        &mut self,
        key: &str,
        draft: &PostDraft,
        expected_version: Option<u64>,
    ) -> BlogResult<u64> {
        let current_version = self.load_draft(key)?.map(|d| d.version).unwrap_or(0);
        if let Some(expected) = expected_version {
            if expected != current_version {
                return Err(BlogError::DraftConflict {
                    key: key.to_string(),
                    expected,
                    found: current_version,
                });
            }
        }

        let mut draft = draft.clone();
        draft.version = current_version + 1;
        draft.saved_at = Utc::now().to_rfc3339();

        let json = serde_json::to_string(&draft).map_err(|source| BlogError::Parse {
            key: key.to_string(),
            source,
        })?;
        self.storage.put(key, &json)?;
        Ok(draft.version)
    }

    /// Load a draft, if one is saved under this key
    pub fn load_draft(&self, key: &str) -> BlogResult<Option<PostDraft>> {
        match self.storage.get(key)? {
            Some(json) => {
                let draft = serde_json::from_str(&json).map_err(|source| BlogError::Parse {
                    key: key.to_string(),
                    source,
                })?;
                Ok(Some(draft))
            }
            None => Ok(None),
        }
    }

    /// Remove a draft (after a successful publish, or on discard)
    pub fn clear_draft(&mut self, key: &str) -> BlogResult<()> {
        self.storage.delete(key)?;
        Ok(())
    }

    /// Every saved draft, keyed
    pub fn list_drafts(&self) -> BlogResult<Vec<(String, PostDraft)>> {
        let mut drafts = Vec::new();
        for key in self.storage.keys()? {
            if !is_draft_key(&key) {
                continue;
            }
            if let Some(draft) = self.load_draft(&key)? {
                drafts.push((key, draft));
            }
        }
        Ok(drafts)
    }

    // ==================== Session ====================

    /// Persist the logged-in admin session
    pub fn save_session(&mut self, session: &Session) -> BlogResult<()> {
        let json = serde_json::to_string(session).map_err(|source| BlogError::Parse {
            key: SESSION_KEY.to_string(),
            source,
        })?;
        self.storage.put(SESSION_KEY, &json)?;
        Ok(())
    }

    /// The logged-in session, if any
    ///
    /// A malformed session record is cleared and treated as logged out.
    pub fn load_session(&mut self) -> BlogResult<Option<Session>> {
        match self.storage.get(SESSION_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(session) => Ok(Some(session)),
                Err(err) => {
                    tracing::warn!(%err, "clearing malformed session record");
                    self.storage.delete(SESSION_KEY)?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Log out
    pub fn clear_session(&mut self) -> BlogResult<()> {
        self.storage.delete(SESSION_KEY)?;
        Ok(())
    }

    // ==================== Raw access ====================

    /// The underlying storage (for callers that need raw keys)
    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        &mut *self.storage
    }
}
