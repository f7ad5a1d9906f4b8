//! Read model and CRUD contract over the merged view
//!
//! The `Catalog` is the main entry point. It merges the immutable seed
//! catalog with the mutable store overlay on every call - there is no
//! cached index and no invalidation logic because there is no cache.
//!
//! Precedence is uniform: a store record for a seed id replaces the seed
//! entry in every query, keeping the seed entry's position in listings.
//! Deleting a seed-originated post writes a tombstone the merge respects.
//!
//! ## Usage
//!
//! ```ignore
//! let mut catalog = Catalog::open(&config)?;
//!
//! let post = Post::new("عنوان", "مقتطف", "الذكاء الاصطناعي", "ai", cover);
//! catalog.create_post(&post)?;
//!
//! let posts = catalog.posts_by_category("ai")?;
//! ```

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::error::{BlogError, BlogResult};
use crate::models::{Category, MediaItem, Post, PostDraft, Session};
use crate::seed::{self, SeedCatalog};
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::store::ContentStore;

/// Merged view over the seed catalog and the content store
pub struct Catalog {
    store: ContentStore,
    seed: SeedCatalog,
}

impl Catalog {
    /// Open the file-backed catalog at the configured data directory
    pub fn open(config: &Config) -> Result<Self> {
        let storage =
            FileStorage::open(config.store_path()).context("Failed to open blog store")?;
        Ok(Self::new(Box::new(storage)))
    }

    /// Catalog over an explicit storage backend, with the built-in seed
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_seed(storage, SeedCatalog::builtin())
    }

    /// Catalog over an explicit storage backend and seed catalog
    pub fn with_seed(storage: Box<dyn Storage>, seed: SeedCatalog) -> Self {
        Self {
            store: ContentStore::new(storage),
            seed,
        }
    }

    /// Throwaway in-memory catalog with the built-in seed
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    // ==================== Queries ====================

    /// Every post in the merged view
    ///
    /// Seed posts first, in declaration order (overlays substituted in
    /// place, tombstoned entries dropped); then store-only posts in
    /// storage-enumeration order.
    pub fn all_posts(&self) -> BlogResult<Vec<Post>> {
        let stored = self.store.scan_posts()?;
        let mut merged = Vec::with_capacity(self.seed.posts().len() + stored.len());
        let mut overlaid: HashSet<&str> = HashSet::new();

        for seed_post in self.seed.posts() {
            if self.store.is_tombstoned(&seed_post.id)? {
                continue;
            }
            match stored.iter().find(|p| p.id == seed_post.id) {
                Some(overlay) => {
                    overlaid.insert(overlay.id.as_str());
                    merged.push(overlay.clone());
                }
                None => merged.push(seed_post.clone()),
            }
        }
        for post in &stored {
            if !overlaid.contains(post.id.as_str()) {
                merged.push(post.clone());
            }
        }
        Ok(merged)
    }

    /// Posts whose `category_slug` matches exactly, merged-view order
    pub fn posts_by_category(&self, category_slug: &str) -> BlogResult<Vec<Post>> {
        Ok(self
            .all_posts()?
            .into_iter()
            .filter(|p| p.category_slug == category_slug)
            .collect())
    }

    /// Point lookup by id; the store overlay wins over the seed entry
    pub fn post_by_id(&self, id: &str) -> BlogResult<Option<Post>> {
        if let Some(post) = self.store.read_post(id)? {
            return Ok(Some(post));
        }
        if self.store.is_tombstoned(id)? {
            return Ok(None);
        }
        Ok(self.seed.get(id).cloned())
    }

    /// Lookup by the public site's addressable key
    pub fn post_by_route(&self, category_slug: &str, slug: &str) -> BlogResult<Option<Post>> {
        Ok(self
            .all_posts()?
            .into_iter()
            .find(|p| p.category_slug == category_slug && p.slug == slug))
    }

    /// Distinct categories from the merged post list (first occurrence
    /// wins on a display-name collision), unioned with the fixed default
    /// set so empty categories still render in navigation
    pub fn all_categories(&self) -> BlogResult<Vec<Category>> {
        let mut categories: Vec<Category> = Vec::new();
        for post in self.all_posts()? {
            if !categories.iter().any(|c| c.slug == post.category_slug) {
                categories.push(Category::new(&post.category_slug, &post.category));
            }
        }
        for default in seed::default_categories() {
            if !categories.iter().any(|c| c.slug == default.slug) {
                categories.push(default);
            }
        }
        Ok(categories)
    }

    /// Number of posts in the merged view
    pub fn post_count(&self) -> BlogResult<usize> {
        Ok(self.all_posts()?.len())
    }

    // ==================== Post CRUD ====================

    /// Create a post
    ///
    /// Fails with `DuplicateId` if the id exists anywhere in the merged
    /// view - a caller cannot shadow a live seed post. Creating under a
    /// tombstoned seed id clears the tombstone.
    pub fn create_post(&mut self, post: &Post) -> BlogResult<()> {
        if self.post_by_id(&post.id)?.is_some() {
            return Err(BlogError::DuplicateId {
                id: post.id.clone(),
            });
        }
        self.store.clear_tombstone(&post.id)?;
        self.store.write_post(post)?;
        tracing::debug!(id = %post.id, slug = %post.slug, "created post");
        Ok(())
    }

    /// Replace a post record wholesale
    ///
    /// Fails with `NotFound` if the id is absent from the merged view.
    /// Updating a seed-originated post writes an overlay entry under the
    /// same id; every query then returns the overlay.
    pub fn update_post(&mut self, post: &Post) -> BlogResult<()> {
        if self.post_by_id(&post.id)?.is_none() {
            return Err(BlogError::NotFound {
                id: post.id.clone(),
            });
        }
        self.store.write_post(post)?;
        tracing::debug!(id = %post.id, "updated post");
        Ok(())
    }

    /// Delete a post by id
    ///
    /// Fails with `NotFound` if absent from the merged view. Removes the
    /// store record; a seed-originated id additionally gets a tombstone
    /// so the compiled-in entry stays hidden.
    pub fn delete_post(&mut self, id: &str) -> BlogResult<()> {
        if self.post_by_id(id)?.is_none() {
            return Err(BlogError::NotFound { id: id.to_string() });
        }
        self.store.remove_post(id)?;
        if self.seed.contains(id) {
            self.store.set_tombstone(id)?;
        }
        tracing::debug!(%id, "deleted post");
        Ok(())
    }

    // ==================== Media ====================

    pub fn all_media(&self) -> BlogResult<Vec<MediaItem>> {
        self.store.all_media()
    }

    pub fn add_media(&mut self, item: MediaItem) -> BlogResult<MediaItem> {
        self.store.add_media(item)
    }

    pub fn delete_media(&mut self, id: &str) -> BlogResult<bool> {
        self.store.delete_media(id)
    }

    pub fn upload_file(&mut self, name: &str, mime: &str, bytes: &[u8]) -> BlogResult<MediaItem> {
        self.store.upload_file(name, mime, bytes)
    }

    // ==================== Drafts ====================

    pub fn save_draft(
        &mut self,
        key: &str,
        draft: &PostDraft,
        expected_version: Option<u64>,
    ) -> BlogResult<u64> {
        self.store.save_draft(key, draft, expected_version)
    }

    pub fn load_draft(&self, key: &str) -> BlogResult<Option<PostDraft>> {
        self.store.load_draft(key)
    }

    pub fn clear_draft(&mut self, key: &str) -> BlogResult<()> {
        self.store.clear_draft(key)
    }

    pub fn list_drafts(&self) -> BlogResult<Vec<(String, PostDraft)>> {
        self.store.list_drafts()
    }

    // ==================== Session ====================

    pub fn save_session(&mut self, session: &Session) -> BlogResult<()> {
        self.store.save_session(session)
    }

    pub fn session(&mut self) -> BlogResult<Option<Session>> {
        self.store.load_session()
    }

    pub fn clear_session(&mut self) -> BlogResult<()> {
        self.store.clear_session()
    }

    // ==================== Advanced ====================

    /// The underlying content store
    pub fn store_mut(&mut self) -> &mut ContentStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::edit_draft_key;
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        Catalog::in_memory()
    }

    fn sample_post(id: &str, category_slug: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {}", id),
            excerpt: "excerpt".to_string(),
            content: Some("<p>body</p>".to_string()),
            date: "10 مايو 2025".to_string(),
            category: "الذكاء الاصطناعي".to_string(),
            category_slug: category_slug.to_string(),
            slug: format!("post-{}", id),
            cover_image: "https://example.com/cover.jpg".to_string(),
            tags: vec!["تقنية".to_string()],
            html_file: None,
        }
    }

    #[test]
    fn test_create_then_get_returns_equal_record() {
        let mut catalog = catalog();
        let post = sample_post("100", "ai");

        catalog.create_post(&post).unwrap();
        assert_eq!(catalog.post_by_id("100").unwrap().unwrap(), post);
    }

    #[test]
    fn test_create_duplicate_id_fails() {
        let mut catalog = catalog();
        let post = sample_post("100", "ai");
        catalog.create_post(&post).unwrap();

        let err = catalog.create_post(&post).unwrap_err();
        assert!(matches!(err, BlogError::DuplicateId { id } if id == "100"));
    }

    #[test]
    fn test_create_cannot_shadow_seed_id() {
        let mut catalog = catalog();
        let err = catalog.create_post(&sample_post("1", "ai")).unwrap_err();
        assert!(matches!(err, BlogError::DuplicateId { .. }));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut catalog = catalog();
        let err = catalog.update_post(&sample_post("999", "ai")).unwrap_err();
        assert!(matches!(err, BlogError::NotFound { id } if id == "999"));
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let mut catalog = catalog();
        catalog.create_post(&sample_post("100", "ai")).unwrap();

        let mut replacement = sample_post("100", "business");
        replacement.title = "عنوان جديد".to_string();
        replacement.content = None;
        replacement.tags = vec![];
        catalog.update_post(&replacement).unwrap();

        let stored = catalog.post_by_id("100").unwrap().unwrap();
        assert_eq!(stored, replacement);
        // Nothing from the prior version survives
        assert!(stored.content.is_none());
        assert!(stored.tags.is_empty());
    }

    #[test]
    fn test_update_seed_post_writes_overlay_everywhere() {
        let mut catalog = catalog();
        let mut overlay = catalog.post_by_id("1").unwrap().unwrap();
        overlay.title = "عنوان محدث".to_string();
        catalog.update_post(&overlay).unwrap();

        // Overlay wins in the point lookup
        assert_eq!(catalog.post_by_id("1").unwrap().unwrap().title, "عنوان محدث");

        // ...and uniformly in listings: one entry, the overlay, in the
        // seed position
        let all = catalog.all_posts().unwrap();
        let matching: Vec<_> = all.iter().filter(|p| p.id == "1").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title, "عنوان محدث");
        assert_eq!(all[0].id, "1");
    }

    #[test]
    fn test_delete_store_post() {
        let mut catalog = catalog();
        catalog.create_post(&sample_post("100", "ai")).unwrap();

        catalog.delete_post("100").unwrap();
        assert!(catalog.post_by_id("100").unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let mut catalog = catalog();
        let err = catalog.delete_post("999").unwrap_err();
        assert!(matches!(err, BlogError::NotFound { .. }));
    }

    #[test]
    fn test_delete_seed_post_tombstones_it() {
        let mut catalog = catalog();
        let before = catalog.all_posts().unwrap().len();

        catalog.delete_post("1").unwrap();

        assert!(catalog.post_by_id("1").unwrap().is_none());
        assert_eq!(catalog.all_posts().unwrap().len(), before - 1);
        assert!(catalog.post_by_route("ai", "ai-future-of-work").unwrap().is_none());

        // Deleting again: the id is gone from the merged view
        let err = catalog.delete_post("1").unwrap_err();
        assert!(matches!(err, BlogError::NotFound { .. }));
    }

    #[test]
    fn test_delete_overlaid_seed_post_hides_both_layers() {
        let mut catalog = catalog();
        let mut overlay = catalog.post_by_id("1").unwrap().unwrap();
        overlay.title = "overlay".to_string();
        catalog.update_post(&overlay).unwrap();

        catalog.delete_post("1").unwrap();
        assert!(catalog.post_by_id("1").unwrap().is_none());
    }

    #[test]
    fn test_create_under_tombstoned_seed_id() {
        let mut catalog = catalog();
        catalog.delete_post("1").unwrap();

        let replacement = sample_post("1", "misc");
        catalog.create_post(&replacement).unwrap();

        let found = catalog.post_by_id("1").unwrap().unwrap();
        assert_eq!(found, replacement);
        // The new record is the overlay; the seed entry stays hidden
        let all = catalog.all_posts().unwrap();
        assert_eq!(all.iter().filter(|p| p.id == "1").count(), 1);
    }

    #[test]
    fn test_posts_by_category_matches_all_posts_subset() {
        let mut catalog = catalog();
        catalog.create_post(&sample_post("100", "ai")).unwrap();
        catalog.create_post(&sample_post("101", "misc")).unwrap();

        for category in catalog.all_categories().unwrap() {
            let by_category = catalog.posts_by_category(&category.slug).unwrap();
            let expected: Vec<Post> = catalog
                .all_posts()
                .unwrap()
                .into_iter()
                .filter(|p| p.category_slug == category.slug)
                .collect();
            assert_eq!(by_category, expected);
        }
    }

    #[test]
    fn test_categories_include_defaults_when_store_empty() {
        let catalog = Catalog::with_seed(Box::new(MemoryStorage::new()), SeedCatalog::empty());

        let categories = catalog.all_categories().unwrap();
        assert_eq!(categories.len(), 5);
        let slugs: Vec<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["ai", "e-learning", "business", "humanities", "misc"]);
    }

    #[test]
    fn test_categories_first_occurrence_wins_on_name() {
        let mut catalog = catalog();
        // A store post reusing the "ai" slug with a different display name
        let mut post = sample_post("100", "ai");
        post.category = "AI (renamed)".to_string();
        catalog.create_post(&post).unwrap();

        let categories = catalog.all_categories().unwrap();
        let ai = categories.iter().find(|c| c.slug == "ai").unwrap();
        // The seed posts come first in the merged list, so their name wins
        assert_eq!(ai.name, "الذكاء الاصطناعي");
    }

    #[test]
    fn test_draft_keys_never_appear_in_listings() {
        let mut catalog = catalog();
        let draft = PostDraft {
            title: "نصف مكتوب".to_string(),
            ..Default::default()
        };
        catalog
            .save_draft(&edit_draft_key("42"), &draft, None)
            .unwrap();
        catalog.save_draft("post_draft_1747000000000", &draft, None).unwrap();

        let all = catalog.all_posts().unwrap();
        assert_eq!(all.len(), 10); // only the seed
        assert!(all.iter().all(|p| p.title != "نصف مكتوب"));
    }

    #[test]
    fn test_one_malformed_record_does_not_break_listing() {
        let mut catalog = catalog();
        catalog.create_post(&sample_post("100", "ai")).unwrap();
        catalog
            .store_mut()
            .storage_mut()
            .put("post_101", "{ broken")
            .unwrap();

        let all = catalog.all_posts().unwrap();
        assert!(all.iter().any(|p| p.id == "100"));
        assert!(all.iter().all(|p| p.id != "101"));
    }

    #[test]
    fn test_post_by_route() {
        let mut catalog = catalog();
        assert_eq!(
            catalog
                .post_by_route("misc", "writing-journey")
                .unwrap()
                .unwrap()
                .id,
            "5"
        );
        assert!(catalog.post_by_route("misc", "nope").unwrap().is_none());

        let post = sample_post("100", "misc");
        catalog.create_post(&post).unwrap();
        assert_eq!(
            catalog
                .post_by_route("misc", "post-100")
                .unwrap()
                .unwrap()
                .id,
            "100"
        );
    }

    // End-to-end scenario from the read-model contract: one seed post in
    // "ai" plus one created post, relative order preserved.
    #[test]
    fn test_seed_then_created_post_ordering() {
        let seed = SeedCatalog::from_posts(vec![{
            let mut p = sample_post("1", "ai");
            p.slug = "seeded".to_string();
            p
        }]);
        let mut catalog = Catalog::with_seed(Box::new(MemoryStorage::new()), seed);

        let all = catalog.all_posts().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "1");

        catalog.create_post(&sample_post("100", "ai")).unwrap();

        let ai_posts = catalog.posts_by_category("ai").unwrap();
        let ids: Vec<_> = ai_posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "100"]);
    }

    #[test]
    fn test_upload_scenario() {
        let mut catalog = catalog();
        let bytes = vec![7u8; 10 * 1024];

        catalog.upload_file("صورة.jpg", "image/jpeg", &bytes).unwrap();

        let media = catalog.all_media().unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].size, 10240);
        assert!(media[0].url.starts_with("data:"));
    }

    #[test]
    fn test_mutations_persist_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blog.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            let mut catalog = Catalog::new(Box::new(storage));
            catalog.create_post(&sample_post("100", "ai")).unwrap();
            catalog.delete_post("1").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        let catalog = Catalog::new(Box::new(storage));
        assert!(catalog.post_by_id("100").unwrap().is_some());
        assert!(catalog.post_by_id("1").unwrap().is_none());
        assert_eq!(catalog.post_count().unwrap(), 10); // 10 seed - 1 + 1 created
    }
}
