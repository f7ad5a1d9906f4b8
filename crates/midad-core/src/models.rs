//! Data models for Midad
//!
//! Defines the core data structures: Post, Category, MediaItem, PostDraft,
//! and Session. All records serialize with camelCase field names, which is
//! the on-disk JSON layout the stored namespace uses.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Arabic month names, indexed by `month0`
const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Mint a fresh opaque post/media id from the current UTC time
pub fn fresh_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Today's date as the Arabic display string used by the public site,
/// e.g. `10 مايو 2025`
pub fn display_date_today() -> String {
    let now = Utc::now();
    format!(
        "{} {} {}",
        now.day(),
        ARABIC_MONTHS[now.month0() as usize],
        now.year()
    )
}

/// A published blog post
///
/// `id` is an opaque unique string (timestamp-derived for new posts).
/// `(category_slug, slug)` is the externally addressable key used by the
/// public site's routing. `date` is a locale display string, not a
/// sortable timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier, stable for the post's lifetime
    pub id: String,
    /// Post title
    pub title: String,
    /// Short summary shown in listings; stands in for the body when
    /// `content` is absent
    pub excerpt: String,
    /// Optional rich HTML body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Locale-formatted display date
    pub date: String,
    /// Category display name
    pub category: String,
    /// Stable category identifier used for grouping and routing
    pub category_slug: String,
    /// URL-safe identifier, unique within a category
    pub slug: String,
    /// Cover image URL
    pub cover_image: String,
    /// Ordered tag list
    pub tags: Vec<String>,
    /// Optional pointer to an externally hosted content fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_file: Option<String>,
}

impl Post {
    /// Create a new post with a fresh id, today's display date, and a
    /// slug derived from the title
    pub fn new(
        title: impl Into<String>,
        excerpt: impl Into<String>,
        category: impl Into<String>,
        category_slug: impl Into<String>,
        cover_image: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let id = fresh_id();
        let slug = slug_for(&title, &id);
        Self {
            id,
            title,
            excerpt: excerpt.into(),
            content: None,
            date: display_date_today(),
            category: category.into(),
            category_slug: category_slug.into(),
            slug,
            cover_image: cover_image.into(),
            tags: Vec::new(),
            html_file: None,
        }
    }

    /// Set the rich HTML body
    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content.filter(|c| !c.is_empty());
    }

    /// Set all tags (replacing existing)
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Parse a comma-separated tag string the way the admin form does
    pub fn set_tags_from_str(&mut self, tags: &str) {
        self.tags = tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    /// The displayable body: the HTML content when present, otherwise
    /// the excerpt
    pub fn display_content(&self) -> &str {
        self.content.as_deref().unwrap_or(&self.excerpt)
    }
}

/// Derive a URL-safe slug from a title
///
/// Arabic letters transliterate to ASCII. A title with nothing to
/// transliterate (punctuation only, for example) slugifies to the empty
/// string; the post id is the fallback so `(category_slug, slug)` stays
/// addressable.
pub fn slug_for(title: &str, id: &str) -> String {
    let s = slug::slugify(title);
    if s.is_empty() {
        id.to_string()
    } else {
        s
    }
}

/// A category, derived from posts rather than stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Stable identifier used in routes
    pub slug: String,
    /// Display name
    pub name: String,
}

impl Category {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// An uploaded media file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Unique identifier
    pub id: String,
    /// Original file name
    pub name: String,
    /// File URL; uploads are stored inline as `data:` URLs
    pub url: String,
    /// Thumbnail URL (same as `url` at this scale)
    pub thumbnail_url: String,
    /// MIME type
    #[serde(rename = "type")]
    pub media_type: String,
    /// Size in bytes
    pub size: u64,
    /// Upload time, RFC 3339
    pub upload_date: String,
}

/// Auto-saved form state for an in-progress post
///
/// Carries a monotonic `version`; writers use compare-and-swap against it
/// so the autosave timer and a manual save can't silently clobber each
/// other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_slug: String,
    #[serde(default)]
    pub cover_image: String,
    /// Comma-separated, as typed in the form
    #[serde(default)]
    pub tags: String,
    /// Monotonic write counter, maintained by the store
    #[serde(default)]
    pub version: u64,
    /// Last save time, RFC 3339; maintained by the store
    #[serde(default)]
    pub saved_at: String,
}

impl PostDraft {
    /// Capture a draft from an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone().unwrap_or_default(),
            category_slug: post.category_slug.clone(),
            cover_image: post.cover_image.clone(),
            tags: post.tags.join(", "),
            version: 0,
            saved_at: String::new(),
        }
    }
}

/// A logged-in admin session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub is_admin: bool,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_admin: true,
        }
    }
}
