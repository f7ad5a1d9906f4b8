//! Midad Core Library
//!
//! This crate provides the core functionality for Midad (مداد), an
//! Arabic-first personal blog: a content store over a flat key-value
//! namespace, and a read model that merges the code-embedded seed catalog
//! with whatever the store holds.
//!
//! # Architecture
//!
//! - **Storage**: a string key-value namespace behind the `Storage` trait
//!   (in-memory for tests, a single atomically-rewritten JSON file on disk)
//! - **ContentStore**: CRUD over the namespace's key conventions
//!   (`post_<id>`, drafts, tombstones, `media_library`, the session key)
//! - **Catalog**: the merged seed+store view; every query re-derives from
//!   current storage contents
//!
//! # Quick Start
//!
//! ```text
//! let mut catalog = Catalog::open(&config)?;
//!
//! let post = Post::new("عنوان", "مقتطف", "الذكاء الاصطناعي", "ai", cover);
//! catalog.create_post(&post)?;
//!
//! let posts = catalog.posts_by_category("ai")?;
//! ```
//!
//! # Modules
//!
//! - `catalog`: merged read model and CRUD contract (main entry point)
//! - `store`: key-convention CRUD over a storage backend
//! - `storage`: the key-value primitive and its backends
//! - `models`: Post, Category, MediaItem, PostDraft, Session
//! - `seed`: the built-in post catalog and default categories
//! - `config`: application configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{BlogError, BlogResult};
pub use models::{Category, MediaItem, Post, PostDraft, Session};
pub use seed::SeedCatalog;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::ContentStore;
