//! Key-value storage primitive
//!
//! The blog's "database" is a flat string-keyed namespace, the same shape
//! as browser local storage. Everything above this layer (content store,
//! catalog) works only through the [`Storage`] trait so the medium is
//! swappable:
//!
//! - [`MemoryStorage`] - in-process map, used by tests
//! - [`FileStorage`] - the whole namespace as one JSON object on disk,
//!   rewritten atomically on every mutation

mod error;
mod file;
mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A flat string-keyed, string-valued storage area
///
/// Keys are opaque to this layer; the content store imposes the
/// `post_<id>` / `media_library` / draft-key conventions on top.
pub trait Storage: Send {
    /// Read the value under a key, if present
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value under a key, replacing any previous value
    fn put(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn delete(&mut self, key: &str) -> StorageResult<()>;

    /// Enumerate every key in the namespace, in sorted order
    fn keys(&self) -> StorageResult<Vec<String>>;
}
