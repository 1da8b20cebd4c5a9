//! A small, sandboxed blob store for client-local persisted state.
//!
//! Each blob lives in one file directly under the storage root and is addressed by
//! a validated [`BlobKey`], so callers cannot reach outside the root.
//!
//! # Core Features
//!
//! - **Atomic Writes**: unique temp write + `fsync` + `rename`; readers never see torn data.
//! - **Key Validation**: names are checked before they touch the filesystem.
//! - **Self-Healing**: stale temporary files from interrupted writes are removed on open.
//!
//! ```rust
//! use concil_storage::{Storage, StorageError};
//!
//! # fn main() -> Result<(), StorageError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let storage = Storage::builder().root(tmp.path()).create(true).open()?;
//! storage.write("preferences", b"{}")?;
//! assert!(storage.exists("preferences")?);
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod key;
mod maintenance;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
pub use key::BlobKey;
