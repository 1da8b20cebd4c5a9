//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading and the permission-tag set
//! every access decision is computed against.
//!
//! ```rust
//! use concil_kernel::domain::{Permission, User};
//! use concil_kernel::security::TagSet;
//!
//! let user = User { permissions: vec![Permission::new(1, "Clientes", 1016)], ..User::default() };
//! let tags = TagSet::from_user(&user);
//! assert!(tags.allows(1016.into()));
//! assert!(!tags.allows(1008.into()));
//! ```

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod security;

pub use concil_domain as domain;
