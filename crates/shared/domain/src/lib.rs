//! # Domain Models
//!
//! Pure data for the permission-gated navigation core: users and their permission
//! tags, the static menu tree, and configuration sections.
//! Keep it lean: no I/O or heavy logic, only data and simple helpers.

pub mod config;
pub mod constants;
pub mod menu;
pub mod user;

pub use menu::{MenuItem, SubMenuItem};
pub use user::{Permission, Tag, User};
