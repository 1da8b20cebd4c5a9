//! Access slice.
//!
//! Answers "may the signed-in user see this?" for pages, actions and menu entries:
//! - [`AccessPolicy`]: the tag predicate over the live session, with a support bypass.
//! - [`PageGuard`]: the predicate plus a one-shot redirect to the access-denied route.
//! - [`build_menu`]: the device-aware, permission-filtered projection of a [`MenuCatalog`].

pub mod catalog;
mod device;
mod error;
mod guard;
mod menu;
mod policy;

pub use crate::catalog::MenuCatalog;
pub use crate::device::DeviceClass;
pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::guard::{Navigator, PageGuard, RecordingNavigator};
pub use crate::menu::build_menu;
pub use crate::policy::{AccessDecision, AccessPolicy, decide_for, permits};
