//! ACF field group import
//!
//! Turns one exported field group into a post of the target site:
//! - Reuses the post with the same title, unless duplicates are allowed
//! - Writes every structured `wp:` child of the item as post meta
//! - Previews an export without writing
//! - Imports into every active site of a network

mod import;
mod preview;

pub use import::*;
pub use preview::ImportPreview;
