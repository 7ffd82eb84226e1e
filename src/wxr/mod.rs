//! WordPress eXtended RSS (WXR) reading
//!
//! Reads a single exported item out of a WXR document:
//! - Title and post name (slug)
//! - Exported post type
//! - Post meta rows (`wp:postmeta` and other structured `wp:` children)

mod parse;

pub use parse::*;
