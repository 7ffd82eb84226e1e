//! Import Advanced Custom Fields (ACF) field groups from WordPress WXR
//! exports into a post store.

pub mod config;
pub mod importer;
pub mod storage;
pub mod wxr;

pub use config::{ConfigError, ImporterConfig};
pub use importer::{ImportError, ImportOptions, ImportOutcome, Importer, MetaFailurePolicy};
pub use storage::{FileStore, MemoryStore, PostId, PostStore, SiteId, StoreError};
pub use wxr::{ImportDocument, MetaRow, ParseError};
