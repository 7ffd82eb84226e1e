mod file_storage;
mod memory;
mod models;
pub mod slashes;
mod store;

pub use file_storage::{FileStore, Result, StoreError};
pub use memory::MemoryStore;
pub use models::*;
pub use store::PostStore;
