pub mod import;
pub mod preview;
pub mod show;
pub mod sites;
