use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use acf_importer::storage::{Post, SiteId};
use acf_importer::{FileStore, ImportOptions, Importer, ImporterConfig, PostStore};

/// Shared application state for CLI commands
pub struct App {
    pub config: ImporterConfig,
    pub store: FileStore,
}

impl App {
    /// Load config and open the file store
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => ImporterConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ImporterConfig::load_or_default().context("Failed to load config")?,
        };

        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let store_dir = config.data_dir().context("Failed to get data directory")?;
        let store = FileStore::new(store_dir);
        store.init().context("Failed to initialize store")?;

        Ok(Self { config, store })
    }

    /// Site from the command line, or the configured default
    pub fn site(&self, site: Option<u64>) -> SiteId {
        site.map(SiteId).unwrap_or(self.config.site)
    }

    /// Importer using the configured options with per-run overrides
    pub fn importer(&self, allow_duplicates: bool) -> Importer {
        let options = ImportOptions {
            allow_duplicates: allow_duplicates || self.config.import.allow_duplicates,
            ..self.config.import.clone()
        };
        Importer::new(options)
    }

    /// Read an export from a file, or stdin for "-"
    pub fn read_document(path: &Path) -> Result<Vec<u8>> {
        if path == Path::new("-") {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read export from stdin")?;
            return Ok(buf);
        }

        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Find a post of the configured type by exact title
    pub fn find_post(&self, site: SiteId, title: &str) -> Result<Post> {
        self.store
            .find_post_by_title(site, title, &self.config.import.post_type)
            .with_context(|| format!("Failed to search site {}", site))?
            .with_context(|| format!("No field group titled '{}' in site {}", title, site))
    }
}
