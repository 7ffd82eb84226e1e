//! Create-or-reuse import of an exported field group

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::slashes::add_slashes;
use crate::storage::{NewPost, PostId, PostStatus, PostStore, SiteId, StoreError};
use crate::wxr::{self, ImportDocument, ParseError};

/// Post type field groups are stored under
pub const DEFAULT_POST_TYPE: &str = "acf";

/// Author assigned to imported posts
pub const DEFAULT_AUTHOR_ID: u64 = 1;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Exported item has no title")]
    MissingTitle,

    #[error("Failed to write meta '{key}': {source}")]
    MetaWrite {
        key: String,
        #[source]
        source: StoreError,
    },
}

type Result<T> = std::result::Result<T, ImportError>;

/// What to do when a single meta row cannot be written
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MetaFailurePolicy {
    /// Keep writing the remaining rows and report the failures
    #[default]
    Continue,
    /// Stop at the first failed row
    FailFast,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportOptions {
    /// Always create a new post, even if one with the same title exists
    pub allow_duplicates: bool,
    /// Post type used for the title lookup and for created posts
    pub post_type: String,
    /// Author of created posts
    pub author_id: u64,
    /// Reject exports whose item has an empty title
    pub require_title: bool,
    /// Whether a failed meta write stops the import
    pub on_meta_error: MetaFailurePolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            post_type: DEFAULT_POST_TYPE.to_string(),
            author_id: DEFAULT_AUTHOR_ID,
            require_title: false,
            on_meta_error: MetaFailurePolicy::Continue,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetaWriteFailure {
    pub key: String,
    pub error: String,
}

/// Result of importing into one site
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub site: SiteId,
    pub post_id: PostId,
    /// False when an existing post was reused
    pub created: bool,
    pub meta_written: usize,
    pub meta_failures: Vec<MetaWriteFailure>,
}

/// Imports exported field groups into a [`PostStore`].
///
/// The import is not atomic: meta rows written before a failure stay
/// written, and the title lookup followed by the create is a plain
/// read-then-write.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Parse `document` and import it into `site`
    pub fn import<S: PostStore + ?Sized>(
        &self,
        store: &S,
        site: SiteId,
        document: &[u8],
    ) -> Result<ImportOutcome> {
        let doc = wxr::parse(document)?;
        self.import_document(store, site, &doc)
    }

    /// Import an already parsed document into `site`
    pub fn import_document<S: PostStore + ?Sized>(
        &self,
        store: &S,
        site: SiteId,
        doc: &ImportDocument,
    ) -> Result<ImportOutcome> {
        if doc.title.is_empty() {
            if self.options.require_title {
                return Err(ImportError::MissingTitle);
            }
            log::warn!("Importing item with an empty title into site {}", site);
        }

        let (post_id, created) = self.resolve_post(store, site, doc)?;

        let mut outcome = ImportOutcome {
            site,
            post_id,
            created,
            meta_written: 0,
            meta_failures: Vec::new(),
        };

        for row in &doc.meta_rows {
            // The store strips one layer of slashes on the way in
            let value = add_slashes(&row.value);

            match store.set_post_meta(site, post_id, &row.key, &value) {
                Ok(()) => {
                    log::debug!("Wrote meta '{}' on post {}", row.key, post_id);
                    outcome.meta_written += 1;
                }
                Err(e) => match self.options.on_meta_error {
                    MetaFailurePolicy::FailFast => {
                        return Err(ImportError::MetaWrite {
                            key: row.key.clone(),
                            source: e,
                        });
                    }
                    MetaFailurePolicy::Continue => {
                        log::warn!(
                            "Failed to write meta '{}' on post {}: {}",
                            row.key,
                            post_id,
                            e
                        );
                        outcome.meta_failures.push(MetaWriteFailure {
                            key: row.key.clone(),
                            error: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }

    /// Reuse the post with the same title, or create a new one
    fn resolve_post<S: PostStore + ?Sized>(
        &self,
        store: &S,
        site: SiteId,
        doc: &ImportDocument,
    ) -> Result<(PostId, bool)> {
        let existing = store.find_post_by_title(site, &doc.title, &self.options.post_type)?;

        match existing {
            Some(post) if !self.options.allow_duplicates => {
                log::info!(
                    "Reusing post {} \"{}\" in site {}",
                    post.id,
                    doc.title,
                    site
                );
                Ok((post.id, false))
            }
            _ => {
                let post_id = store.create_post(
                    site,
                    NewPost {
                        title: doc.title.clone(),
                        name: doc.canonical_name.clone(),
                        post_type: self.options.post_type.clone(),
                        status: PostStatus::Publish,
                        author_id: self.options.author_id,
                    },
                )?;
                log::info!("Created post {} \"{}\" in site {}", post_id, doc.title, site);
                Ok((post_id, true))
            }
        }
    }

    /// Import into every active site of the network, in site id order.
    ///
    /// Archived, spam and deleted sites are skipped. The first fatal error
    /// stops the run; sites already imported keep their posts.
    pub fn import_network<S: PostStore + ?Sized>(
        &self,
        store: &S,
        document: &[u8],
    ) -> Result<Vec<ImportOutcome>> {
        let doc = wxr::parse(document)?;

        let mut sites: Vec<_> = store
            .list_sites()?
            .into_iter()
            .filter(|s| s.is_active())
            .collect();
        sites.sort_by_key(|s| s.id);

        let mut outcomes = Vec::with_capacity(sites.len());
        for site in sites {
            outcomes.push(self.import_document(store, site.id, &doc)?);
        }

        Ok(outcomes)
    }
}
