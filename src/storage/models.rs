use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Site (tenant) identifier within a multisite network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u64);

impl SiteId {
    /// The main site, present in every store
    pub const MAIN: SiteId = SiteId(1);
}

impl Default for SiteId {
    fn default() -> Self {
        Self::MAIN
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication state of a post. Imports only ever publish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Publish => f.write_str("publish"),
        }
    }
}

/// A persisted post together with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    /// Canonical name (slug)
    pub name: String,
    pub post_type: String,
    pub status: PostStatus,
    pub author_id: u64,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn from_new(id: PostId, new: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: new.title,
            name: new.name,
            post_type: new.post_type,
            status: new.status,
            author_id: new.author_id,
            meta: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to create a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub name: String,
    pub post_type: String,
    pub status: PostStatus,
    pub author_id: u64,
}

/// A site of the network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub spam: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Site {
    pub fn new(id: SiteId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            archived: false,
            spam: false,
            deleted: false,
        }
    }

    /// Sites that are archived, flagged as spam or deleted take no imports
    pub fn is_active(&self) -> bool {
        !self.archived && !self.spam && !self.deleted
    }
}
