//! In-process post store

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::Utc;

use super::file_storage::{Result, StoreError};
use super::models::{NewPost, Post, PostId, Site, SiteId};
use super::slashes::strip_slashes;
use super::store::PostStore;

#[derive(Default)]
struct SiteData {
    site: Option<Site>,
    posts: BTreeMap<PostId, Post>,
}

/// Post store kept in memory. Not `Sync`; imports are single-threaded.
pub struct MemoryStore {
    sites: RefCell<BTreeMap<SiteId, SiteData>>,
}

impl MemoryStore {
    /// Create a store containing only the main site
    pub fn new() -> Self {
        let store = Self {
            sites: RefCell::new(BTreeMap::new()),
        };
        store.insert_site(Site::new(SiteId::MAIN, "Main Site"));
        store
    }

    /// Register an additional site
    pub fn with_site(self, site: Site) -> Self {
        self.insert_site(site);
        self
    }

    fn insert_site(&self, site: Site) {
        let mut sites = self.sites.borrow_mut();
        let entry = sites.entry(site.id).or_default();
        entry.site = Some(site);
    }

    /// Number of posts stored for a site
    pub fn post_count(&self, site: SiteId) -> usize {
        self.sites
            .borrow()
            .get(&site)
            .map_or(0, |data| data.posts.len())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore for MemoryStore {
    fn find_post_by_title(
        &self,
        site: SiteId,
        title: &str,
        post_type: &str,
    ) -> Result<Option<Post>> {
        let sites = self.sites.borrow();
        let data = sites.get(&site).ok_or(StoreError::SiteNotFound(site))?;

        Ok(data
            .posts
            .values()
            .find(|p| p.title == title && p.post_type == post_type)
            .cloned())
    }

    fn create_post(&self, site: SiteId, post: NewPost) -> Result<PostId> {
        let mut sites = self.sites.borrow_mut();
        let data = sites.get_mut(&site).ok_or(StoreError::SiteNotFound(site))?;

        let next_id = PostId(data.posts.keys().last().map_or(0, |id| id.0) + 1);
        data.posts.insert(next_id, Post::from_new(next_id, post));

        Ok(next_id)
    }

    fn set_post_meta(&self, site: SiteId, post_id: PostId, key: &str, value: &str) -> Result<()> {
        let mut sites = self.sites.borrow_mut();
        let data = sites.get_mut(&site).ok_or(StoreError::SiteNotFound(site))?;
        let post = data
            .posts
            .get_mut(&post_id)
            .ok_or(StoreError::PostNotFound(post_id))?;

        post.meta.insert(key.to_string(), strip_slashes(value));
        post.updated_at = Utc::now();
        Ok(())
    }

    fn get_post(&self, site: SiteId, post_id: PostId) -> Result<Option<Post>> {
        let sites = self.sites.borrow();
        let data = sites.get(&site).ok_or(StoreError::SiteNotFound(site))?;
        Ok(data.posts.get(&post_id).cloned())
    }

    fn list_sites(&self) -> Result<Vec<Site>> {
        Ok(self
            .sites
            .borrow()
            .values()
            .filter_map(|data| data.site.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PostStatus;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            name: String::new(),
            post_type: "acf".to_string(),
            status: PostStatus::Publish,
            author_id: 1,
        }
    }

    #[test]
    fn test_ids_are_sequential_per_site() {
        let store = MemoryStore::new().with_site(Site::new(SiteId(2), "Second"));

        assert_eq!(store.create_post(SiteId::MAIN, new_post("a")).unwrap(), PostId(1));
        assert_eq!(store.create_post(SiteId::MAIN, new_post("b")).unwrap(), PostId(2));
        assert_eq!(store.create_post(SiteId(2), new_post("a")).unwrap(), PostId(1));
        assert_eq!(store.post_count(SiteId::MAIN), 2);
    }

    #[test]
    fn test_meta_round_trip() {
        let store = MemoryStore::new();
        let id = store.create_post(SiteId::MAIN, new_post("a")).unwrap();

        store.set_post_meta(SiteId::MAIN, id, "k", r"a\\b").unwrap();

        let post = store.get_post(SiteId::MAIN, id).unwrap().unwrap();
        assert_eq!(post.meta.get("k").unwrap(), r"a\b");
    }

    #[test]
    fn test_unknown_site_errors() {
        let store = MemoryStore::new();

        assert!(matches!(
            store.find_post_by_title(SiteId(5), "a", "acf"),
            Err(StoreError::SiteNotFound(SiteId(5)))
        ));
    }

    #[test]
    fn test_sites_listed_in_id_order() {
        let store = MemoryStore::new()
            .with_site(Site::new(SiteId(3), "Third"))
            .with_site(Site::new(SiteId(2), "Second"));

        let ids: Vec<SiteId> = store.list_sites().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SiteId(1), SiteId(2), SiteId(3)]);
    }
}
