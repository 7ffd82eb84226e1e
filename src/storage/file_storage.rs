use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use super::models::{NewPost, Post, PostId, Site, SiteId};
use super::slashes::strip_slashes;
use super::store::PostStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Site not found: {0}")]
    SiteNotFound(SiteId),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Post store persisted as JSON files.
///
/// Layout:
/// ```text
/// <base>/sites.json
/// <base>/sites/<site>/posts/<id>.json
/// ```
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories and register the main site
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.base_path.join("sites"))?;

        if !self.sites_path().exists() {
            let main = Site::new(SiteId::MAIN, "Main Site");
            self.save_sites(&[main])?;
            log::info!("Created site registry at {:?}", self.sites_path());
        }

        fs::create_dir_all(self.posts_dir(SiteId::MAIN))?;
        Ok(())
    }

    // ===== Site Operations =====

    fn sites_path(&self) -> PathBuf {
        self.base_path.join("sites.json")
    }

    fn site_dir(&self, site: SiteId) -> PathBuf {
        self.base_path.join("sites").join(site.to_string())
    }

    fn posts_dir(&self, site: SiteId) -> PathBuf {
        self.site_dir(site).join("posts")
    }

    fn save_sites(&self, sites: &[Site]) -> Result<()> {
        let content = serde_json::to_string_pretty(sites)?;
        fs::write(self.sites_path(), content)?;
        Ok(())
    }

    fn load_sites(&self) -> Result<Vec<Site>> {
        let path = self.sites_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let sites: Vec<Site> = serde_json::from_str(&content)?;
        Ok(sites)
    }

    /// Register a new site with the next free id
    pub fn add_site(&self, name: &str) -> Result<Site> {
        let mut sites = self.load_sites()?;
        if sites.iter().any(|s| s.name == name) {
            return Err(StoreError::InvalidOperation(format!(
                "Site '{}' already exists",
                name
            )));
        }

        let next_id = sites.iter().map(|s| s.id.0).max().unwrap_or(0) + 1;
        let site = Site::new(SiteId(next_id), name);

        fs::create_dir_all(self.posts_dir(site.id))?;
        sites.push(site.clone());
        self.save_sites(&sites)?;

        Ok(site)
    }

    fn ensure_site(&self, site: SiteId) -> Result<()> {
        if self.load_sites()?.iter().any(|s| s.id == site) {
            Ok(())
        } else {
            Err(StoreError::SiteNotFound(site))
        }
    }

    // ===== Post Operations =====

    fn post_path(&self, site: SiteId, post_id: PostId) -> PathBuf {
        self.posts_dir(site).join(format!("{}.json", post_id))
    }

    fn list_posts(&self, site: SiteId) -> Result<Vec<Post>> {
        self.ensure_site(site)?;

        let posts_dir = self.posts_dir(site);
        let mut posts = Vec::new();

        if !posts_dir.exists() {
            return Ok(posts);
        }

        for entry in fs::read_dir(&posts_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && path.extension().map_or(false, |e| e == "json") {
                let content = fs::read_to_string(&path)?;
                let post: Post = serde_json::from_str(&content)?;
                posts.push(post);
            }
        }

        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    fn save_post(&self, site: SiteId, post: &Post) -> Result<()> {
        let content = serde_json::to_string_pretty(post)?;
        fs::write(self.post_path(site, post.id), content)?;
        Ok(())
    }
}

impl PostStore for FileStore {
    fn find_post_by_title(
        &self,
        site: SiteId,
        title: &str,
        post_type: &str,
    ) -> Result<Option<Post>> {
        let posts = self.list_posts(site)?;
        Ok(posts
            .into_iter()
            .find(|p| p.title == title && p.post_type == post_type))
    }

    fn create_post(&self, site: SiteId, post: NewPost) -> Result<PostId> {
        let posts = self.list_posts(site)?;
        let next_id = PostId(posts.iter().map(|p| p.id.0).max().unwrap_or(0) + 1);

        fs::create_dir_all(self.posts_dir(site))?;
        let post = Post::from_new(next_id, post);
        self.save_post(site, &post)?;

        Ok(next_id)
    }

    fn set_post_meta(&self, site: SiteId, post_id: PostId, key: &str, value: &str) -> Result<()> {
        let mut post = self
            .get_post(site, post_id)?
            .ok_or(StoreError::PostNotFound(post_id))?;

        post.meta.insert(key.to_string(), strip_slashes(value));
        post.updated_at = Utc::now();
        self.save_post(site, &post)
    }

    fn get_post(&self, site: SiteId, post_id: PostId) -> Result<Option<Post>> {
        self.ensure_site(site)?;

        let path = self.post_path(site, post_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let post: Post = serde_json::from_str(&content)?;
        Ok(Some(post))
    }

    fn list_sites(&self) -> Result<Vec<Site>> {
        let mut sites = self.load_sites()?;
        sites.sort_by_key(|s| s.id);
        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PostStatus;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        store.init().unwrap();
        (store, temp_dir)
    }

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            name: title.to_lowercase().replace(' ', "-"),
            post_type: "acf".to_string(),
            status: PostStatus::Publish,
            author_id: 1,
        }
    }

    #[test]
    fn test_init_registers_main_site() {
        let (store, _temp) = create_test_store();

        let sites = store.list_sites().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].id, SiteId::MAIN);
        assert!(sites[0].is_active());
    }

    #[test]
    fn test_init_is_idempotent() {
        let (store, _temp) = create_test_store();
        store.add_site("Shop").unwrap();
        store.init().unwrap();

        assert_eq!(store.list_sites().unwrap().len(), 2);
    }

    #[test]
    fn test_create_and_find_post() {
        let (store, _temp) = create_test_store();

        let id = store.create_post(SiteId::MAIN, new_post("Contact Form")).unwrap();
        assert_eq!(id, PostId(1));

        let found = store
            .find_post_by_title(SiteId::MAIN, "Contact Form", "acf")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "contact-form");
        assert_eq!(found.status, PostStatus::Publish);

        assert!(store
            .find_post_by_title(SiteId::MAIN, "contact form", "acf")
            .unwrap()
            .is_none());
        assert!(store
            .find_post_by_title(SiteId::MAIN, "Contact Form", "page")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_post_persisted_as_published() {
        let (store, _temp) = create_test_store();
        let id = store.create_post(SiteId::MAIN, new_post("Status")).unwrap();

        let raw = fs::read_to_string(store.post_path(SiteId::MAIN, id)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["status"], "publish");
        assert_eq!(PostStatus::default().to_string(), "publish");
    }

    #[test]
    fn test_find_returns_lowest_id() {
        let (store, _temp) = create_test_store();

        store.create_post(SiteId::MAIN, new_post("Dup")).unwrap();
        store.create_post(SiteId::MAIN, new_post("Dup")).unwrap();

        let found = store
            .find_post_by_title(SiteId::MAIN, "Dup", "acf")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, PostId(1));
    }

    #[test]
    fn test_set_post_meta_strips_one_layer() {
        let (store, _temp) = create_test_store();
        let id = store.create_post(SiteId::MAIN, new_post("Meta")).unwrap();

        store
            .set_post_meta(SiteId::MAIN, id, "field_1", r#"s:4:\"Name\";"#)
            .unwrap();
        store.set_post_meta(SiteId::MAIN, id, "rule", "a").unwrap();
        store.set_post_meta(SiteId::MAIN, id, "rule", "b").unwrap();

        // Reopen to make sure the values were persisted
        let reopened = FileStore::new(store.base_path().to_path_buf());
        let post = reopened.get_post(SiteId::MAIN, id).unwrap().unwrap();
        assert_eq!(post.meta.get("field_1").unwrap(), r#"s:4:"Name";"#);
        assert_eq!(post.meta.get("rule").unwrap(), "b");
    }

    #[test]
    fn test_set_meta_on_missing_post() {
        let (store, _temp) = create_test_store();

        let result = store.set_post_meta(SiteId::MAIN, PostId(99), "k", "v");
        assert!(matches!(result, Err(StoreError::PostNotFound(PostId(99)))));
    }

    #[test]
    fn test_sites_are_isolated() {
        let (store, _temp) = create_test_store();
        let shop = store.add_site("Shop").unwrap();
        assert_eq!(shop.id, SiteId(2));

        store.create_post(SiteId::MAIN, new_post("Contact Form")).unwrap();

        assert!(store
            .find_post_by_title(shop.id, "Contact Form", "acf")
            .unwrap()
            .is_none());
        assert_eq!(store.create_post(shop.id, new_post("Other")).unwrap(), PostId(1));
    }

    #[test]
    fn test_unknown_site() {
        let (store, _temp) = create_test_store();

        let result = store.create_post(SiteId(7), new_post("X"));
        assert!(matches!(result, Err(StoreError::SiteNotFound(SiteId(7)))));
    }

    #[test]
    fn test_duplicate_site_name_rejected() {
        let (store, _temp) = create_test_store();
        store.add_site("Shop").unwrap();

        assert!(store.add_site("Shop").is_err());
    }
}
