use super::file_storage::Result;
use super::models::{NewPost, Post, PostId, Site, SiteId};

/// Host-side post storage, scoped per site.
///
/// Every call names the site it targets; there is no ambient "current site".
pub trait PostStore {
    /// Exact, case-sensitive title lookup within `post_type`.
    ///
    /// When several posts share the title the one with the lowest id is returned.
    fn find_post_by_title(&self, site: SiteId, title: &str, post_type: &str)
        -> Result<Option<Post>>;

    fn create_post(&self, site: SiteId, post: NewPost) -> Result<PostId>;

    /// Store a meta value, overwriting any previous value for `key`.
    ///
    /// Implementations strip one layer of backslashes from `value` before
    /// persisting it.
    fn set_post_meta(&self, site: SiteId, post_id: PostId, key: &str, value: &str) -> Result<()>;

    fn get_post(&self, site: SiteId, post_id: PostId) -> Result<Option<Post>>;

    fn list_sites(&self) -> Result<Vec<Site>>;
}
