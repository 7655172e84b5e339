use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Criteria narrowing a post listing.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring matched against title and slug.
    pub search: Option<String>,
}

impl PostFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// The search term, if one is set and non-blank.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Whether `post` passes this filter.
    pub fn matches(&self, post: &Post) -> bool {
        match self.term() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term) || post.slug.to_lowercase().contains(&term)
            }
        }
    }
}

/// Persistence boundary for posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Find a post by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert or update a post.
    ///
    /// The store stamps `created_at` on insert and refreshes `updated_at` on
    /// every call. A slug already used by another post is a
    /// `RepoError::Constraint`.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Permanently remove a post.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Posts matching `filter`, newest `created_at` first.
    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Slugs beginning with `prefix`, ignoring the post `exclude` if given.
    ///
    /// May return extra slugs; callers test exact membership.
    async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError>;
}
