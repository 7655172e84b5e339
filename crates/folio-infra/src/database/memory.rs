//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::domain::Post;
use folio_core::error::RepoError;
use folio_core::ports::{PostFilter, PostRepository};

/// In-memory post store behind an async RwLock.
///
/// Posts are kept in insertion order. Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest first; ties go to the most recently inserted post.
fn newest_first(posts: &[Post], filter: &PostFilter) -> Vec<Post> {
    let mut matching: Vec<Post> = posts
        .iter()
        .rev()
        .filter(|post| filter.matches(post))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.slug == post.slug && p.id != post.id) {
            return Err(RepoError::Constraint(
                "A post with this slug already exists".to_string(),
            ));
        }

        let now = Utc::now();
        post.updated_at = now;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => {
                post.created_at = existing.created_at;
                *existing = post.clone();
            }
            None => {
                post.created_at = now;
                posts.push(post.clone());
            }
        }

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(newest_first(&posts, filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| Some(p.id) != exclude && p.slug.starts_with(prefix))
            .map(|p| p.slug.clone())
            .collect())
    }
}
