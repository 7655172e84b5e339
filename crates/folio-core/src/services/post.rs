use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::Post;
use crate::error::{DomainError, RepoError, ValidationErrors};
use crate::pagination::{Page, PageNumber, num_pages};
use crate::ports::{PostFilter, PostRepository};
use crate::render::render_blocks;
use crate::slug::{assign_slug, candidate_prefix, slugify};
use crate::validation::{Input, field, validate_content, validate_slug, validate_title};

/// Slug used when a title has no characters to build one from.
const FALLBACK_SLUG: &str = "post";

/// Input for creating a post. Fields stay raw until validated.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Input<String>,
    pub content: Input<Value>,
    /// Explicit slug; blank means derive one from the title.
    pub slug: Option<String>,
}

/// Fields to change on an existing post.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Input<String>,
    pub content: Input<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every writable field must be supplied.
    Full,
    /// Only supplied fields change.
    Partial,
}

/// Post use cases: validation, slug assignment, persistence and rendering.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a post.
    ///
    /// The record is written once with its slug and written again with the
    /// rendered HTML. A failure on the second write leaves `rendered_html`
    /// empty until the next successful save.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut errors = ValidationErrors::default();
        let title = field(&mut errors, "title", input.title.as_deref(), true, validate_title);
        let content = field(
            &mut errors,
            "content",
            input.content.as_ref(),
            true,
            validate_content,
        );
        let explicit_slug = input.slug.as_deref().filter(|s| !s.trim().is_empty());
        let explicit_slug = field(
            &mut errors,
            "slug",
            Input::from(explicit_slug),
            false,
            validate_slug,
        );
        errors.into_result()?;

        let (Some(title), Some(content)) = (title, content) else {
            return Err(DomainError::Internal("validated fields missing".to_string()));
        };

        let base = explicit_slug.unwrap_or_else(|| slugify(&title));
        let base = if base.is_empty() {
            FALLBACK_SLUG.to_string()
        } else {
            base
        };
        let slug = self.unique_slug(&base).await?;

        let post = self.posts.save(Post::new(title, slug, content)).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");

        self.render_and_save(post).await
    }

    /// Update the post at `slug`. The slug itself never changes here.
    pub async fn update(
        &self,
        slug: &str,
        changes: PostChanges,
        mode: UpdateMode,
    ) -> Result<Post, DomainError> {
        let mut post = self.get(slug).await?;

        let required = mode == UpdateMode::Full;
        let mut errors = ValidationErrors::default();
        let title = field(
            &mut errors,
            "title",
            changes.title.as_deref(),
            required,
            validate_title,
        );
        let content = field(
            &mut errors,
            "content",
            changes.content.as_ref(),
            required,
            validate_content,
        );
        errors.into_result()?;

        if let Some(title) = title {
            post.title = title;
        }
        if let Some(content) = content {
            post.content = content;
            post.rendered_html = render_blocks(&post.content);
        }

        let post = self.posts.save(post).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "Post updated");
        Ok(post)
    }

    /// Fetch a post by slug.
    pub async fn get(&self, slug: &str) -> Result<Post, DomainError> {
        self.posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(slug))
    }

    /// One page of posts, newest first.
    pub async fn list(
        &self,
        filter: &PostFilter,
        page: PageNumber,
        page_size: u64,
    ) -> Result<Page<Post>, DomainError> {
        let total = self.posts.count(filter).await?;
        let page = page.resolve(num_pages(total, page_size))?;
        let offset = (page - 1) * page_size;

        let items = self.posts.list(filter, offset, page_size).await?;
        tracing::debug!(total, page, page_size, "Listed posts");

        Ok(Page {
            items,
            total,
            page,
            page_size,
        })
    }

    /// Permanently delete the post at `slug`.
    pub async fn delete(&self, slug: &str) -> Result<(), DomainError> {
        let post = self.get(slug).await?;
        self.posts.delete(post.id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(slug),
            other => other.into(),
        })?;

        tracing::info!(post_id = %post.id, slug, "Post deleted");
        Ok(())
    }

    async fn render_and_save(&self, mut post: Post) -> Result<Post, DomainError> {
        post.rendered_html = render_blocks(&post.content);
        Ok(self.posts.save(post).await?)
    }

    async fn unique_slug(&self, base: &str) -> Result<String, DomainError> {
        let existing: HashSet<String> = self
            .posts
            .slugs_with_prefix(candidate_prefix(base), None)
            .await?
            .into_iter()
            .collect();

        Ok(assign_slug(base, &existing))
    }
}
