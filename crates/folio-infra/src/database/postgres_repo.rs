//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use folio_core::domain::Post;
use folio_core::error::RepoError;
use folio_core::ports::{PostFilter, PostRepository};

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub(crate) fn filtered(filter: &PostFilter) -> Select<PostEntity> {
        let query = PostEntity::find();
        match filter.term() {
            None => query,
            Some(term) => {
                let pattern = contains_pattern(term);
                let like = || LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE);
                query.filter(
                    Condition::any()
                        .add(Expr::expr(Func::lower(Expr::col(post::Column::Title))).like(like()))
                        .add(Expr::expr(Func::lower(Expr::col(post::Column::Slug))).like(like())),
                )
            }
        }
    }

    pub(crate) fn slugs_query(prefix: &str, exclude: Option<Uuid>) -> Select<PostEntity> {
        let query = PostEntity::find()
            .select_only()
            .column(post::Column::Slug)
            .filter(post::Column::Slug.starts_with(prefix));
        match exclude {
            Some(id) => query.filter(post::Column::Id.ne(id)),
            None => query,
        }
    }
}

const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `term` anywhere, case-folded, with its own `%`
/// and `_` taken literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn write_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("A post with this slug already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(Post::try_from)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(Post::try_from)
            .transpose()
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let exists = PostEntity::find_by_id(entity.id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .is_some();

        let active_model = post::ActiveModel::try_from(entity)?;
        let model = if exists {
            active_model.update(&self.db).await
        } else {
            active_model.insert(&self.db).await
        }
        .map_err(write_err)?;

        Post::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        Self::filtered(filter)
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        Self::filtered(filter)
            .order_by_desc(post::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(Post::try_from)
            .collect()
    }

    async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError> {
        Self::slugs_query(prefix, exclude)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(query_err)
    }
}
