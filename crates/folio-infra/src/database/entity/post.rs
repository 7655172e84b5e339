//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::Post;
use folio_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Json,
    #[sea_orm(column_type = "Text")]
    pub rendered_html: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let content = serde_json::from_value(model.content)
            .map_err(|e| RepoError::Query(format!("Malformed content for post {}: {e}", model.id)))?;

        Ok(Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content,
            rendered_html: model.rendered_html,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl TryFrom<Post> for ActiveModel {
    type Error = RepoError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        let content =
            serde_json::to_value(&post.content).map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            content: Set(content),
            rendered_html: Set(post.rendered_html),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        })
    }
}
