//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Keep an explicit `null` apart from an absent key: absent stays `None`
/// through `#[serde(default)]`, `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /posts/`.
///
/// Fields are optional on the wire so that missing or null ones are reported
/// as field-level validation errors rather than parse failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Option<Option<Value>>,
    pub slug: Option<String>,
}

/// Body of `PUT`/`PATCH /posts/{slug}/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Option<Option<Value>>,
}

/// Query string of `GET /posts/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
}

/// List projection - no content, no rendered HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub snippet: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full projection returned by create, retrieve and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Value,
    pub rendered_html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_fields_differ() {
        let req: CreatePostRequest =
            serde_json::from_value(json!({"title": null, "slug": "s"})).unwrap();

        assert_eq!(req.title, Some(None));
        assert_eq!(req.content, None);
        assert_eq!(req.slug.as_deref(), Some("s"));
    }

    #[test]
    fn present_fields_are_kept() {
        let req: UpdatePostRequest =
            serde_json::from_value(json!({"title": "T", "content": []})).unwrap();

        assert_eq!(req.title, Some(Some("T".to_string())));
        assert_eq!(req.content, Some(Some(json!([]))));
    }
}
