//! Post service behaviour against the in-memory repository.

use std::sync::Arc;

use serde_json::json;

use folio_core::DomainError;
use folio_core::pagination::PageNumber;
use folio_core::ports::PostFilter;
use folio_core::services::{NewPost, PostChanges, PostService, UpdateMode};
use folio_core::slug::MAX_SLUG_LEN;
use folio_core::validation::Input;
use folio_infra::InMemoryPostRepository;

fn service() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

fn new_post(title: &str, content: serde_json::Value) -> NewPost {
    NewPost {
        title: Input::Set(title.to_string()),
        content: Input::Set(content),
        slug: None,
    }
}

#[tokio::test]
async fn create_assigns_slug_and_renders() {
    let posts = service();

    let post = posts
        .create(new_post(
            "My Post",
            json!([
                {"type": "heading1", "content": "Hi"},
                {"type": "paragraph", "content": "**bold** text"}
            ]),
        ))
        .await
        .unwrap();

    assert_eq!(post.slug, "my-post");
    assert_eq!(
        post.rendered_html,
        "<h1>Hi</h1>\n<p><strong>bold</strong> text</p>"
    );

    let stored = posts.get("my-post").await.unwrap();
    assert_eq!(stored.id, post.id);
    assert_eq!(stored.rendered_html, post.rendered_html);
}

#[tokio::test]
async fn repeated_titles_get_suffixed_slugs() {
    let posts = service();
    let mut slugs = Vec::new();
    for _ in 0..3 {
        let post = posts
            .create(new_post("Hello World", json!([])))
            .await
            .unwrap();
        slugs.push(post.slug);
    }

    assert_eq!(slugs, ["hello-world", "hello-world-1", "hello-world-2"]);
}

#[tokio::test]
async fn longest_titles_keep_probing_for_a_free_slug() {
    let posts = service();
    let title = "a".repeat(MAX_SLUG_LEN);

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let post = posts.create(new_post(&title, json!([]))).await.unwrap();
        assert_eq!(post.slug.len(), MAX_SLUG_LEN);
        slugs.push(post.slug);
    }

    assert_eq!(slugs[0], title);
    assert!(slugs[1].ends_with("a-1"));
    assert!(slugs[2].ends_with("a-2"));
}

#[tokio::test]
async fn explicit_slug_is_used_and_deduplicated() {
    let posts = service();
    let input = NewPost {
        slug: Some("custom".to_string()),
        ..new_post("Anything", json!([]))
    };

    let first = posts.create(input.clone()).await.unwrap();
    let second = posts.create(input).await.unwrap();

    assert_eq!(first.slug, "custom");
    assert_eq!(second.slug, "custom-1");
}

#[tokio::test]
async fn invalid_input_reports_every_field() {
    let posts = service();

    let err = posts
        .create(NewPost {
            title: Input::Set("   ".to_string()),
            content: Input::Set(json!({"not": "a list"})),
            slug: Some("bad slug".to_string()),
        })
        .await
        .unwrap_err();

    let errors = match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert!(errors.get("title").is_some());
    assert_eq!(
        errors.get("content").unwrap(),
        ["Content must be a list of content blocks"]
    );
    assert!(errors.get("slug").is_some());
}

#[tokio::test]
async fn missing_fields_are_required() {
    let err = service().create(NewPost::default()).await.unwrap_err();

    let errors = match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(errors.get("title").unwrap(), ["This field is required."]);
    assert_eq!(errors.get("content").unwrap(), ["This field is required."]);
}

#[tokio::test]
async fn null_fields_are_rejected() {
    let err = service()
        .create(NewPost {
            title: Input::Null,
            content: Input::Null,
            slug: None,
        })
        .await
        .unwrap_err();

    let errors = match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(errors.get("title").unwrap(), ["This field may not be null."]);
    assert_eq!(errors.get("content").unwrap(), ["This field may not be null."]);
}

#[tokio::test]
async fn content_is_stored_as_sent() {
    let posts = service();
    let content = json!([
        {"type": "paragraph", "content": "hi", "id": "b1"},
        {"type": "heading1", "content": null},
        {"type": "gallery", "images": ["/a.png"]}
    ]);

    posts
        .create(new_post("Verbatim", content.clone()))
        .await
        .unwrap();
    let stored = posts.get("verbatim").await.unwrap();

    assert_eq!(serde_json::to_value(&stored.content).unwrap(), content);
    assert_eq!(stored.rendered_html, "<p>hi</p>\n<h1></h1>");
}

#[tokio::test]
async fn block_without_type_is_rejected() {
    let err = service()
        .create(new_post("Post", json!([{"content": "x"}])))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn title_change_keeps_slug() {
    let posts = service();
    posts
        .create(new_post("Original", json!([{"type": "paragraph", "content": "a"}])))
        .await
        .unwrap();

    let updated = posts
        .update(
            "original",
            PostChanges {
                title: Input::Set("Renamed".to_string()),
                content: Input::Missing,
            },
            UpdateMode::Partial,
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.slug, "original");
    assert_eq!(updated.rendered_html, "<p>a</p>");
}

#[tokio::test]
async fn content_change_rerenders() {
    let posts = service();
    posts
        .create(new_post("Doc", json!([{"type": "paragraph", "content": "old"}])))
        .await
        .unwrap();

    let updated = posts
        .update(
            "doc",
            PostChanges {
                title: Input::Set("Doc".to_string()),
                content: Input::Set(json!([{"type": "blockquote", "content": "*new*"}])),
            },
            UpdateMode::Full,
        )
        .await
        .unwrap();

    assert_eq!(updated.rendered_html, "<blockquote><em>new</em></blockquote>");
}

#[tokio::test]
async fn full_update_requires_all_fields() {
    let posts = service();
    posts.create(new_post("Doc", json!([]))).await.unwrap();

    let err = posts
        .update(
            "doc",
            PostChanges {
                title: Input::Set("Doc".to_string()),
                content: Input::Missing,
            },
            UpdateMode::Full,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn update_missing_post_is_not_found() {
    let err = service()
        .update("ghost", PostChanges::default(), UpdateMode::Partial)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let posts = service();
    posts.create(new_post("Gone", json!([]))).await.unwrap();

    posts.delete("gone").await.unwrap();

    assert!(matches!(
        posts.get("gone").await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        posts.delete("gone").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn list_pages_newest_first() {
    let posts = service();
    for i in 1..=3 {
        posts
            .create(new_post(&format!("Post {i}"), json!([])))
            .await
            .unwrap();
    }

    let first = posts
        .list(&PostFilter::default(), PageNumber::Number(1), 2)
        .await
        .unwrap();
    let titles: Vec<_> = first.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Post 3", "Post 2"]);
    assert_eq!(first.total, 3);
    assert_eq!(first.next_page(), Some(2));

    let last = posts
        .list(&PostFilter::default(), PageNumber::Last, 2)
        .await
        .unwrap();
    assert_eq!(last.page, 2);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.previous_page(), Some(1));

    let err = posts
        .list(&PostFilter::default(), PageNumber::Number(3), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidPage));
}

#[tokio::test]
async fn list_searches_title_and_slug() {
    let posts = service();
    posts.create(new_post("Rust Tips", json!([]))).await.unwrap();
    posts.create(new_post("Gardening", json!([]))).await.unwrap();

    let page = posts
        .list(&PostFilter::search("RUST"), PageNumber::Number(1), 10)
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].slug, "rust-tips");
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let posts = service();
    posts.create(new_post("Plain", json!([]))).await.unwrap();
    let underscored = NewPost {
        slug: Some("snake_case".to_string()),
        ..new_post("Snake", json!([]))
    };
    posts.create(underscored).await.unwrap();

    for term in ["_", "%"] {
        let page = posts
            .list(&PostFilter::search(term), PageNumber::Number(1), 10)
            .await
            .unwrap();
        let slugs: Vec<_> = page.items.iter().map(|p| p.slug.as_str()).collect();
        let expected: &[&str] = if term == "_" { &["snake_case"] } else { &[] };
        assert_eq!(slugs, expected);
    }
}

#[tokio::test]
async fn empty_listing_has_a_first_page() {
    let page = service()
        .list(&PostFilter::default(), PageNumber::Number(1), 10)
        .await
        .unwrap();

    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
    assert_eq!(page.next_page(), None);
}

#[tokio::test]
async fn unsluggable_title_falls_back() {
    let post = service().create(new_post("!!!", json!([]))).await.unwrap();
    assert_eq!(post.slug, "post");
}
