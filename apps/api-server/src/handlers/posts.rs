//! Post endpoints.

use actix_web::{HttpRequest, HttpResponse, web};

use folio_core::domain::Post;
use folio_core::pagination::{Page, PageNumber};
use folio_core::ports::PostFilter;
use folio_core::services::{NewPost, PostChanges, UpdateMode};
use folio_core::validation::Input;
use folio_shared::dto::{
    CreatePostRequest, ListPostsQuery, Paginated, PostDetail, PostSummary, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn summary(post: Post) -> PostSummary {
    let snippet = post.snippet();
    PostSummary {
        id: post.id,
        title: post.title,
        slug: post.slug,
        snippet,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn detail(post: Post) -> AppResult<PostDetail> {
    let content =
        serde_json::to_value(&post.content).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(PostDetail {
        id: post.id,
        title: post.title,
        slug: post.slug,
        content,
        rendered_html: post.rendered_html,
        created_at: post.created_at,
        updated_at: post.updated_at,
    })
}

/// Absolute URL of this listing at `page`, keeping the other query parameters.
/// `None` drops the `page` parameter.
fn page_link(req: &HttpRequest, page: Option<u64>) -> String {
    let mut url = req.full_url();

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if let Some(page) = page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    pairs.sort();

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    url.to_string()
}

fn paginated(req: &HttpRequest, page: Page<Post>) -> Paginated<PostSummary> {
    let next = page.next_page().map(|n| page_link(req, Some(n)));
    let previous = page
        .previous_page()
        .map(|n| page_link(req, (n > 1).then_some(n)));

    Paginated {
        count: page.total,
        next,
        previous,
        results: page.items.into_iter().map(summary).collect(),
    }
}

/// GET /api/posts/
pub async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page_size = state.pagination.page_size(query.page_size.as_deref());
    let page_number = PageNumber::parse(query.page.as_deref())?;
    let filter = PostFilter {
        search: query.search,
    };

    let page = state.posts.list(&filter, page_number, page_size).await?;

    Ok(HttpResponse::Ok().json(paginated(&req, page)))
}

/// POST /api/posts/
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create(NewPost {
            title: Input::from_nullable(req.title),
            content: Input::from_nullable(req.content),
            slug: req.slug,
        })
        .await?;

    Ok(HttpResponse::Created().json(detail(post)?))
}

/// GET /api/posts/{slug}/
pub async fn retrieve(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&slug).await?;
    Ok(HttpResponse::Ok().json(detail(post)?))
}

/// PUT /api/posts/{slug}/
pub async fn replace(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    update(&state, &slug, body.into_inner(), UpdateMode::Full).await
}

/// PATCH /api/posts/{slug}/
pub async fn partial_update(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    update(&state, &slug, body.into_inner(), UpdateMode::Partial).await
}

async fn update(
    state: &AppState,
    slug: &str,
    req: UpdatePostRequest,
    mode: UpdateMode,
) -> AppResult<HttpResponse> {
    let changes = PostChanges {
        title: Input::from_nullable(req.title),
        content: Input::from_nullable(req.content),
    };
    let post = state.posts.update(slug, changes, mode).await?;
    Ok(HttpResponse::Ok().json(detail(post)?))
}

/// DELETE /api/posts/{slug}/
pub async fn destroy(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&slug).await?;
    Ok(HttpResponse::NoContent().finish())
}
