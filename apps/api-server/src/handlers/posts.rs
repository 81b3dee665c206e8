//! Post collection handlers.

use actix_web::{HttpResponse, web};

use postbox_core::DomainError;
use postbox_core::domain::{Post, PostFields, Schema};
use postbox_core::query::{self, SearchQuery, SortSpec, parse_direction};
use postbox_shared::MessageResponse;
use postbox_shared::dto::{ListParams, PostPayload, PostResponse, SearchParams};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author,
        date: post.date.format("%Y-%m-%d").to_string(),
    }
}

fn to_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(to_response).collect()
}

fn to_fields(payload: PostPayload) -> PostFields {
    PostFields {
        title: payload.title,
        content: payload.content,
        author: payload.author,
    }
}

/// Resolve optional `sort`/`direction` parameters. Empty values count as absent,
/// and a direction is validated even without a sort field.
fn sort_spec(
    schema: &Schema,
    sort: Option<&str>,
    direction: Option<&str>,
) -> Result<Option<SortSpec>, DomainError> {
    let direction = direction.filter(|d| !d.is_empty());
    match sort.filter(|s| !s.is_empty()) {
        Some(field) => SortSpec::parse(schema, field, direction).map(Some),
        None => parse_direction(direction).map(|_| None),
    }
}

/// GET /api/posts?sort=&direction=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let spec = sort_spec(
        state.posts.schema(),
        params.sort.as_deref(),
        params.direction.as_deref(),
    )?;

    let posts = match spec {
        Some(spec) => state.posts.sorted(spec).await?,
        None => state.posts.list().await?,
    };

    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(to_fields(body.into_inner())).await?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(path.into_inner(), to_fields(body.into_inner()))
        .await?;

    tracing::info!(post_id = post.id, "Post updated");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<u64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !state.posts.delete(id).await? {
        return Err(DomainError::NotFound { id }.into());
    }

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Post with id {id} has been deleted successfully."
    ))))
}

/// GET /api/posts/search?title=&content=&author=&date=[&sort=&direction=]
///
/// Always answers with an array; no match is an empty array.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let spec = sort_spec(
        state.posts.schema(),
        params.sort.as_deref(),
        params.direction.as_deref(),
    )?;

    let terms = SearchQuery {
        title: params.title,
        content: params.content,
        author: params.author,
        date: params.date,
    };
    let mut found = state.posts.search(&terms).await?;
    if let Some(spec) = spec {
        found = query::sort(&found, spec);
    }

    Ok(HttpResponse::Ok().json(to_responses(found)))
}
