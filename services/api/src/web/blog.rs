//! services/api/src/web/blog.rs

use crate::{
    error::ApiError,
    web::{
        protocol::{BlogPostView, BlogQuery},
        state::AppState,
    },
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

/// List blog posts, newest first. `featured=true` keeps only featured posts.
#[utoipa::path(
    get,
    path = "/api/blog",
    params(("featured" = Option<String>, Query, description = "`true` to list only featured posts.")),
    responses(
        (status = 200, description = "Blog posts", body = [BlogPostView]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Blog"
)]
pub async fn list_posts_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<BlogQuery>, QueryRejection>,
) -> Result<Json<Vec<BlogPostView>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let featured_only = query.featured.as_deref() == Some("true");

    let posts = if featured_only {
        app_state.db.list_featured_blog_posts().await
    } else {
        app_state.db.list_blog_posts().await
    }
    .map_err(|e| ApiError::external("Failed to fetch blog posts", e))?;

    Ok(Json(posts.into_iter().map(BlogPostView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    params(("slug" = String, Path, description = "URL slug of the post.")),
    responses(
        (status = 200, description = "The post", body = BlogPostView),
        (status = 404, description = "No post with that slug")
    ),
    tag = "Blog"
)]
pub async fn get_post_handler(
    State(app_state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostView>, ApiError> {
    let post = app_state
        .db
        .get_blog_post(&slug)
        .await
        .map_err(|e| ApiError::external("Failed to fetch blog post", e))?;
    Ok(Json(post.into()))
}
