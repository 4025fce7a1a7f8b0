//! Blog HTTP handlers.
//!
//! This module implements the blog-related API endpoints:
//! - POST /blogs - Create a blog
//! - GET /blogs - List published blogs with optional filters
//! - PUT /blogs/:blog_id - Update a blog (owner only)
//! - DELETE /blogs/:blog_id - Soft-delete a blog (owner only)
//! - DELETE /blogs - Soft-delete blogs matching filters (owner only)
//!
//! All routes except GET are behind the auth middleware; the
//! authenticated author id arrives via `Extension<AuthContext>`.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::blog::{Blog, BlogFilterQuery, CreateBlogRequest, UpdateBlogRequest},
    services::blog_service,
    state::AppState,
    validators,
};

/// Create a new blog.
///
/// # Endpoint
///
/// `POST /blogs`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Learning Rust",
///   "body": "Ownership is...",
///   "authorId": "550e8400-e29b-41d4-a716-446655440000",
///   "category": "tech",
///   "tags": ["rust", "rust", "web"],
///   "isPublished": true
/// }
/// ```
///
/// # Behavior
///
/// - `authorId` must parse as a UUID and resolve to an existing author
/// - Tags and subcategory are de-duplicated before storage
/// - `isPublished` defaults to false; `publishedAt` is stamped with the
///   current instant iff the blog is published at creation
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created record
/// - **Error (400)**: A required field is missing or `authorId` is malformed
/// - **Error (404)**: `authorId` does not resolve to an author
pub async fn create_blog(
    State(state): State<AppState>,
    Json(request): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    if !validators::has_content(request.title.as_deref()) {
        return Err(AppError::InvalidRequest("Blog title is required".into()));
    }
    if !validators::has_content(request.body.as_deref()) {
        return Err(AppError::InvalidRequest("Blog body is required".into()));
    }
    if !validators::has_content(request.author_id.as_deref()) {
        return Err(AppError::InvalidRequest("Author id is required".into()));
    }
    let raw_author_id = request.author_id.unwrap_or_default();
    let author_id = Uuid::parse_str(raw_author_id.trim()).map_err(|_| {
        AppError::InvalidRequest(format!("{raw_author_id} is not a valid author id"))
    })?;

    let author_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(author_id)
            .fetch_one(&state.pool)
            .await?;
    if !author_exists {
        return Err(AppError::NotFound("Author does not exist".into()));
    }

    if !validators::has_content(request.category.as_deref()) {
        return Err(AppError::InvalidRequest("Blog category is required".into()));
    }

    let tags = validators::dedup(request.tags.unwrap_or_default());
    let subcategory = validators::dedup(request.subcategory.unwrap_or_default());
    let is_published = request.is_published.unwrap_or(false);
    let published_at = if is_published { Some(Utc::now()) } else { None };

    let blog = sqlx::query_as::<_, Blog>(
        r#"
        INSERT INTO blogs (title, body, author_id, category, tags, subcategory,
                           is_published, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, title, body, author_id, category, tags, subcategory,
                  is_published, published_at, is_deleted, deleted_at,
                  created_at, updated_at
        "#,
    )
    .bind(request.title.unwrap_or_default())
    .bind(request.body.unwrap_or_default())
    .bind(author_id)
    .bind(request.category.unwrap_or_default())
    .bind(&tags)
    .bind(&subcategory)
    .bind(is_published)
    .bind(published_at)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(blog_id = %blog.id, author_id = %author_id, "blog created");

    Ok((StatusCode::CREATED, Json(blog)))
}

/// List published blogs, optionally narrowed by filters.
///
/// # Endpoint
///
/// `GET /blogs?authorId=...&category=...&tags=a,b&subcategory=c`
///
/// # Behavior
///
/// An implicit base filter restricts results to live, published
/// records. Comma-separated `tags`/`subcategory` lists are AND-matched.
/// An empty-string value for a recognized key is a validation error.
///
/// # Response
///
/// - **Success (200 OK)**: Array of matching blogs
/// - **Error (400)**: Empty or malformed filter value
/// - **Error (404)**: No blogs match
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogFilterQuery>,
) -> Result<Json<Vec<Blog>>, AppError> {
    let filters = blog_service::parse_filters(&query)?;
    let blogs = blog_service::list_blogs(&state.pool, &filters).await?;
    Ok(Json(blogs))
}

/// Update a blog's fields (owner only).
///
/// # Endpoint
///
/// `PUT /blogs/{blog_id}` with the `x-api-key` header
///
/// # Behavior
///
/// Requires at least one of title, body, tags, subcategory,
/// isPublished. Tag/subcategory values are unioned into the existing
/// sets. Publishing stamps `publishedAt`; unpublishing clears it.
///
/// # Response
///
/// - **Success (200 OK)**: The updated record
/// - **Error (400)**: Empty update body
/// - **Error (401)**: Requester does not own the blog
/// - **Error (404)**: No blog with this id
pub async fn update_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(blog_id): Path<Uuid>,
    Json(request): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, AppError> {
    let blog = blog_service::update_blog(&state.pool, blog_id, auth.author_id, request).await?;
    Ok(Json(blog))
}

/// Soft-delete a blog by id (owner only).
///
/// # Endpoint
///
/// `DELETE /blogs/{blog_id}` with the `x-api-key` header
///
/// # Response
///
/// - **Success (200 OK)**: Confirmation message
/// - **Error (401)**: Requester does not own the blog
/// - **Error (404)**: No blog with this id
/// - **Error (409)**: Blog is already deleted (`deletedAt` untouched)
pub async fn delete_blog_by_id(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(blog_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    blog_service::delete_blog_by_id(&state.pool, blog_id, auth.author_id).await?;

    tracing::info!(blog_id = %blog_id, author_id = %auth.author_id, "blog deleted");

    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}

/// Soft-delete blogs matching query filters (owner only).
///
/// # Endpoint
///
/// `DELETE /blogs?category=...&tags=...` with the `x-api-key` header
///
/// # Behavior
///
/// At least one filter key is required. The candidate set matching the
/// filters is restricted to blogs the requester owns that are not yet
/// deleted, and that subset is soft-deleted in one batch.
///
/// # Response
///
/// - **Success (200 OK)**: Confirmation with the number deleted
/// - **Error (400)**: No filters, or an empty/malformed filter value
/// - **Error (404)**: Nothing owned by the requester matched
pub async fn delete_blogs_by_query(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<BlogFilterQuery>,
) -> Result<Json<Value>, AppError> {
    if query.is_empty() {
        return Err(AppError::InvalidRequest(
            "No filters passed for deletion".into(),
        ));
    }
    let filters = blog_service::parse_filters(&query)?;
    let deleted = blog_service::delete_blogs_by_query(&state.pool, &filters, auth.author_id).await?;

    tracing::info!(author_id = %auth.author_id, deleted, "blogs deleted by query");

    Ok(Json(
        json!({ "message": "Blogs deleted successfully", "deleted": deleted }),
    ))
}
