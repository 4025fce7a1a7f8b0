//! Author registration and login HTTP handlers.
//!
//! This module implements the author-related API endpoints:
//! - POST /authors - Register a new author
//! - POST /login - Exchange credentials for an auth token

use axum::{Json, extract::State, http::StatusCode, response::AppendHeaders};

use crate::{
    error::AppError,
    middleware::auth::AUTH_HEADER,
    models::author::{Author, LoginRequest, LoginResponse, RegisterAuthorRequest},
    state::AppState,
    validators,
};

/// Register a new author.
///
/// # Endpoint
///
/// `POST /authors`
///
/// # Request Body
///
/// ```json
/// {
///   "fname": "Jane",
///   "lname": "Doe",
///   "title": "Mrs",
///   "email": "jane@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Validation
///
/// Fields are checked in a fixed priority order and the first failure
/// is reported: fname, lname, title presence, title enum membership,
/// email presence, email format, password presence.
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created record verbatim.
///   Note the stored password is echoed back; see DESIGN.md.
/// - **Error (400)**: A field failed validation
/// - **Error (409)**: Email is already registered
pub async fn register_author(
    State(state): State<AppState>,
    Json(request): Json<RegisterAuthorRequest>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    if !validators::has_content(request.fname.as_deref()) {
        return Err(AppError::InvalidRequest("First name is required".into()));
    }
    if !validators::has_content(request.lname.as_deref()) {
        return Err(AppError::InvalidRequest("Last name is required".into()));
    }
    if !validators::has_content(request.title.as_deref()) {
        return Err(AppError::InvalidRequest("Title is required".into()));
    }
    let title = request.title.unwrap_or_default();
    if !validators::is_valid_title(&title) {
        return Err(AppError::InvalidRequest(
            "Title should be among Mr, Mrs, Miss and Mast".into(),
        ));
    }
    if !validators::has_content(request.email.as_deref()) {
        return Err(AppError::InvalidRequest("Email is required".into()));
    }
    let email = request.email.unwrap_or_default();
    if !validators::is_valid_email(&email) {
        return Err(AppError::InvalidRequest(
            "Email should be a valid email address".into(),
        ));
    }
    if !validators::has_content(request.password.as_deref()) {
        return Err(AppError::InvalidRequest("Password is required".into()));
    }

    // Emails are unique; report a duplicate before attempting the insert
    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE email = $1)")
            .bind(&email)
            .fetch_one(&state.pool)
            .await?;
    if email_taken {
        return Err(AppError::Conflict(format!(
            "{email} email address is already registered"
        )));
    }

    let author = sqlx::query_as::<_, Author>(
        r#"
        INSERT INTO authors (fname, lname, title, email, password)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, fname, lname, title, email, password, created_at
        "#,
    )
    .bind(request.fname.unwrap_or_default())
    .bind(request.lname.unwrap_or_default())
    .bind(title)
    .bind(email)
    .bind(request.password.unwrap_or_default())
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(author_id = %author.id, "author registered");

    Ok((StatusCode::CREATED, Json(author)))
}

/// Exchange author credentials for an auth token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Matching
///
/// Credentials match by exact equality of email AND password in one
/// query; any miss is an authentication failure. The comparison is
/// plaintext, per the stored-credential contract flagged in DESIGN.md.
///
/// # Response
///
/// - **Success (200 OK)**: `{"token": "..."}`, with the same token set
///   in the `x-api-key` response header
/// - **Error (400)**: Missing or malformed credentials
/// - **Error (401)**: No author matches the credentials
pub async fn login_author(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !validators::has_content(request.email.as_deref()) {
        return Err(AppError::InvalidRequest("Email is required".into()));
    }
    let email = request.email.unwrap_or_default();
    if !validators::is_valid_email(&email) {
        return Err(AppError::InvalidRequest(
            "Email should be a valid email address".into(),
        ));
    }
    if !validators::has_content(request.password.as_deref()) {
        return Err(AppError::InvalidRequest("Password is required".into()));
    }

    let author = sqlx::query_as::<_, Author>(
        r#"
        SELECT id, fname, lname, title, email, password, created_at
        FROM authors
        WHERE email = $1 AND password = $2
        "#,
    )
    .bind(&email)
    .bind(request.password.unwrap_or_default())
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    let token = state.tokens.issue(author.id)?;

    tracing::info!(author_id = %author.id, "author logged in");

    Ok((
        AppendHeaders([(AUTH_HEADER, token.clone())]),
        Json(LoginResponse { token }),
    ))
}
