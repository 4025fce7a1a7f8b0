//! Auth token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the auth token from the `x-api-key` header
//! 2. Verify the signature and expiration via the token service
//! 3. Inject the authenticated author's identity into the request
//! 4. Reject unauthenticated requests before the handler runs
//!
//! # Rejection Outcomes
//!
//! - No token in the request: 403 Forbidden
//! - Token expired: 401 Unauthorized
//! - Token malformed or wrongly signed: 403 Forbidden

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Request header carrying the auth token.
pub const AUTH_HEADER: &str = "x-api-key";

/// Authentication context attached to authenticated requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers to know who made the request.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    /// ID of the authenticated author.
    ///
    /// Used by the blog handlers to enforce ownership: mutations and
    /// deletions only apply to records whose `author_id` matches.
    pub author_id: Uuid,
}

/// Auth token authentication middleware function.
///
/// # Flow
///
/// 1. Extract the `x-api-key` header from the request
/// 2. Verify signature and expiration in one step via the token service
/// 3. If valid: inject `AuthContext` into request, call next handler
/// 4. If missing/expired/invalid: return the matching auth error
///
/// # Arguments
///
/// * `State(state)` - Shared application state (token service)
/// * `request` - Incoming HTTP request (mutable to add extensions)
/// * `next` - Next middleware/handler in the chain
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::MissingToken | TokenExpired | InvalidToken)` otherwise
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Step 1: Extract the token header
    let token = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingToken)?;

    // Step 2: Verify and resolve the author id
    let author_id = state.tokens.verify(token)?;

    // Step 3: Inject context into request extensions
    // Route handlers can now extract this using Extension<AuthContext>
    request.extensions_mut().insert(AuthContext { author_id });

    // Step 4: Call the next middleware/handler
    Ok(next.run(request).await)
}
