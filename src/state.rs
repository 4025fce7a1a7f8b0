//! Shared application state.

use crate::{db::DbPool, services::token_service::TokenService};

/// State shared with every handler and middleware via Axum's `State`
/// extractor.
///
/// Cloning is cheap: the pool is reference-counted and the token
/// service holds only derived keys.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: DbPool,

    /// Auth token issuance/verification service
    pub tokens: TokenService,
}
