//! Author data models and API request/response types.
//!
//! This module defines:
//! - `Author`: Database entity representing a registered author
//! - `RegisterAuthorRequest`: Request body for registration
//! - `LoginRequest` / `LoginResponse`: Login credential exchange

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an author record from the database.
///
/// # Database Table
///
/// Maps to the `authors` table. Authors are immutable after creation:
/// no update or delete endpoint exists for them.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "fname": "Jane",
///   "lname": "Doe",
///   "title": "Mrs",
///   "email": "jane@example.com",
///   "password": "plaintext",
///   "createdAt": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique identifier for this author
    pub id: Uuid,

    /// First name
    pub fname: String,

    /// Last name
    pub lname: String,

    /// Honorific, one of Mr/Mrs/Miss/Mast (validated on registration)
    pub title: String,

    /// Email address, unique across all authors
    pub email: String,

    /// Login credential.
    ///
    /// Stored in plaintext and compared by equality at login, and echoed
    /// back in the registration response. This is a known weakness carried
    /// over from the original service contract; see DESIGN.md.
    pub password: String,

    /// Timestamp when the author registered
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a new author.
///
/// All fields are optional at the deserialization layer so the handler
/// can report missing fields in a fixed priority order (fname, lname,
/// title, email, password) instead of rejecting the body wholesale.
///
/// # JSON Example
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
#[derive(Debug, Default, Deserialize)]
pub struct RegisterAuthorRequest {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for author login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful login.
///
/// The same token is also set in the `x-api-key` response header.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
