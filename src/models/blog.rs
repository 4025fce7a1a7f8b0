//! Blog data models and API request/response types.
//!
//! This module defines:
//! - `Blog`: Database entity representing a blog post
//! - `CreateBlogRequest` / `UpdateBlogRequest`: Request bodies
//! - `BlogFilterQuery`: Query-string filters shared by list and
//!   delete-by-query endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a blog record from the database.
///
/// # Database Table
///
/// Maps to the `blogs` table. Each blog:
/// - Belongs to exactly one author (via `author_id`)
/// - Carries set-valued `tags` and `subcategory` columns (TEXT[]),
///   de-duplicated on write
/// - Is soft-deleted only: `is_deleted` + `deleted_at` flag the record,
///   the row is never removed
///
/// # Publication Timestamp
///
/// `published_at` is coupled to `is_published`: it is set to the current
/// instant exactly when `is_published` transitions to true and cleared
/// to NULL when it transitions to false.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    /// Unique identifier for this blog
    pub id: Uuid,

    /// Blog title
    pub title: String,

    /// Blog body text
    pub body: String,

    /// Author who owns this blog.
    ///
    /// Every mutation and deletion checks this against the requesting
    /// author's id. A mismatch is an authorization error, never a no-op.
    pub author_id: Uuid,

    /// Required category label
    pub category: String,

    /// Tag set (de-duplicated, order-irrelevant)
    pub tags: Vec<String>,

    /// Subcategory set (de-duplicated, order-irrelevant)
    pub subcategory: Vec<String>,

    /// Whether this blog is visible in listings
    pub is_published: bool,

    /// Instant the blog was last published, NULL while unpublished
    pub published_at: Option<DateTime<Utc>>,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Instant the blog was soft-deleted, NULL while live
    pub deleted_at: Option<DateTime<Utc>>,

    /// Timestamp when the blog was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new blog.
///
/// Fields are optional at the deserialization layer so the handler can
/// report missing fields with precise messages; `author_id` arrives as a
/// string and is parsed so a malformed id yields a validation error
/// rather than a deserialization failure.
///
/// # JSON Example
///
/// ```json
/// {
///   "title": "Learning Rust",
///   "body": "Ownership is...",
///   "authorId": "550e8400-e29b-41d4-a716-446655440000",
///   "category": "tech",
///   "tags": ["rust", "web"],
///   "subcategory": ["tutorial"],
///   "isPublished": false
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_id: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub subcategory: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Request body for updating a blog.
///
/// At least one field must be present. Tags and subcategory are
/// *additive*: supplied values are unioned with the existing set rather
/// than replacing it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub subcategory: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl UpdateBlogRequest {
    /// True when no updatable field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tags.is_none()
            && self.subcategory.is_none()
            && self.is_published.is_none()
    }
}

/// Raw query-string filters for `GET /blogs` and `DELETE /blogs`.
///
/// All values arrive as strings. An *absent* key means "no filter", but
/// an *empty-string* value for a recognized key is rejected as a
/// validation error rather than silently ignored; the distinction is why
/// these are `Option<String>` instead of typed fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFilterQuery {
    pub author_id: Option<String>,
    pub category: Option<String>,
    /// Comma-separated list; all listed tags must be present on a record
    pub tags: Option<String>,
    /// Comma-separated list, same AND semantics as `tags`
    pub subcategory: Option<String>,
    /// "true"/"false"; only honored by delete-by-query
    pub is_published: Option<String>,
}

impl BlogFilterQuery {
    /// True when no recognized filter key was supplied.
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.subcategory.is_none()
            && self.is_published.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_knows_when_it_is_empty() {
        assert!(UpdateBlogRequest::default().is_empty());

        let request = UpdateBlogRequest {
            is_published: Some(true),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }

    #[test]
    fn filter_query_knows_when_it_is_empty() {
        assert!(BlogFilterQuery::default().is_empty());

        let query = BlogFilterQuery {
            category: Some(String::new()),
            ..Default::default()
        };
        // An empty-string value still counts as a supplied key; rejecting
        // it is the filter parser's job.
        assert!(!query.is_empty());
    }

    #[test]
    fn request_fields_use_camel_case_keys() {
        let request: CreateBlogRequest = serde_json::from_str(
            r#"{"title":"T","body":"B","authorId":"550e8400-e29b-41d4-a716-446655440000",
                "category":"C","isPublished":true}"#,
        )
        .unwrap();
        assert_eq!(
            request.author_id.as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440000")
        );
        assert_eq!(request.is_published, Some(true));
    }
}
