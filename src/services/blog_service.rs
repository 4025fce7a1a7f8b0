//! Blog service - filter-query construction and blog lifecycle rules.
//!
//! This service owns the pieces of blog handling that are more than
//! storage glue:
//! - Parsing raw query-string filters into typed filters (rejecting
//!   empty-string values instead of silently ignoring them)
//! - The implicit base filter for listings (live, published records only)
//! - The ownership check on every mutation and deletion
//! - The coupling between `is_published` and `published_at`
//! - Soft deletion, by id and by filter batch

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::blog::{Blog, BlogFilterQuery, UpdateBlogRequest},
    validators,
};

/// Typed blog filters, parsed from [`BlogFilterQuery`].
///
/// `None` means "no constraint". Tag and subcategory lists are
/// AND-matched: every listed value must be present on a record.
#[derive(Debug, Default, PartialEq)]
pub struct BlogFilters {
    pub author_id: Option<Uuid>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub subcategory: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Parse raw query-string filters into typed filters.
///
/// An absent key applies no constraint, but an empty or blank value for
/// a recognized key is a validation error: the caller asked to filter
/// and supplied nothing to filter by.
///
/// # Errors
///
/// - `InvalidRequest` for empty values, a malformed `authorId`, or an
///   `isPublished` value that is not `true`/`false`
pub fn parse_filters(query: &BlogFilterQuery) -> Result<BlogFilters, AppError> {
    let mut filters = BlogFilters::default();

    if let Some(author_id) = query.author_id.as_deref() {
        if author_id.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "authorId cannot be empty while filtering".to_string(),
            ));
        }
        let parsed = Uuid::parse_str(author_id.trim()).map_err(|_| {
            AppError::InvalidRequest(format!("{author_id} is not a valid author id"))
        })?;
        filters.author_id = Some(parsed);
    }

    if let Some(category) = query.category.as_deref() {
        if category.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "category cannot be empty while filtering".to_string(),
            ));
        }
        filters.category = Some(category.trim().to_string());
    }

    if let Some(tags) = query.tags.as_deref() {
        let items = validators::split_csv(tags);
        if items.is_empty() {
            return Err(AppError::InvalidRequest(
                "tags cannot be empty while filtering".to_string(),
            ));
        }
        filters.tags = Some(items);
    }

    if let Some(subcategory) = query.subcategory.as_deref() {
        let items = validators::split_csv(subcategory);
        if items.is_empty() {
            return Err(AppError::InvalidRequest(
                "subcategory cannot be empty while filtering".to_string(),
            ));
        }
        filters.subcategory = Some(items);
    }

    if let Some(is_published) = query.is_published.as_deref() {
        filters.is_published = Some(match is_published.trim() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(AppError::InvalidRequest(
                    "isPublished must be true or false".to_string(),
                ));
            }
        });
    }

    Ok(filters)
}

/// Compute the publication timestamp after an update.
///
/// - became published: stamp with the current instant
/// - became unpublished: clear to NULL
/// - otherwise: keep the existing value
pub fn next_published_at(
    currently_published: bool,
    current_published_at: Option<DateTime<Utc>>,
    requested: Option<bool>,
) -> Option<DateTime<Utc>> {
    match requested {
        Some(true) if !currently_published => Some(Utc::now()),
        Some(false) => None,
        _ => current_published_at,
    }
}

/// All columns of the `blogs` table, in declaration order.
const BLOG_COLUMNS: &str = "id, title, body, author_id, category, tags, subcategory, \
     is_published, published_at, is_deleted, deleted_at, created_at, updated_at";

/// List blogs matching the given filters.
///
/// An implicit base filter restricts results to live, published records
/// (`is_deleted = false AND is_published = true`); the caller's filters
/// narrow further. Tag containment (`@>`) gives the AND semantics.
///
/// # Errors
///
/// - `NotFound` when the result set is empty
pub async fn list_blogs(pool: &DbPool, filters: &BlogFilters) -> Result<Vec<Blog>, AppError> {
    let blogs = sqlx::query_as::<_, Blog>(&format!(
        r#"
        SELECT {BLOG_COLUMNS}
        FROM blogs
        WHERE is_deleted = false
          AND is_published = true
          AND ($1::uuid IS NULL OR author_id = $1)
          AND ($2::text IS NULL OR category = $2)
          AND ($3::text[] IS NULL OR tags @> $3)
          AND ($4::text[] IS NULL OR subcategory @> $4)
        ORDER BY created_at DESC
        "#
    ))
    .bind(filters.author_id)
    .bind(&filters.category)
    .bind(&filters.tags)
    .bind(&filters.subcategory)
    .fetch_all(pool)
    .await?;

    if blogs.is_empty() {
        return Err(AppError::NotFound("No blogs found".to_string()));
    }
    Ok(blogs)
}

/// Update a blog on behalf of the requesting author.
///
/// # Process
///
/// 1. Load the target; missing blog is a 404
/// 2. Verify the requester owns it; mismatch is an authorization error
///    and the record is left unchanged
/// 3. Require at least one updatable field
/// 4. Apply the update: title/body replace, tags/subcategory union into
///    the existing set, `published_at` follows `is_published` transitions
///
/// # Errors
///
/// - `NotFound`: no blog with this id
/// - `Forbidden`: requester is not the owner
/// - `InvalidRequest`: empty update body
pub async fn update_blog(
    pool: &DbPool,
    blog_id: Uuid,
    author_id: Uuid,
    request: UpdateBlogRequest,
) -> Result<Blog, AppError> {
    let blog = find_blog(pool, blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No blog found with this id".to_string()))?;

    if blog.author_id != author_id {
        return Err(AppError::Forbidden);
    }

    if request.is_empty() {
        return Err(AppError::InvalidRequest(
            "Provide at least one field to update".to_string(),
        ));
    }

    let published_at =
        next_published_at(blog.is_published, blog.published_at, request.is_published);
    let tags = request.tags.map(validators::dedup);
    let subcategory = request.subcategory.map(validators::dedup);

    // Tag and subcategory updates are additive: new values are unioned
    // into the existing set, matching the contract clients depend on.
    let updated = sqlx::query_as::<_, Blog>(&format!(
        r#"
        UPDATE blogs
        SET title = COALESCE($1, title),
            body = COALESCE($2, body),
            tags = CASE WHEN $3::text[] IS NULL THEN tags
                        ELSE ARRAY(SELECT DISTINCT t FROM unnest(tags || $3) AS t) END,
            subcategory = CASE WHEN $4::text[] IS NULL THEN subcategory
                               ELSE ARRAY(SELECT DISTINCT s FROM unnest(subcategory || $4) AS s) END,
            is_published = COALESCE($5, is_published),
            published_at = $6,
            updated_at = NOW()
        WHERE id = $7
        RETURNING {BLOG_COLUMNS}
        "#
    ))
    .bind(request.title)
    .bind(request.body)
    .bind(tags)
    .bind(subcategory)
    .bind(request.is_published)
    .bind(published_at)
    .bind(blog_id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Soft-delete a blog by id on behalf of the requesting author.
///
/// # Errors
///
/// - `NotFound`: no blog with this id
/// - `Forbidden`: requester is not the owner
/// - `Conflict`: already soft-deleted; `deleted_at` is left untouched
pub async fn delete_blog_by_id(
    pool: &DbPool,
    blog_id: Uuid,
    author_id: Uuid,
) -> Result<(), AppError> {
    let blog = find_blog(pool, blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No blog found with this id".to_string()))?;

    if blog.author_id != author_id {
        return Err(AppError::Forbidden);
    }

    if blog.is_deleted {
        return Err(AppError::Conflict(
            "Blog has already been deleted".to_string(),
        ));
    }

    sqlx::query(
        r#"
        UPDATE blogs
        SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(blog_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Soft-delete every blog matching the filters that the requesting
/// author owns and has not yet deleted.
///
/// The candidate set comes from the caller's filters; the ownership and
/// not-yet-deleted restrictions are applied on top, and the surviving
/// subset is soft-deleted in one batch statement.
///
/// # Returns
///
/// The number of blogs deleted.
///
/// # Errors
///
/// - `NotFound` when the restricted subset is empty (nothing matched,
///   nothing owned, or everything already deleted)
pub async fn delete_blogs_by_query(
    pool: &DbPool,
    filters: &BlogFilters,
    author_id: Uuid,
) -> Result<u64, AppError> {
    let deleted = sqlx::query(
        r#"
        UPDATE blogs
        SET is_deleted = true, deleted_at = NOW(), updated_at = NOW()
        WHERE author_id = $1
          AND is_deleted = false
          AND ($2::uuid IS NULL OR author_id = $2)
          AND ($3::text IS NULL OR category = $3)
          AND ($4::text[] IS NULL OR tags @> $4)
          AND ($5::text[] IS NULL OR subcategory @> $5)
          AND ($6::bool IS NULL OR is_published = $6)
        "#,
    )
    .bind(author_id)
    .bind(filters.author_id)
    .bind(&filters.category)
    .bind(&filters.tags)
    .bind(&filters.subcategory)
    .bind(filters.is_published)
    .execute(pool)
    .await?
    .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(
            "No matching blog found, or it has already been deleted".to_string(),
        ));
    }
    Ok(deleted)
}

/// Fetch a blog by id, deleted or not.
async fn find_blog(pool: &DbPool, blog_id: Uuid) -> Result<Option<Blog>, AppError> {
    let blog = sqlx::query_as::<_, Blog>(&format!(
        "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
    ))
    .bind(blog_id)
    .fetch_optional(pool)
    .await?;
    Ok(blog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_with_category(value: &str) -> BlogFilterQuery {
        BlogFilterQuery {
            category: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn absent_keys_apply_no_constraint() {
        let filters = parse_filters(&BlogFilterQuery::default()).unwrap();
        assert_eq!(filters, BlogFilters::default());
    }

    #[test]
    fn empty_category_is_a_validation_error_not_no_filter() {
        assert!(matches!(
            parse_filters(&query_with_category("")),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            parse_filters(&query_with_category("   ")),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn category_is_trimmed() {
        let filters = parse_filters(&query_with_category(" tech ")).unwrap();
        assert_eq!(filters.category.as_deref(), Some("tech"));
    }

    #[test]
    fn author_id_must_be_a_well_formed_id() {
        let query = BlogFilterQuery {
            author_id: Some("not-a-uuid".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            parse_filters(&query),
            Err(AppError::InvalidRequest(_))
        ));

        let id = Uuid::new_v4();
        let query = BlogFilterQuery {
            author_id: Some(id.to_string()),
            ..Default::default()
        };
        assert_eq!(parse_filters(&query).unwrap().author_id, Some(id));
    }

    #[test]
    fn tags_are_split_trimmed_and_deduped() {
        let query = BlogFilterQuery {
            tags: Some("rust, web,rust".to_string()),
            ..Default::default()
        };
        let filters = parse_filters(&query).unwrap();
        assert_eq!(
            filters.tags,
            Some(vec!["rust".to_string(), "web".to_string()])
        );
    }

    #[test]
    fn blank_tag_list_is_rejected() {
        let query = BlogFilterQuery {
            tags: Some(" , ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            parse_filters(&query),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn is_published_filter_must_be_boolean() {
        let query = BlogFilterQuery {
            is_published: Some("yes".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            parse_filters(&query),
            Err(AppError::InvalidRequest(_))
        ));

        let query = BlogFilterQuery {
            is_published: Some("true".to_string()),
            ..Default::default()
        };
        assert_eq!(parse_filters(&query).unwrap().is_published, Some(true));
    }

    #[test]
    fn publishing_stamps_the_current_instant() {
        let stamped = next_published_at(false, None, Some(true));
        assert!(stamped.is_some());
        let age = Utc::now() - stamped.unwrap();
        assert!(age.num_seconds() < 5);
    }

    #[test]
    fn unpublishing_clears_the_timestamp() {
        let existing = Some(Utc::now());
        assert_eq!(next_published_at(true, existing, Some(false)), None);
    }

    #[test]
    fn republishing_keeps_the_original_timestamp() {
        let existing = Some(Utc::now() - chrono::TimeDelta::days(3));
        assert_eq!(next_published_at(true, existing, Some(true)), existing);
    }

    #[test]
    fn untouched_publication_state_is_preserved() {
        let existing = Some(Utc::now());
        assert_eq!(next_published_at(true, existing, None), existing);
        assert_eq!(next_published_at(false, None, None), None);
    }
}
