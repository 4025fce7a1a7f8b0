//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle token issuance/verification, filter-query construction,
//! and the soft-delete and publication rules for blogs.

pub mod blog_service;
pub mod token_service;
