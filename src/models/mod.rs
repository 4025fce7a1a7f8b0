//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Registered author model
pub mod author;
/// Blog post model
pub mod blog;
