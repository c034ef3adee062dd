//! Catalog use-case service.
//!
//! # Responsibility
//! - Route callers to the store's repositories and queries.
//! - Turn "no such row" into `None` instead of an error.
//!
//! # See also
//! - `repo` for write invariants, `query` for traversal semantics.

pub mod catalog_service;
