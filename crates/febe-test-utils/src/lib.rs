//! Shared test utilities for the febe workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: small schemas and documents exercising each constraint
//! - [`docs`]: [`TestDocs`] temporary directory for document files

pub mod docs;
pub mod fixtures;

pub use docs::TestDocs;
