//! # Tasklet Module
//!
//! Tasklets are single-task operations that don't follow the chunk-oriented processing pattern.
//! The feed job ends with one of them: writing the assembled catalog.

/// Catalog rendering and file output.
pub mod catalog;
