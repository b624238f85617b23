//! Product feed domain: catalog records, row mapping, text cleanup and
//! `yml_catalog` rendering.

/// Closing of unterminated HTML tags.
pub mod balancer;

/// Aggregation of mapped records into the shop.
pub mod assembler;

/// Fixed feed settings.
pub mod config;

/// HTML tokenizing and character reference decoding.
pub mod html;

/// Feed job wiring: sheets in, catalog file out.
#[cfg(feature = "xlsx")]
pub mod job;

/// Positional mapping of sheet rows to records.
pub mod mapper;

/// Catalog records.
pub mod model;

/// Item processors used by the feed steps.
pub mod processor;

/// Description cleanup.
pub mod sanitizer;

/// `yml_catalog` document rendering and output.
pub mod serializer;
