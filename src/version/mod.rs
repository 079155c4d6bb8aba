//! Version module
//!
//! Supports: date versions, semantic-style versions and the explicit unknown
//!
//! # Overview
//!
//! Each data source carries a version so refresh runs can tell whether the
//! upstream moved. Versions of the same shape compare against each other;
//! versions of different shapes do not, and `Unknown` compares equal to
//! nothing at all, so a source with an undetermined version always looks
//! stale. The `remote` probes detect current versions over HTTP, either by
//! scraping a release page or by reading the `Last-Modified` header.

mod remote;
mod value;

pub use remote::{by_selector, last_modified, last_modified_with_format, recent, HTTP_DATE_FORMAT};
pub use value::{DateVersion, SemanticVersion, Version, DATE_FORMAT, MAX_VERSION_LENGTH};

#[cfg(test)]
mod tests;
