// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # i-VIS Core
//!
//! Shared infrastructure for i-VIS data integration services: version
//! tracking for upstream data sources, keyset and offset pagination,
//! environment-backed configuration, and the file and naming helpers the
//! ingest pipeline is built on.
//!
//! ## Features
//!
//! - **Version Tracking**: Parse date and semantic versions, probe remote
//!   servers for the latest release, persist what is installed
//! - **Pagination**: Keyset pagination with a lookahead sentinel, plus
//!   offset windows over lists and key/value entries
//! - **Configuration**: `I_VIS_`-prefixed environment variables with
//!   central registration and startup checks
//! - **Web Helpers**: API error payloads, flash messages, redirect safety
//! - **File Utilities**: SHA-256 digests, directory statistics, name
//!   normalization
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ivis_core::store::VersionStore;
//! use ivis_core::version::{by_selector, Version};
//!
//! fn main() -> ivis_core::Result<()> {
//!     // Probe the release page for the latest upstream version
//!     let text = by_selector("https://example.org/releases", "span.version")?;
//!     let latest = Version::parse(&text)?;
//!
//!     // Compare against what is installed
//!     let mut store = VersionStore::open("versions.json")?;
//!     if store.needs_refresh("clinvar", &latest) {
//!         // ... download and ingest the new release ...
//!         store.record("clinvar", &latest);
//!         store.save()?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┬────────────┬───────────────┬────────────────┐
//! │  Version   │ Pagination │ Configuration │     Files      │
//! ├────────────┼────────────┼───────────────┼────────────────┤
//! │ Date       │ Keyset     │ Registry      │ SHA-256        │
//! │ Semantic   │ List       │ Defaults      │ Sizes          │
//! │ Remote     │ Dict       │ Env checks    │ Naming         │
//! │ Store      │ Links      │               │                │
//! └────────────┴────────────┴───────────────┴────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the library
pub mod error;

/// Common types and type aliases
pub mod types;

/// Environment-backed configuration registry
pub mod config;

/// Version parsing, comparison, and remote detection
pub mod version;

/// Persisted data-source versions
pub mod store;

/// Keyset and offset pagination
pub mod pagination;

/// Web API error payloads, flash messages, and redirect checks
pub mod web;

/// File digests, sizes, and directory statistics
pub mod files;

/// Name normalization for classes, tables, and files
pub mod naming;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use pagination::Pager;
pub use store::VersionStore;
pub use version::Version;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
