//! Core pagination types
//!
//! Parameter, metadata and result containers shared by every pager
//! strategy, plus the storage-side trait keyset pagination runs against.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::types::Links;

// ============================================================================
// Page Arguments
// ============================================================================

/// Raw pagination input, typically deserialized from a query string
///
/// Absent fields fall back to the owning pager's defaults during
/// [`Pager::resolve`](super::Pager::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageArgs {
    /// Requested start cursor
    #[serde(default)]
    pub current_id: Option<u64>,
    /// Requested page size
    #[serde(default)]
    pub size: Option<usize>,
}

impl PageArgs {
    /// Empty arguments, resolving entirely to defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start cursor
    #[must_use]
    pub fn with_current_id(mut self, current_id: u64) -> Self {
        self.current_id = Some(current_id);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

// ============================================================================
// Pagination Parameters
// ============================================================================

/// Validated pagination parameters
///
/// Construction is the only validation seam; every pager assumes the
/// contained values have already been checked here. `current_id` is a
/// zero-based offset for positional sources and an actual key value for
/// keyset sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationParameters {
    /// Start cursor
    pub current_id: u64,
    /// Page size
    pub size: usize,
    /// Upper bound `size` was validated against
    pub max_size: usize,
}

impl PaginationParameters {
    /// Create validated parameters
    ///
    /// Fails when `size` is outside `1..=max_size`.
    pub fn new(current_id: u64, size: usize, max_size: usize) -> Result<Self> {
        if size == 0 || size > max_size {
            return Err(Error::size_out_of_range(size, max_size));
        }
        Ok(Self {
            current_id,
            size,
            max_size,
        })
    }
}

// ============================================================================
// Pager Info
// ============================================================================

/// Page metadata attached to every paginated result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerInfo {
    /// Parameters the page was computed with
    pub pagination_params: PaginationParameters,
    /// Total number of items in the source, when known
    pub total: Option<u64>,
    /// Cursor of the next page, when one exists
    pub next_id: Option<u64>,
}

impl PagerInfo {
    /// Metadata with unknown total and no next page
    pub fn new(pagination_params: PaginationParameters) -> Self {
        Self {
            pagination_params,
            total: None,
            next_id: None,
        }
    }

    /// Set the source total
    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the next-page cursor
    #[must_use]
    pub fn with_next_id(mut self, next_id: Option<u64>) -> Self {
        self.next_id = next_id;
        self
    }

    /// Number of pages in the source
    ///
    /// `None` when the total is unknown, otherwise `ceil(total / size)` with
    /// the size read from the carried parameters. Derived on demand, so it
    /// cannot drift from `total`.
    pub fn pages(&self) -> Option<u64> {
        self.total
            .map(|total| total.div_ceil(self.pagination_params.size as u64))
    }
}

impl Serialize for PagerInfo {
    // Serialized by hand so the derived `pages` field shows up too.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PagerInfo", 4)?;
        state.serialize_field("pagination_params", &self.pagination_params)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("next_id", &self.next_id)?;
        state.serialize_field("pages", &self.pages())?;
        state.end()
    }
}

// ============================================================================
// Paginated Result
// ============================================================================

/// One page of items plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    /// Items on this page
    pub results: Vec<T>,
    /// Page metadata
    pub pager_info: PagerInfo,
    /// Keys matching `results` by position, for mapping-backed sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    /// Relation name to URI links, e.g. `next`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl<T> PaginatedResult<T> {
    /// Result without keys or links
    pub fn new(results: Vec<T>, pager_info: PagerInfo) -> Self {
        Self {
            results,
            pager_info,
            keys: None,
            links: None,
        }
    }

    /// Attach the keys matching `results`
    #[must_use]
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Attach links
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Borrowed view of the page data
    ///
    /// Mapping-backed pages pair each key with its item in page order; plain
    /// pages expose the items directly.
    pub fn data(&self) -> PageData<'_, T> {
        match &self.keys {
            Some(keys) => PageData::Entries(
                keys.iter()
                    .map(String::as_str)
                    .zip(self.results.iter())
                    .collect(),
            ),
            None => PageData::Items(&self.results),
        }
    }
}

/// Borrowed view over the data of one page
#[derive(Debug, PartialEq, Eq)]
pub enum PageData<'a, T> {
    /// Key/item pairs in page order, from mapping-backed sources
    Entries(Vec<(&'a str, &'a T)>),
    /// Items only
    Items(&'a [T]),
}

// ============================================================================
// Keyset Source
// ============================================================================

/// Storage-side contract for keyset pagination
///
/// Implementations expose rows sorted ascending by a numeric key column.
/// The pager never verifies ordering or uniqueness; a non-monotonic key
/// silently produces overlapping or skipped pages.
pub trait KeysetSource {
    /// Row type produced by the source
    type Row;

    /// Total number of rows in the unfiltered source
    ///
    /// Called once per page and may require a full count upstream. Cache or
    /// approximate the value when exactness is not required.
    fn total(&self) -> Result<u64>;

    /// Up to `limit` rows with key >= `cursor`, ascending by key
    fn rows_from(&self, cursor: u64, limit: usize) -> Result<Vec<Self::Row>>;

    /// Key value of a fetched row
    fn key_of(&self, row: &Self::Row) -> u64;
}
