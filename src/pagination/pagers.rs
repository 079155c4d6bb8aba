//! Pager strategies
//!
//! One strategy per source kind, dispatched through [`Pager::paginate`].
//! List and dict sources page by position; keyset sources page by key
//! value with a one-row lookahead, so deep pages stay cheap on large
//! tables.

use tracing::debug;

use super::types::{KeysetSource, PageArgs, PaginatedResult, PagerInfo, PaginationParameters};
use crate::error::{Error, Result};
use crate::types::Links;

/// Default start cursor for keyset pagers (key columns start at 1)
pub const DEFAULT_CURRENT_ID: u64 = 1;
/// Default page size
pub const DEFAULT_SIZE: usize = 50;
/// Default upper bound for requested page sizes
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Link relation under which the next-page URI is published
pub const REL_NEXT: &str = "next";

/// Callback rendering the URI for a next-page cursor
pub type NextLink = dyn Fn(u64) -> String + Send + Sync;

// ============================================================================
// Pager
// ============================================================================

/// Stateless pagination front end
///
/// Carries only default parameter bounds, so one instance can be shared
/// across threads and reused for every request.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    default_current_id: u64,
    default_size: usize,
    max_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// Pager with keyset defaults (start cursor 1)
    pub fn new() -> Self {
        Self {
            default_current_id: DEFAULT_CURRENT_ID,
            default_size: DEFAULT_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Pager with positional defaults (start cursor 0), for list and dict
    /// sources
    pub fn zero_indexed() -> Self {
        Self {
            default_current_id: 0,
            ..Self::new()
        }
    }

    /// Pager with explicit defaults
    ///
    /// Fails when `default_size` is outside `1..=max_size`.
    pub fn with_bounds(default_current_id: u64, default_size: usize, max_size: usize) -> Result<Self> {
        if default_size == 0 || default_size > max_size {
            return Err(Error::size_out_of_range(default_size, max_size));
        }
        Ok(Self {
            default_current_id,
            default_size,
            max_size,
        })
    }

    /// Default start cursor
    pub fn default_current_id(&self) -> u64 {
        self.default_current_id
    }

    /// Default page size
    pub fn default_size(&self) -> usize {
        self.default_size
    }

    /// Largest accepted page size
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Resolve raw query input against the defaults
    ///
    /// Fails when the requested size is outside `1..=max_size`.
    pub fn resolve(&self, args: &PageArgs) -> Result<PaginationParameters> {
        PaginationParameters::new(
            args.current_id.unwrap_or(self.default_current_id),
            args.size.unwrap_or(self.default_size),
            self.max_size,
        )
    }

    /// Compute one page from a source
    ///
    /// Out-of-range cursors yield an empty page, never an error. Only the
    /// keyset strategy can fail, by propagating storage errors.
    pub fn paginate<T: Clone>(
        &self,
        source: PageSource<'_, T>,
        params: &PaginationParameters,
    ) -> Result<PaginatedResult<T>> {
        match source {
            PageSource::List(items) => Ok(paginate_list(items, params)),
            PageSource::Dict(dict) => Ok(paginate_dict(&dict, params)),
            PageSource::Keyset(query) => paginate_keyset(&query, params),
        }
    }
}

// ============================================================================
// Page Sources
// ============================================================================

/// Source wrapper consumed by [`Pager::paginate`]
pub enum PageSource<'a, T> {
    /// Dense in-memory sequence; the cursor is a zero-based offset
    List(&'a [T]),
    /// Ordered key/value entries; the cursor is a zero-based offset
    Dict(DictSource<'a, T>),
    /// Key-sorted storage query; the cursor is an actual key value
    Keyset(KeysetQuery<'a, T>),
}

/// Ordered mapping plus link plumbing for the dict strategy
pub struct DictSource<'a, T> {
    /// Entries in source order
    pub entries: &'a [(String, T)],
    /// Base links copied into the result
    pub links: Links,
    /// Renders the URI for a next-page cursor
    pub next_link: &'a NextLink,
}

impl<'a, T> DictSource<'a, T> {
    /// Dict source without base links
    pub fn new(entries: &'a [(String, T)], next_link: &'a NextLink) -> Self {
        Self {
            entries,
            links: Links::new(),
            next_link,
        }
    }

    /// Attach base links to copy into the result
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }
}

/// Keyset query plus link plumbing for the keyset strategy
pub struct KeysetQuery<'a, T> {
    /// Storage-side source, sorted ascending by key
    pub source: &'a dyn KeysetSource<Row = T>,
    /// Base links copied into the result
    pub links: Links,
    /// Renders the URI for a next-page cursor
    pub next_link: &'a NextLink,
}

impl<'a, T> KeysetQuery<'a, T> {
    /// Keyset query without base links
    pub fn new(source: &'a dyn KeysetSource<Row = T>, next_link: &'a NextLink) -> Self {
        Self {
            source,
            links: Links::new(),
            next_link,
        }
    }

    /// Attach base links to copy into the result
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }
}

// ============================================================================
// Positional Strategies
// ============================================================================

/// Next cursor for dense positional sources
///
/// `None` once `current_id` is at or past the end, and also when the page
/// starting at `current_id` reaches the end. Keyset pages must not use
/// this; their next cursor comes from the lookahead row's key.
pub fn get_next_id(current_id: u64, size: usize, total: u64) -> Option<u64> {
    if current_id >= total {
        return None;
    }
    let next_id = current_id + size as u64;
    if next_id < total {
        Some(next_id)
    } else {
        None
    }
}

/// Clamp the page window `[current_id, current_id + size)` to `len`
fn positional_window(params: &PaginationParameters, len: usize) -> (usize, usize) {
    let start = usize::try_from(params.current_id)
        .unwrap_or(usize::MAX)
        .min(len);
    let end = start.saturating_add(params.size).min(len);
    (start, end)
}

fn paginate_list<T: Clone>(items: &[T], params: &PaginationParameters) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let (start, end) = positional_window(params, items.len());

    let pager_info = PagerInfo::new(*params)
        .with_total(total)
        .with_next_id(get_next_id(params.current_id, params.size, total));

    PaginatedResult::new(items[start..end].to_vec(), pager_info)
}

fn paginate_dict<T: Clone>(
    dict: &DictSource<'_, T>,
    params: &PaginationParameters,
) -> PaginatedResult<T> {
    let total = dict.entries.len() as u64;
    let (start, end) = positional_window(params, dict.entries.len());
    let page = &dict.entries[start..end];

    let keys = page.iter().map(|(key, _)| key.clone()).collect();
    let results = page.iter().map(|(_, item)| item.clone()).collect();

    let next_id = get_next_id(params.current_id, params.size, total);
    let mut links = dict.links.clone();
    if let Some(next_id) = next_id {
        links.insert(REL_NEXT.to_string(), (dict.next_link)(next_id));
    }

    let pager_info = PagerInfo::new(*params)
        .with_total(total)
        .with_next_id(next_id);

    PaginatedResult::new(results, pager_info)
        .with_keys(keys)
        .with_links(links)
}

// ============================================================================
// Keyset Strategy
// ============================================================================

fn paginate_keyset<T>(
    query: &KeysetQuery<'_, T>,
    params: &PaginationParameters,
) -> Result<PaginatedResult<T>> {
    // Unfiltered count; can be expensive on large sources.
    let total = query.source.total()?;
    debug!(
        "Keyset page: cursor {} size {} of {} rows",
        params.current_id, params.size, total
    );

    // Fetch one extra row as the lookahead sentinel. Its key is the next
    // cursor; it is never part of this page.
    let mut rows = query.source.rows_from(params.current_id, params.size + 1)?;

    let next_id = if rows.len() > params.size {
        let next_id = query.source.key_of(&rows[params.size]);
        rows.truncate(params.size);
        Some(next_id)
    } else {
        None
    };

    let mut links = query.links.clone();
    if let Some(next_id) = next_id {
        links.insert(REL_NEXT.to_string(), (query.next_link)(next_id));
    }

    let pager_info = PagerInfo::new(*params)
        .with_total(total)
        .with_next_id(next_id);

    Ok(PaginatedResult::new(rows, pager_info).with_links(links))
}
