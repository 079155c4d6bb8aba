//! Pagination module
//!
//! Supports: list, dict and keyset sources behind one [`Pager`] front end
//!
//! # Overview
//!
//! List and dict sources page by zero-based position over in-memory data.
//! Keyset sources page by an actual key value: each page fetches `size + 1`
//! rows starting at the cursor and the extra row's key becomes the next
//! cursor, so page cost does not grow with page depth. Out-of-range cursors
//! produce empty pages instead of errors.

mod pagers;
mod types;

pub use pagers::{
    get_next_id, DictSource, KeysetQuery, NextLink, PageSource, Pager, DEFAULT_CURRENT_ID,
    DEFAULT_MAX_SIZE, DEFAULT_SIZE, REL_NEXT,
};
pub use types::{
    KeysetSource, PageArgs, PageData, PaginatedResult, PagerInfo, PaginationParameters,
};
