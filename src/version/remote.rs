//! Remote version detection
//!
//! Blocking HTTP probes that read a version off a release page or out of a
//! `Last-Modified` header. All probes share one client with a 30 second
//! timeout and make a single attempt; a scheduler that wants retries wraps
//! these calls itself.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::blocking::Client;
use reqwest::{header, StatusCode};
use scraper::{Html, Selector};
use tracing::debug;

use super::value::DateVersion;
use crate::error::{Error, Result};

/// Date layout of the HTTP `Last-Modified` header
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(format!("ivis-core/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

/// Extract version text from an HTML page
///
/// Fetches `url` and returns the text of the first node matching the CSS
/// `selector`, trimmed. A non-200 response or a selector that matches
/// nothing is an error: version detection needs a definite answer.
pub fn by_selector(url: &str, selector: &str) -> Result<String> {
    let parsed = Selector::parse(selector).map_err(|_| Error::invalid_selector(selector))?;

    debug!("Fetching version text from {}", url);
    let response = CLIENT.get(url).send()?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::bad_status(status.as_u16(), url));
    }

    let body = response.text()?;
    let document = Html::parse_document(&body);
    let node = document
        .select(&parsed)
        .next()
        .ok_or_else(|| Error::no_match(selector, url))?;

    Ok(node.text().collect::<String>().trim().to_string())
}

/// Date from the `Last-Modified` header of `url`
///
/// `Ok(None)` when the response is not 200 or carries no header; a source
/// without the header is a property of the endpoint, not a failure. A
/// header that is present but unparseable is an error.
pub fn last_modified(url: &str) -> Result<Option<NaiveDate>> {
    last_modified_with_format(url, HTTP_DATE_FORMAT)
}

/// Date from the `Last-Modified` header with a custom date layout
pub fn last_modified_with_format(url: &str, format: &str) -> Result<Option<NaiveDate>> {
    debug!("Checking Last-Modified of {}", url);
    let response = CLIENT.head(url).send()?;
    if response.status() != StatusCode::OK {
        return Ok(None);
    }

    let Some(value) = response.headers().get(header::LAST_MODIFIED) else {
        return Ok(None);
    };

    let text = String::from_utf8_lossy(value.as_bytes());
    let datetime = NaiveDateTime::parse_from_str(&text, format)
        .map_err(|_| Error::date_parse(text.as_ref(), format))?;
    Ok(Some(datetime.date()))
}

/// Most recent of a set of dates
///
/// `None` when `dates` is empty.
pub fn recent(dates: impl IntoIterator<Item = NaiveDate>) -> Option<NaiveDate> {
    dates.into_iter().max()
}

impl DateVersion {
    /// Date version from the `Last-Modified` header of `url`
    ///
    /// Unlike [`last_modified`], a missing header is an error here: the
    /// caller asked for a version and there is none to give.
    pub fn from_last_modified(url: &str) -> Result<Self> {
        let date = last_modified(url)?.ok_or_else(|| Error::no_last_modified(url))?;
        Ok(Self::new(date))
    }

    /// Date version scraped from an HTML page
    ///
    /// Parses the text of the first node matching the CSS `selector` with
    /// the chrono `format` string.
    pub fn from_selector(url: &str, selector: &str, format: &str) -> Result<Self> {
        let text = by_selector(url, selector)?;
        let date = NaiveDate::parse_from_str(&text, format)
            .map_err(|_| Error::date_parse(&text, format))?;
        Ok(Self::new(date))
    }
}
