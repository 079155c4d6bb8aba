//! Version values
//!
//! Data-source versions come in three shapes: calendar dates, loose
//! semantic-style strings and an explicit unknown. Versions of the same
//! shape order against each other; versions of different shapes never do.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use crate::error::{Error, Result};

/// Longest accepted input for [`Version::parse`]
pub const MAX_VERSION_LENGTH: usize = 20;

/// Date layout used by date versions, e.g. `2020_05_01`
pub const DATE_FORMAT: &str = "%Y_%m_%d";

const UNKNOWN_LABEL: &str = "Unknown";

static SEMANTIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>\D*)(?P<major>\d+)(?:\.(?P<minor>\d+))?(?:\.(?P<patch>\d+))?(?P<suffix>.*)$")
        .unwrap()
});

// ============================================================================
// Version
// ============================================================================

/// A data-source version
///
/// `Unknown` is deliberately never equal to anything, itself included: an
/// unknown version must never satisfy an up-to-date check, so comparing two
/// unknowns reports neither equality nor an ordering.
#[derive(Debug, Clone)]
pub enum Version {
    /// Version could not be determined
    Unknown,
    /// Calendar-date version, e.g. a nightly build
    Date(DateVersion),
    /// Semantic-style version with optional prefix and suffix
    Semantic(SemanticVersion),
}

impl Version {
    /// Parse a version from text
    ///
    /// Inputs longer than [`MAX_VERSION_LENGTH`] are rejected outright. The
    /// literal `Unknown` round-trips, then date layouts are tried before
    /// semantic ones; a date like `2020_05_01` would otherwise parse as a
    /// semantic version with suffix `_05_01`.
    pub fn parse(input: &str) -> Result<Self> {
        if input.len() > MAX_VERSION_LENGTH {
            return Err(Error::version_parse(input));
        }
        if input == UNKNOWN_LABEL {
            return Ok(Self::Unknown);
        }
        if let Ok(date) = input.parse::<DateVersion>() {
            return Ok(Self::Date(date));
        }
        Ok(Self::Semantic(input.parse()?))
    }

    /// Whether the version was determined at all
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Shape name, used in comparison errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Date(_) => "date",
            Self::Semantic(_) => "semantic",
        }
    }

    /// Compare two versions, failing when no ordering exists
    ///
    /// The operator forms silently answer `false` for incomparable pairs;
    /// callers that must not mistake "unordered" for "not newer" get an
    /// [`Error::Incomparable`] here instead.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        self.partial_cmp(other)
            .ok_or_else(|| Error::incomparable(self.kind(), other.kind()))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Date(left), Self::Date(right)) => left == right,
            (Self::Semantic(left), Self::Semantic(right)) => left == right,
            // Unknown on either side, or mismatched shapes.
            _ => false,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Date(left), Self::Date(right)) => left.partial_cmp(right),
            (Self::Semantic(left), Self::Semantic(right)) => left.partial_cmp(right),
            _ => None,
        }
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Unknown => state.write_u8(0),
            known => known.to_string().hash(state),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
            Self::Date(date) => date.fmt(f),
            Self::Semantic(semantic) => semantic.fmt(f),
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<DateVersion> for Version {
    fn from(date: DateVersion) -> Self {
        Self::Date(date)
    }
}

impl From<SemanticVersion> for Version {
    fn from(semantic: SemanticVersion) -> Self {
        Self::Semantic(semantic)
    }
}

// ============================================================================
// Date Version
// ============================================================================

/// Calendar-date version rendered as [`DATE_FORMAT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateVersion {
    date: NaiveDate,
}

impl DateVersion {
    /// Version for a specific date
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Version for the local date, for nightly-style sources
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month component
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day component
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// The underlying date
    pub fn to_date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for DateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format(DATE_FORMAT))
    }
}

impl FromStr for DateVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self::new)
            .map_err(|_| Error::date_parse(s, DATE_FORMAT))
    }
}

// ============================================================================
// Semantic Version
// ============================================================================

/// Loose semantic-style version: `{prefix}{major}[.{minor}[.{patch}]]{suffix}`
///
/// Equality is equality of the rendered string. Ordering compares major,
/// minor and patch numerically, with a present component ranking above an
/// absent one; prefix and suffix never order, so `v1` and `1-beta` are
/// unequal yet neither is less than the other.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    /// Major component, always present
    pub major: u64,
    /// Minor component
    pub minor: Option<u64>,
    /// Patch component
    pub patch: Option<u64>,
    /// Free-form text before the numbers, e.g. `v`
    pub prefix: String,
    /// Free-form text after the numbers, e.g. `-beta`
    pub suffix: String,
}

impl SemanticVersion {
    /// Version with only a major component
    pub fn new(major: u64) -> Self {
        Self {
            major,
            minor: None,
            patch: None,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Set the minor component
    #[must_use]
    pub fn with_minor(mut self, minor: u64) -> Self {
        self.minor = Some(minor);
        self
    }

    /// Set the patch component
    #[must_use]
    pub fn with_patch(mut self, patch: u64) -> Self {
        self.patch = Some(patch);
        self
    }

    /// Set the prefix text
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the suffix text
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    fn fields_less(&self, other: &Self) -> bool {
        fields_less(&[
            (Some(self.major), Some(other.major)),
            (self.minor, other.minor),
            (self.patch, other.patch),
        ])
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.fields_less(other) {
            Some(Ordering::Less)
        } else if other.fields_less(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        f.write_str(&self.suffix)
    }
}

impl FromStr for SemanticVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = SEMANTIC_PATTERN
            .captures(s)
            .ok_or_else(|| Error::version_parse(s))?;

        let component = |name: &str| -> Result<Option<u64>> {
            captures
                .name(name)
                .map(|m| m.as_str().parse().map_err(|_| Error::version_parse(s)))
                .transpose()
        };

        let major = component("major")?.ok_or_else(|| Error::version_parse(s))?;

        Ok(Self {
            major,
            minor: component("minor")?,
            patch: component("patch")?,
            prefix: captures["prefix"].to_string(),
            suffix: captures["suffix"].to_string(),
        })
    }
}

/// Positional comparison over numeric component pairs
///
/// The first unequal present pair decides numerically. A present component
/// never ranks below an absent one, so `1.1.1 < 1.1` is false while
/// `1.1 < 1.1.1` is true.
fn fields_less(pairs: &[(Option<u64>, Option<u64>)]) -> bool {
    for (left, right) in pairs {
        match (left, right) {
            (Some(left), Some(right)) if left != right => return left < right,
            (Some(_), None) => return false,
            (None, Some(_)) => return true,
            _ => {}
        }
    }
    false
}
