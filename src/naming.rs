//! Naming helpers
//!
//! Conversions between the names a data source exposes (URLs, archive
//! names, display labels) and the names the platform uses for plugin
//! classes, tables and files on disk.

use std::sync::LazyLock;

use convert_case::{Case, Casing};
use regex::{Captures, Regex};
use url::Url;

use crate::error::Result;

static CLASS_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("([ _-]*)([^ _-]+)").unwrap());

static LEADING_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new("^ +").unwrap());
static SPACE_OR_SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new("[ /]+").unwrap());
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^0-9a-zA-Z_.]+").unwrap());

// ============================================================================
// Identifier Names
// ============================================================================

/// UpperCamelCase class name for a raw name
///
/// Splits on spaces, underscores and dashes, capitalizes the first letter
/// of each part and keeps the rest as written, so `my_XML plugin` becomes
/// `MyXMLPlugin`.
pub fn class_name(name: &str) -> String {
    CLASS_NAME_PATTERN
        .replace_all(name, |captures: &Captures<'_>| capitalize(&captures[2]))
        .into_owned()
}

/// snake_case rendition of a name
pub fn snake_case(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// Database table name for a data file
///
/// Takes the base name up to the first dot and snake-cases it, so
/// `/data/VariantSummary.txt.gz` maps to `variant_summary`.
pub fn table_name(file_name: &str) -> String {
    let (_, base) = split_file_name(file_name);
    let stem = base.split('.').next().unwrap_or(base);
    snake_case(stem)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// File Names
// ============================================================================

/// Local file name for a download URL
///
/// Snake-cases the last path segment while keeping its extension dots, so
/// `https://host/pub/VariantSummary.txt.gz` maps to
/// `variant_summary.txt.gz`. Query strings and fragments are ignored.
pub fn url_file_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let basename = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let parts: Vec<String> = basename.split('.').map(snake_case).collect();
    Ok(parts.join("."))
}

/// Prefix a file name, keeping its directory
///
/// The base name loses any leading underscores. With a tag the prefix
/// becomes `{prefix}-{tag}`, so `/dir/_file.txt` with prefix `backup` and
/// tag `old` maps to `/dir/backup-old-file.txt`.
pub fn prefix_file_name(path: &str, prefix: &str, tag: Option<&str>) -> String {
    let (dir, base) = split_file_name(path);
    let base = base.trim_start_matches('_');
    match tag {
        Some(tag) => format!("{dir}{prefix}-{tag}-{base}"),
        None => format!("{dir}{prefix}-{base}"),
    }
}

/// Replace the suffix of a file name
///
/// Without `old_suffix` the extension is guessed, so `test.txt.gz` with an
/// empty new suffix becomes `test.txt`. A file without an extension gets
/// the new suffix appended. An `old_suffix` that does not match leaves the
/// name unchanged.
pub fn replace_suffix(path: &str, new_suffix: &str, old_suffix: Option<&str>) -> String {
    let old_suffix = match old_suffix {
        Some(suffix) => suffix.to_string(),
        None => extension_of(path),
    };
    if old_suffix.is_empty() {
        return format!("{path}{new_suffix}");
    }
    match path.strip_suffix(&old_suffix) {
        Some(stem) => format!("{stem}{new_suffix}"),
        None => path.to_string(),
    }
}

/// Clean a raw label into a safe file name
///
/// Drops leading spaces, turns space and slash runs into single
/// underscores and removes everything else outside `[0-9a-zA-Z_.]`.
pub fn clean_file_name(name: &str) -> String {
    let name = LEADING_SPACES.replace_all(name, "");
    let name = SPACE_OR_SLASH.replace_all(&name, "_");
    UNSAFE_CHARS.replace_all(&name, "").into_owned()
}

fn split_file_name(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..=index], &path[index + 1..]),
        None => ("", path),
    }
}

fn extension_of(path: &str) -> String {
    let (_, base) = split_file_name(path);
    match base.rfind('.') {
        // A leading dot marks a hidden file, not an extension.
        Some(index) if index > 0 => base[index..].to_string(),
        _ => String::new(),
    }
}
