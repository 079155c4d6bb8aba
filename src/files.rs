//! File utilities
//!
//! Small filesystem helpers used by loaders and plugins: digests, sizes,
//! line counts, modification times and whole-directory aggregates. The
//! directory aggregates walk the full tree, not just the top level.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};
use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

const HASH_CHUNK_SIZE: usize = 1024 * 64;

// ============================================================================
// Single Files
// ============================================================================

/// SHA-256 digest of a file, as lowercase hex
pub fn sha256(path: impl AsRef<Path>) -> Result<String> {
    let mut hasher = Sha256::new();
    hash_file(&mut hasher, path.as_ref())?;
    Ok(to_hex(&hasher.finalize()))
}

/// Size of a file in bytes
pub fn size(path: impl AsRef<Path>) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Number of lines in a file
///
/// A final line without a trailing newline still counts.
pub fn line_count(path: impl AsRef<Path>) -> Result<u64> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;
    for line in reader.split(b'\n') {
        line?;
        count += 1;
    }
    Ok(count)
}

/// Modification time of a file
pub fn modified(path: impl AsRef<Path>) -> Result<SystemTime> {
    Ok(fs::metadata(path)?.modified()?)
}

/// Modification time of a file in local time
pub fn modified_datetime(path: impl AsRef<Path>) -> Result<DateTime<Local>> {
    Ok(modified(path)?.into())
}

/// Create a directory if it does not exist yet
///
/// Missing parents are created too.
pub fn create_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path)?;
        debug!("Created directory: {}", path.display());
    }
    Ok(())
}

// ============================================================================
// Directory Aggregates
// ============================================================================

/// Total size in bytes of all files under `path`
pub fn path_size(path: impl AsRef<Path>) -> Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(io::Error::from)?.len();
        }
    }
    Ok(total)
}

/// Number of files under `path`
pub fn file_count(path: impl AsRef<Path>) -> Result<u64> {
    let mut count = 0;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Date of the most recently modified file under `path`
///
/// `None` when the tree contains no files.
pub fn latest_modified_date(path: impl AsRef<Path>) -> Result<Option<NaiveDate>> {
    let mut latest: Option<SystemTime> = None;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let modified = entry.metadata().map_err(io::Error::from)?.modified()?;
        latest = Some(latest.map_or(modified, |current| current.max(modified)));
    }
    Ok(latest.map(|time| DateTime::<Local>::from(time).date_naive()))
}

/// SHA-256 digest over the contents of all files under `path`
///
/// Files are visited in sorted order, so the digest does not depend on
/// directory iteration order.
pub fn path_sha256(path: impl AsRef<Path>) -> Result<String> {
    let mut hasher = Sha256::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            hash_file(&mut hasher, entry.path())?;
        }
    }
    Ok(to_hex(&hasher.finalize()))
}

fn hash_file(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = File::open(path)?;
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(())
}

fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_sha256_known_vector() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.txt", "hello world");

        assert_eq!(
            sha256(&path).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_size_in_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.txt", "12345");

        assert_eq!(size(&path).unwrap(), 5);
    }

    #[test]
    fn test_line_count_with_and_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_file(dir.path(), "terminated.txt", "a\nb\n");
        assert_eq!(line_count(&path).unwrap(), 2);

        let path = write_file(dir.path(), "unterminated.txt", "a\nb");
        assert_eq!(line_count(&path).unwrap(), 2);

        let path = write_file(dir.path(), "empty.txt", "");
        assert_eq!(line_count(&path).unwrap(), 0);
    }

    #[test]
    fn test_create_dir_nested_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");

        create_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call on an existing directory is a no-op.
        create_dir(&nested).unwrap();
    }

    #[test]
    fn test_modified_datetime_is_recent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.txt", "x");

        let stamp = modified_datetime(&path).unwrap();
        let age = Local::now().signed_duration_since(stamp);
        assert!(age.num_seconds() >= 0);
        assert!(age.num_minutes() < 5);
    }

    #[test]
    fn test_aggregates_walk_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "top.txt", "12");
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        write_file(&sub, "nested.txt", "345");

        assert_eq!(path_size(dir.path()).unwrap(), 5);
        assert_eq!(file_count(dir.path()).unwrap(), 2);
        assert!(latest_modified_date(dir.path()).unwrap().is_some());
    }

    #[test]
    fn test_latest_modified_date_of_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_modified_date(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_path_sha256_depends_on_content_only() {
        let left = tempfile::tempdir().unwrap();
        write_file(left.path(), "a.txt", "one");
        write_file(left.path(), "b.txt", "two");

        let right = tempfile::tempdir().unwrap();
        write_file(right.path(), "a.txt", "one");
        write_file(right.path(), "b.txt", "two");

        assert_eq!(
            path_sha256(left.path()).unwrap(),
            path_sha256(right.path()).unwrap()
        );

        write_file(right.path(), "b.txt", "changed");
        assert_ne!(
            path_sha256(left.path()).unwrap(),
            path_sha256(right.path()).unwrap()
        );
    }
}
