//! SQLite file header check.
//!
//! Every SQLite 3 database starts with the 16-byte string `"SQLite format 3\0"`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The magic header at offset 0 of every SQLite 3 database file.
pub const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Check whether `path` looks like a SQLite database.
///
/// Returns `false` for missing files, files shorter than the header, and any
/// I/O error. Never fails.
pub fn is_valid_store(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!("Cannot open {} for header check: {}", path.display(), e);
            return false;
        }
    };

    let mut header = [0u8; 16];
    match file.read_exact(&mut header) {
        Ok(()) => &header == SQLITE_HEADER,
        Err(e) => {
            tracing::debug!("Cannot read header of {}: {}", path.display(), e);
            false
        }
    }
}
