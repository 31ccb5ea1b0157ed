//! Atomic file write using the write-rename pattern.
//!
//! Writes data to a temporary file (`{path}.tmp`), calls `sync_all()` to
//! flush it, then renames the temp file onto the final path. A crash during
//! the write leaves the previous file intact.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically writes `data` to `path`.
///
/// 1. Write to `{path}.tmp`
/// 2. `sync_all()`
/// 3. `rename` temp to final path (atomic on POSIX; near-atomic on Windows)
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp_path = tmp_path_for(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
