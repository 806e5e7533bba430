use log::{debug, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::common::CleanError;

/// Where documents are read from and written back to.
pub trait DocumentStore {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Filesystem store. Writes go through a temp file in the target's
/// directory followed by a rename, so a failed write leaves the original.
/// Symlinks are resolved first and the file they point at is replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let target = match fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(e),
        };
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;

        if let Ok(metadata) = fs::metadata(&target) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }

        tmp.persist(&target).map_err(|e| e.error)?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

/// Every file under `dir` whose name ends in `.<extension>`, in file-name order.
pub fn collect_markdown_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, CleanError> {
    if !dir.is_dir() {
        return Err(CleanError::Walk {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };

        // Follows symlinked files; symlinked directories are not descended.
        if !entry.path().is_file() {
            continue;
        }

        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            paths.push(entry.into_path());
        }
    }

    debug!("Found {} candidate files under {}", paths.len(), dir.display());
    Ok(paths)
}

/// One path per line; surrounding whitespace and blank lines are ignored.
pub fn read_paths<R: BufRead>(reader: R) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let candidate = line.trim();
        if !candidate.is_empty() {
            paths.push(PathBuf::from(candidate));
        }
    }
    Ok(paths)
}

pub fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    if !path.as_os_str().is_empty() && !path.is_dir() {
        debug!("Directory {:?} does not exist, creating...", path);
        fs::create_dir_all(path)?;
    }
    Ok(())
}
