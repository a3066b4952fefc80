//! Writable export target.
//!
//! Every byte the exporter produces goes through [`ExportTarget`]: one
//! output root, directories created on demand, writes always relative to
//! that root. Individual asset-copy failures are warned and skipped (a
//! half-copied icon set should not kill a multi-archive export), while
//! failure to create a destination directory is surfaced to the caller.

use crate::naming::strip_content_hash;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A writable output location rooted at one directory.
#[derive(Debug)]
pub struct ExportTarget {
    root: PathBuf,
}

impl ExportTarget {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The output root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the output root already exists. No side effects.
    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Create a directory (and parents) under the root. Idempotent.
    pub fn ensure_dir(&self, rel: &str) -> io::Result<()> {
        fs::create_dir_all(self.join(rel))
    }

    /// Write text content to a file under the root, creating parent
    /// directories as needed. Overwrites silently; the caller has already
    /// gated on force.
    pub fn write(&self, content: &str, rel: &str) -> io::Result<()> {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
    }

    /// Copy source files into the `to` subdirectory (`""` for the root).
    ///
    /// With `keep_hash` false, filenames of the form `<name>-<hash>.<ext>`
    /// are rewritten to `<name>.<ext>` on the way in. Per-file copy
    /// failures are warned and skipped; the destination directory is only
    /// created when there is at least one source. Returns the number of
    /// files copied.
    pub fn copy_raw(&self, sources: &[PathBuf], to: &str, keep_hash: bool) -> io::Result<usize> {
        if sources.is_empty() {
            return Ok(0);
        }
        self.ensure_dir(to)?;

        let mut copied = 0;
        for source in sources {
            let Some(name) = source.file_name() else {
                continue;
            };
            let name = name.to_string_lossy();
            let name = if keep_hash {
                name.into_owned()
            } else {
                strip_content_hash(&name)
            };
            let dest = self.join(to).join(&name);
            match fs::copy(source, &dest) {
                Ok(_) => {
                    debug!(source = %source.display(), dest = %dest.display(), "copied");
                    copied += 1;
                }
                Err(e) => {
                    warn!(source = %source.display(), error = %e, "failed to copy resource");
                }
            }
        }
        Ok(copied)
    }

    /// [`copy_raw`](Self::copy_raw) specialized to the `css/` subdirectory.
    pub fn copy_css(&self, sources: &[PathBuf], keep_hash: bool) -> io::Result<usize> {
        self.copy_raw(sources, "css", keep_hash)
    }

    fn join(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }
}
