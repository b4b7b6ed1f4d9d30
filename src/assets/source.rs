use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ScrubError, ScrubResult};

/// Where frame bytes come from.
///
/// Implementations are called from preload worker threads, so they must be `Send + Sync`.
pub trait FrameSource: Send + Sync {
    /// Fetch the raw (encoded) bytes for a request path such as `/im/ezgif-frame-001.jpg`.
    fn fetch(&self, path: &str) -> ScrubResult<Vec<u8>>;
}

/// Normalize a request path into `/`-separated relative segments.
///
/// A leading `/` is treated as "relative to the document root". `.` segments are dropped and
/// parent traversals (`..`) are rejected.
pub(crate) fn normalize_request_path(path: &str) -> ScrubResult<String> {
    let s = path.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrubError::validation(format!(
                "frame path '{path}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrubError::validation(format!(
            "frame path '{path}' must contain a file name"
        )));
    }

    Ok(out.join("/"))
}

/// Serves frames from a directory acting as the document root.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Document root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location a request path resolves to.
    pub fn resolve(&self, path: &str) -> ScrubResult<PathBuf> {
        let rel = normalize_request_path(path)?;
        Ok(self.root.join(rel))
    }
}

impl FrameSource for DirSource {
    fn fetch(&self, path: &str) -> ScrubResult<Vec<u8>> {
        let full = self.resolve(path)?;
        std::fs::read(&full)
            .map_err(|e| ScrubError::asset(format!("read frame '{}': {e}", full.display())))
    }
}

/// In-memory frame store keyed by normalized request path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `path`.
    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) -> ScrubResult<()> {
        let key = normalize_request_path(path)?;
        self.entries.insert(key, bytes);
        Ok(())
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FrameSource for MemorySource {
    fn fetch(&self, path: &str) -> ScrubResult<Vec<u8>> {
        let key = normalize_request_path(path)?;
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| ScrubError::asset(format!("no frame registered at '{path}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
