//! Enumeration of case files.

use crate::error::{DiscoveryError, InvalidPatternError, MissingCaseDirectoryError};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// File extension of `anc` source files.
pub const CASE_EXTENSION: &str = "anc";

/// A case file selected for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFile {
    /// The file stem, which is how the case is reported.
    pub name: String,
    pub path: PathBuf,
}

impl CaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Where to look for cases, and which of them to keep.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub directory: PathBuf,
    pub extension: String,
    /// Only cases whose file name contains this text are kept. Empty keeps everything.
    pub filter: String,
}

impl DiscoveryOptions {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: CASE_EXTENSION.to_owned(),
            filter: String::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Find all case files directly inside the case directory, sorted by file name.
///
/// A missing directory is the one condition that prevents the suite from running at all.
pub fn discover(options: &DiscoveryOptions) -> Result<Vec<CaseFile>, DiscoveryError> {
    let directory = &options.directory;
    if !directory.is_dir() {
        return Err(MissingCaseDirectoryError {
            path: directory.clone(),
        }
        .into());
    }

    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&directory.display().to_string()),
        options.extension
    );
    let entries = glob(&pattern).map_err(|source| InvalidPatternError {
        path: directory.clone(),
        source,
    })?;

    let mut cases = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter(|path| matches_filter(path, &options.filter))
        .map(CaseFile::new)
        .collect::<Vec<_>>();
    cases.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    tracing::info!(
        directory = %directory.display(),
        count = cases.len(),
        "discovered cases"
    );
    Ok(cases)
}

fn matches_filter(path: &Path, filter: &str) -> bool {
    filter.is_empty()
        || path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains(filter))
}
