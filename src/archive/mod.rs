// src/archive/mod.rs
//! Directory of saved pages, read back as keyed documents.
//!
//! File names encode the document key:
//! `id-<event>-<fight>.html` for fights, `id-<boxer>[-<n>].html` for boxer
//! pages (`-<n>` marks a career continuation page) and `pg-<n>.html` for
//! ratings pages.

use std::fs;
use std::path::Path;

use crate::utils::error::ArchiveError;

const HTML_SUFFIX: &str = ".html";

/// How a page kind's keys are laid out in file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Fight,
    Boxer,
    Ratings,
}

/// One saved page and the key it was archived under.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedDocument {
    pub key: String,
    pub body: String,
}

impl ArchivedDocument {
    pub fn new(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
        }
    }

    /// Second and later pages of a long career (`"<boxer>-<n>"`).
    pub fn is_continuation_page(&self) -> bool {
        self.key.contains('-')
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Document key for an archived file name.
pub fn key_from_file_name(name: &str, kind: PageKind) -> Result<String, ArchiveError> {
    let unrecognized = || ArchiveError::UnrecognizedFileName(name.to_string());
    let stem = name.strip_suffix(HTML_SUFFIX).ok_or_else(unrecognized)?;

    match kind {
        PageKind::Fight => {
            let (event, fight) = stem
                .strip_prefix("id-")
                .and_then(|ids| ids.split_once('-'))
                .ok_or_else(unrecognized)?;
            if all_digits(event) && all_digits(fight) {
                Ok(format!("{}/{}", event, fight))
            } else {
                Err(unrecognized())
            }
        }
        PageKind::Boxer => {
            let ids = stem.strip_prefix("id-").ok_or_else(unrecognized)?;
            let valid = match ids.split_once('-') {
                Some((boxer, page)) => all_digits(boxer) && all_digits(page),
                None => all_digits(ids),
            };
            if valid {
                Ok(ids.to_string())
            } else {
                Err(unrecognized())
            }
        }
        PageKind::Ratings => {
            let page = stem.strip_prefix("pg-").ok_or_else(unrecognized)?;
            if all_digits(page) {
                Ok(page.to_string())
            } else {
                Err(unrecognized())
            }
        }
    }
}

/// File name a document key is archived under.
pub fn file_name_for(key: &str, kind: PageKind) -> String {
    match kind {
        PageKind::Fight => format!("id-{}{}", key.replace('/', "-"), HTML_SUFFIX),
        PageKind::Boxer => format!("id-{}{}", key, HTML_SUFFIX),
        PageKind::Ratings => format!("pg-{}{}", key, HTML_SUFFIX),
    }
}

/// Reads every recognised page in `dir`, ordered by file name.
///
/// Unreadable or unrecognised files are logged and skipped; only a missing or
/// unreadable directory is an error.
pub fn load_documents(dir: &Path, kind: PageKind) -> Result<Vec<ArchivedDocument>, ArchiveError> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = match key_from_file_name(&name, kind) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Skipping archive file {}: {}", path.display(), e);
                continue;
            }
        };
        match fs::read(&path) {
            Ok(bytes) => documents.push(ArchivedDocument::new(key, String::from_utf8_lossy(&bytes))),
            Err(e) => tracing::warn!("Could not read archive file {}: {}", path.display(), e),
        }
    }

    tracing::info!("Loaded {} archived documents from {}", documents.len(), dir.display());
    Ok(documents)
}
