use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::LibrarySettings;

use super::model::Track;
use super::scan::scan;
use super::search::fuzzy_match_positions;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("library root {0:?} does not exist")]
    MissingRoot(PathBuf),
    #[error("library root {0:?} is not a directory")]
    NotADirectory(PathBuf),
}

/// One page of catalog results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub results: Vec<Track>,
    /// 1-based page number that was served.
    pub page: usize,
    /// Total matches across all pages.
    pub total: usize,
}

impl SearchPage {
    pub fn has_more(&self, page_size: usize) -> bool {
        self.page.saturating_mul(page_size) < self.total
    }
}

/// Track source consumed by the UI. The playback core only ever sees the
/// `Track` values a catalog returns.
pub trait Catalog {
    fn search(&self, query: &str, page: usize) -> Result<SearchPage, CatalogError>;
    fn search_artists(&self, query: &str, page: usize) -> Result<SearchPage, CatalogError>;
}

/// Catalog over a scanned directory of tagged audio files.
pub struct LocalCatalog {
    root: PathBuf,
    tracks: Vec<Track>,
    page_size: usize,
}

impl LocalCatalog {
    pub fn scan(root: &Path, settings: &LibrarySettings) -> Result<Self, CatalogError> {
        if !root.exists() {
            return Err(CatalogError::MissingRoot(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CatalogError::NotADirectory(root.to_path_buf()));
        }

        let tracks = scan(root, settings);
        info!(root = %root.display(), tracks = tracks.len(), "library scanned");
        Ok(Self::from_tracks(root, tracks, settings.page_size))
    }

    pub fn from_tracks(root: &Path, tracks: Vec<Track>, page_size: usize) -> Self {
        Self {
            root: root.to_path_buf(),
            tracks,
            page_size: page_size.max(1),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn page_of<'a>(&self, matches: impl Iterator<Item = &'a Track>, page: usize) -> SearchPage {
        let page = page.max(1);
        let matches: Vec<&Track> = matches.collect();
        let total = matches.len();
        let results = matches
            .into_iter()
            .skip((page - 1).saturating_mul(self.page_size))
            .take(self.page_size)
            .cloned()
            .collect();
        SearchPage {
            results,
            page,
            total,
        }
    }
}

impl Catalog for LocalCatalog {
    fn search(&self, query: &str, page: usize) -> Result<SearchPage, CatalogError> {
        let query = query.trim();
        let matches = self.tracks.iter().filter(|t| {
            let haystack = format!("{} {}", t.primary_artists, t.name);
            fuzzy_match_positions(&haystack, query).is_some()
        });
        let result = self.page_of(matches, page);
        debug!(query, page = result.page, total = result.total, "track search");
        Ok(result)
    }

    fn search_artists(&self, query: &str, page: usize) -> Result<SearchPage, CatalogError> {
        let query = query.trim();
        let matches = self
            .tracks
            .iter()
            .filter(|t| fuzzy_match_positions(&t.primary_artists, query).is_some());
        let result = self.page_of(matches, page);
        debug!(query, page = result.page, total = result.total, "artist search");
        Ok(result)
    }
}
