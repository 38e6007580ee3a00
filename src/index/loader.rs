use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use super::types::SearchIndex;
use crate::error::IndexError;

lazy_static! {
    /// What readers see until a load has been published
    static ref EMPTY_INDEX: SearchIndex = SearchIndex::default();
}

/// Reads the search index document from a fixed location.
#[derive(Debug, Clone)]
pub struct IndexLoader {
    path: PathBuf,
}

impl IndexLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve `relative` (usually `assets/search-index.json`) against a docs root
    pub fn for_docs(root: &Path, relative: &Path) -> Self {
        Self::new(root.join(relative))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the index, reporting why it failed.
    pub async fn try_load(&self) -> Result<SearchIndex, IndexError> {
        let start = Instant::now();

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| IndexError::Io {
                path: self.path.clone(),
                source,
            })?;
        let index = SearchIndex::from_json(&bytes)?;

        tracing::info!(
            "Search index loaded from {} ({} entries, {} classes) in {:?}",
            self.path.display(),
            index.len(),
            index.class_count(),
            start.elapsed()
        );

        Ok(index)
    }

    /// Best-effort load: failures are logged and yield an empty index.
    pub async fn load(&self) -> SearchIndex {
        match self.try_load().await {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("Failed to load search index: {}", e);
                SearchIndex::default()
            }
        }
    }
}

/// The index as seen by the navigator: empty until published, then frozen.
///
/// Cloning shares the same slot, so the loader side and the reader side can
/// live in different tasks.
#[derive(Debug, Clone, Default)]
pub struct PublishedIndex {
    slot: Arc<OnceLock<SearchIndex>>,
}

impl PublishedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the loaded index. Only the first call has any effect.
    pub fn publish(&self, index: SearchIndex) -> bool {
        let published = self.slot.set(index).is_ok();
        if !published {
            tracing::debug!("Search index already published, ignoring reload");
        }
        published
    }

    pub fn is_published(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Current index; the shared empty index when nothing is published yet.
    pub fn current(&self) -> &SearchIndex {
        self.slot.get().unwrap_or(&*EMPTY_INDEX)
    }
}
