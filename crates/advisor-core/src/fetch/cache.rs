//! On-disk cache of raw metadata records

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ArticleId;
use crate::article::{parse_article_xml, ParsedArticle};
use crate::common::CommonWordSet;
use crate::error::{AdvisorError, Result};

const RECORD_EXTENSION: &str = "xml";

/// Directory of `<id>.xml` records
#[derive(Debug, Clone)]
pub struct MetadataCache {
    dir: PathBuf,
}

impl MetadataCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a record is cached under; old-style ids have `/` replaced by `_`
    pub fn path_for(&self, id: &ArticleId) -> PathBuf {
        self.dir
            .join(format!("{}.{}", id.as_str().replace('/', "_"), RECORD_EXTENSION))
    }

    /// Cached record for `id`, if any
    pub fn load(&self, id: &ArticleId) -> Result<Option<String>> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(None);
        }
        let xml = fs::read_to_string(&path)
            .map_err(|e| AdvisorError::file_operation("read", &path, e))?;
        tracing::debug!(id = %id, path = %path.display(), "Loaded cached record");
        Ok(Some(xml))
    }

    /// Write a record, creating the cache directory if needed
    pub fn store(&self, id: &ArticleId, xml: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AdvisorError::file_operation("create directory", &self.dir, e))?;
        let path = self.path_for(id);
        fs::write(&path, xml).map_err(|e| AdvisorError::file_operation("write", &path, e))?;
        tracing::debug!(id = %id, path = %path.display(), "Cached record");
        Ok(path)
    }

    /// Identifiers of every cached record, sorted
    pub fn cached_ids(&self) -> Result<Vec<ArticleId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || !path.extension().is_some_and(|e| e == RECORD_EXTENSION)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match ArticleId::parse(&stem.replace('_', "/")) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping cache entry");
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Parse every cached record
    ///
    /// Records that fail to parse are logged and skipped.
    #[tracing::instrument(skip(self, common), fields(dir = %self.dir.display()))]
    pub fn load_articles(&self, common: &CommonWordSet) -> Result<Vec<ParsedArticle>> {
        let mut articles = Vec::new();
        for id in self.cached_ids()? {
            let Some(xml) = self.load(&id)? else {
                continue;
            };
            match parse_article_xml(&xml, common) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Failed to parse cached record");
                }
            }
        }
        Ok(articles)
    }
}
