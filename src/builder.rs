use std::fs;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::{Catalog, Dataset};
use crate::errors::{CatalogError, CatalogResult};
use crate::parsers::prelude::*;
use crate::search::{FuzzyMatcher, Matcher};

#[derive(Default)]
pub struct CatalogBuilder {
    content: Option<String>,
    filepath: Option<String>,
    delimiter: Option<u8>,
    matcher: Option<Arc<dyn Matcher>>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn matcher(mut self, matcher: Arc<dyn Matcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    fn parser(&self) -> CsvParser {
        let delimiter = self.delimiter.unwrap_or_else(|| {
            match self.filepath.as_deref() {
                Some(path) if path.to_lowercase().ends_with(".tsv") => b'\t',
                _ => b',',
            }
        });
        CsvParser::new(delimiter)
    }

    /// Parses and normalizes the rows, then builds the search index.
    pub fn load(self) -> CatalogResult<Dataset> {
        let parser = self.parser();

        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .as_deref()
                    .ok_or(CatalogError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        if !parser.is_supported(self.filepath.as_deref(), &content) {
            warn!(
                filename = self.filepath.as_deref().unwrap_or("<inline>"),
                "source has no process or fee column"
            );
            return Err(CatalogError::LoadFailed(
                "no process or fee column in header row".to_string(),
            ));
        }

        let records = parser.parse(&content)?;
        if records.is_empty() {
            return Err(CatalogError::NoRecords);
        }

        info!(records = records.len(), "fee catalog loaded");

        let matcher = self.matcher.unwrap_or_else(|| Arc::new(FuzzyMatcher::default()));
        Ok(Dataset::with_matcher(records, matcher))
    }

    /// Like [`load`](Self::load), but folds failure into a [`Catalog`] state.
    pub fn build(self) -> Catalog {
        let result = self.load();
        if let Err(e) = &result {
            warn!(error = %e, "fee catalog unavailable");
        }
        Catalog::from(result)
    }
}
