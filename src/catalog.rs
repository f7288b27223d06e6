use std::collections::BTreeSet;
use std::sync::Arc;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};
use crate::query::{Page, QueryParams, query};
use crate::search::{Matcher, SearchIndex};
use crate::types::FeeRecord;

/// The loaded fee records plus their search index. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<FeeRecord>,
    index: SearchIndex,
}

impl Dataset {
    pub fn new(records: Vec<FeeRecord>) -> Self {
        let index = SearchIndex::build(&records);
        Self { records, index }
    }

    pub fn with_matcher(records: Vec<FeeRecord>, matcher: Arc<dyn Matcher>) -> Self {
        let index = SearchIndex::with_matcher(&records, matcher);
        Self { records, index }
    }

    pub fn records(&self) -> &[FeeRecord] {
        &self.records
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, params: &QueryParams) -> Page {
        query(self, params)
    }

    /// Records matching `text`, most relevant first.
    pub fn search(&self, text: &str) -> Vec<&FeeRecord> {
        self.index
            .search(text)
            .into_iter()
            .map(|hit| &self.records[hit.position])
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            units: distinct(self.records.iter().map(|r| r.responsible_unit.as_str())),
            processes: distinct(self.records.iter().map(|r| r.process.as_str())),
        }
    }

    /// Whole-number bounds enclosing every amount, for the range control.
    pub fn amount_bounds(&self) -> Option<AmountBounds> {
        let min = self.records.iter().map(|r| r.amount).min()?;
        let max = self.records.iter().map(|r| r.amount).max()?;
        Some(AmountBounds {
            min: min.floor(),
            max: max.ceil(),
        })
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct values for the unit and process selectors, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub units: Vec<String>,
    pub processes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl AmountBounds {
    pub fn as_f64(&self) -> (f64, f64) {
        (
            self.min.to_f64().unwrap_or(0.0),
            self.max.to_f64().unwrap_or(0.0),
        )
    }
}

/// Load state of the catalog as seen by the UI.
#[derive(Debug, Clone, Default)]
pub enum Catalog {
    /// The data source has not answered yet.
    #[default]
    Pending,
    /// Loading failed; terminal.
    Failed(String),
    Ready(Arc<Dataset>),
}

impl Catalog {
    pub fn is_ready(&self) -> bool {
        matches!(self, Catalog::Ready(_))
    }

    pub fn dataset(&self) -> CatalogResult<&Dataset> {
        match self {
            Catalog::Pending => Err(CatalogError::NotReady),
            Catalog::Failed(message) => Err(CatalogError::LoadFailed(message.clone())),
            Catalog::Ready(dataset) => Ok(dataset.as_ref()),
        }
    }

    /// Runs the pipeline, refusing to answer until a dataset is loaded.
    ///
    /// An empty page from a ready catalog means nothing matched; errors mean
    /// there is no data to filter at all.
    pub fn query(&self, params: &QueryParams) -> CatalogResult<Page> {
        Ok(self.dataset()?.query(params))
    }

    pub fn filter_options(&self) -> CatalogResult<FilterOptions> {
        Ok(self.dataset()?.filter_options())
    }
}

impl From<CatalogResult<Dataset>> for Catalog {
    fn from(result: CatalogResult<Dataset>) -> Self {
        match result {
            Ok(dataset) => Catalog::Ready(Arc::new(dataset)),
            Err(e) => Catalog::Failed(e.to_string()),
        }
    }
}
