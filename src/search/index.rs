use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fold;
use super::matcher::{FuzzyMatcher, Matcher};
use crate::types::FeeRecord;

/// Queries shorter than this pass the whole dataset through unfiltered.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchField {
    FeeLabel,
    Process,
    ResponsibleUnit,
    Area,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::FeeLabel,
        SearchField::Process,
        SearchField::ResponsibleUnit,
        SearchField::Area,
    ];

    pub fn weight(self) -> f64 {
        match self {
            SearchField::FeeLabel => 0.9,
            SearchField::Process => 0.8,
            SearchField::ResponsibleUnit => 0.6,
            SearchField::Area => 0.4,
        }
    }

    fn value(self, record: &FeeRecord) -> &str {
        match self {
            SearchField::FeeLabel => &record.fee_label,
            SearchField::Process => &record.process,
            SearchField::ResponsibleUnit => &record.responsible_unit,
            SearchField::Area => &record.area,
        }
    }
}

/// A matching record position with its relevance (higher is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub position: usize,
    pub relevance: f64,
}

/// Folded search keys for every record, aligned by position with the dataset.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    keys: Vec<[String; 4]>,
    matcher: Arc<dyn Matcher>,
}

impl SearchIndex {
    pub fn build(records: &[FeeRecord]) -> Self {
        Self::with_matcher(records, Arc::new(FuzzyMatcher::default()))
    }

    pub fn with_matcher(records: &[FeeRecord], matcher: Arc<dyn Matcher>) -> Self {
        let keys = records
            .iter()
            .map(|record| SearchField::ALL.map(|field| fold(field.value(record))))
            .collect::<Vec<_>>();

        debug!(records = keys.len(), ?matcher, "search index built");

        Self { keys, matcher }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Positions of the records matching `query`, most relevant first.
    ///
    /// Ties keep dataset order. A query under [`MIN_QUERY_CHARS`] characters
    /// returns every position in dataset order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let pattern = fold(query);

        if pattern.chars().count() < MIN_QUERY_CHARS {
            return (0..self.keys.len())
                .map(|position| SearchHit {
                    position,
                    relevance: 1.0,
                })
                .collect();
        }

        let mut hits: Vec<SearchHit> = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(position, keys)| {
                SearchField::ALL
                    .iter()
                    .zip(keys)
                    .filter_map(|(field, key)| {
                        self.matcher
                            .distance(&pattern, key)
                            .map(|distance| field.weight() * (1.0 - distance))
                    })
                    .max_by(f64::total_cmp)
                    .map(|relevance| SearchHit {
                        position,
                        relevance,
                    })
            })
            .collect();

        hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        hits
    }
}
