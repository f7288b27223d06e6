use ::csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use super::dto::{Field, RawRow, header_key};
use crate::errors::{CatalogError, CatalogResult};
use crate::parsers::traits::Parser;
use crate::types::FeeRecord;

pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter);
        builder
    }

    /// Reads every row keyed by its header, without normalizing it.
    ///
    /// Rows shorter than the header line simply lack the trailing columns.
    pub fn parse_rows(&self, content: &str) -> CatalogResult<Vec<RawRow>> {
        Ok(self
            .parse_lines(content)?
            .into_iter()
            .map(|(_, row)| row)
            .collect())
    }

    /// Like [`parse_rows`](Self::parse_rows), paired with the line each
    /// record starts on. Quoted cells may span several lines.
    pub fn parse_lines(&self, content: &str) -> CatalogResult<Vec<(u64, RawRow)>> {
        let mut reader = self.reader_builder().from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| CatalogError::LoadFailed(format!("CSV header error: {}", e)))?
            .clone();

        reader
            .records()
            .map(|result| {
                result
                    .map(|record| {
                        let line = record.position().map(|p| p.line()).unwrap_or_default();
                        (line, headers.iter().zip(record.iter()).collect::<RawRow>())
                    })
                    .map_err(|e| CatalogError::LoadFailed(format!("CSV read error: {}", e)))
            })
            .collect()
    }
}

impl Parser for CsvParser {
    type Output = FeeRecord;

    /// Support is decided by the header row alone; the file name is not
    /// consulted, since sheet exports often arrive as `.txt` or without an
    /// extension.
    fn is_supported(&self, _filename: Option<&str>, content: &str) -> bool {
        // The header row has to name at least one identifying column.
        self.reader_builder()
            .from_reader(content.as_bytes())
            .headers()
            .map(|headers| {
                let keys: Vec<String> = headers.iter().map(header_key).collect();
                [Field::Process, Field::FeeLabel].iter().any(|field| {
                    field
                        .header_variants()
                        .iter()
                        .any(|variant| keys.iter().any(|key| key == variant))
                })
            })
            .unwrap_or(false)
    }

    fn parse(&self, content: &str) -> CatalogResult<Vec<Self::Output>> {
        let rows = self.parse_lines(content)?;
        let total = rows.len();

        let records: Vec<FeeRecord> = rows
            .iter()
            .filter_map(|(line, row)| {
                let record = FeeRecord::normalize(row);
                if record.has_identity() {
                    Some(record)
                } else {
                    debug!(line = *line, "dropping row without process or fee label");
                    None
                }
            })
            .collect();

        if records.len() < total {
            warn!(dropped = total - records.len(), total, "rows without identifying text skipped");
        }

        Ok(records)
    }
}
