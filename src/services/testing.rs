//! In-memory measurement source for unit tests.

use crate::domain::models::{CatalogEntry, ExampleRow, MeasurementRow};
use crate::services::source::{DataSourceError, MeasurementSource};
use std::collections::HashSet;

pub fn row(issuer: &str, begin_time: i64, raw_count: u64) -> MeasurementRow {
    MeasurementRow {
        issuer: issuer.to_string(),
        begin_time,
        raw_count,
        valid_count: raw_count,
        in_mozilla_db: true,
        ..MeasurementRow::default()
    }
}

pub fn entry(issuer: &str, total: u64, trusted: bool, score: Option<f64>) -> CatalogEntry {
    CatalogEntry {
        issuer: issuer.to_string(),
        total_issuance: total,
        in_trust_store: trusted,
        current_raw_score: score,
    }
}

fn injected() -> DataSourceError {
    DataSourceError::Timeout { timeout_ms: 0 }
}

#[derive(Default)]
pub struct MemorySource {
    pub catalog: Vec<CatalogEntry>,
    pub rows: Vec<MeasurementRow>,
    pub examples: Vec<ExampleRow>,
    failing_rows: HashSet<String>,
    failing_examples: HashSet<String>,
    failing_catalog: bool,
}

impl MemorySource {
    pub fn new(rows: Vec<MeasurementRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<CatalogEntry>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_examples(mut self, examples: Vec<ExampleRow>) -> Self {
        self.examples = examples;
        self
    }

    pub fn failing_rows(mut self, issuer: &str) -> Self {
        self.failing_rows.insert(issuer.to_string());
        self
    }

    pub fn failing_examples(mut self, issuer: &str) -> Self {
        self.failing_examples.insert(issuer.to_string());
        self
    }

    pub fn failing_catalog(mut self) -> Self {
        self.failing_catalog = true;
        self
    }
}

impl MeasurementSource for MemorySource {
    fn catalog(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        if self.failing_catalog {
            return Err(injected());
        }
        Ok(self.catalog.clone())
    }

    fn issuer_rows(&self, issuer: &str) -> Result<Vec<MeasurementRow>, DataSourceError> {
        if self.failing_rows.contains(issuer) {
            return Err(injected());
        }
        Ok(self
            .rows
            .iter()
            .filter(|r| r.issuer == issuer)
            .cloned()
            .collect())
    }

    fn issuer_examples(&self, issuer: &str) -> Result<Vec<ExampleRow>, DataSourceError> {
        if self.failing_examples.contains(issuer) {
            return Err(injected());
        }
        Ok(self
            .examples
            .iter()
            .filter(|r| r.issuer == issuer)
            .cloned()
            .collect())
    }
}
