use crate::domain::columns::{Category, Column, ScoreKind, CATEGORY_COUNT};
use crate::domain::constants::{
    DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_TOP_N, DEFAULT_VOLUME_FLOOR, DEFAULT_WRITE_RETRIES,
};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CategoryMeasurement {
    pub raw_score: Option<f64>,
    pub normalized_score: Option<f64>,
    pub count: u64,
}

/// One issuer's aggregate compliance snapshot for one time bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementRow {
    pub issuer: String,
    pub begin_time: i64,
    pub raw_count: u64,
    pub valid_count: u64,
    /// Per-bucket flag. Artifacts use the catalog's per-issuer aggregate.
    #[allow(dead_code)]
    pub in_mozilla_db: bool,
    pub raw_score: Option<f64>,
    pub normalized_score: Option<f64>,
    pub categories: [CategoryMeasurement; CATEGORY_COUNT],
}

impl MeasurementRow {
    pub fn category(&self, cat: Category) -> &CategoryMeasurement {
        &self.categories[cat.index()]
    }

    /// Unrounded value of `column`; `None` when the column is NULL in this row.
    pub fn value(&self, column: Column) -> Option<SeriesValue> {
        match column {
            Column::RawCount => Some(SeriesValue::Count(self.raw_count)),
            Column::ValidCount => Some(SeriesValue::Count(self.valid_count)),
            Column::Score(ScoreKind::Raw) => self.raw_score.map(SeriesValue::Score),
            Column::Score(ScoreKind::Normalized) => self.normalized_score.map(SeriesValue::Score),
            Column::CategoryScore(cat, ScoreKind::Raw) => {
                self.category(cat).raw_score.map(SeriesValue::Score)
            }
            Column::CategoryScore(cat, ScoreKind::Normalized) => {
                self.category(cat).normalized_score.map(SeriesValue::Score)
            }
            Column::CategoryCount(cat) => Some(SeriesValue::Count(self.category(cat).count)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Count(u64),
    Score(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub data: Vec<(i64, SeriesValue)>,
    /// Secondary axis index for the chart layer; absent for score series.
    #[serde(rename = "yAxis", default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Example {
    pub certificate_pem: String,
    pub last_seen: Option<i64>,
}

/// Most recent bad certificate per category. Never constructed empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ExampleSet(BTreeMap<Category, Example>);

impl ExampleSet {
    pub fn from_map(map: BTreeMap<Category, Example>) -> Option<Self> {
        if map.is_empty() {
            None
        } else {
            Some(Self(map))
        }
    }

    pub fn get(&self, cat: Category) -> Option<&Example> {
        self.0.get(&cat)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.keys().copied()
    }
}

impl Serialize for ExampleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len() * 2))?;
        for (cat, ex) in &self.0 {
            map.serialize_entry(&cat.example_column(), &ex.certificate_pem)?;
            map.serialize_entry(&cat.last_seen_column(), &ex.last_seen)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExampleSlot {
    pub pem: Option<String>,
    pub last_seen: Option<i64>,
}

/// One row of the examples relation: a candidate certificate per category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExampleRow {
    pub issuer: String,
    pub slots: [ExampleSlot; CATEGORY_COUNT],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBundle {
    pub scores: BTreeMap<Category, TimeSeries>,
    pub volume: TimeSeries,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IssuerBundle {
    pub issuer: String,
    pub total_issuance: u64,
    pub in_trust_store: bool,
    pub score_series: Vec<TimeSeries>,
    pub volume_series: TimeSeries,
    pub examples: Option<ExampleSet>,
}

impl IssuerBundle {
    pub fn artifact(&self) -> IssuerArtifact<'_> {
        let mut series: Vec<&TimeSeries> = self.score_series.iter().collect();
        series.push(&self.volume_series);
        IssuerArtifact {
            issuer: &self.issuer,
            total_issuance: self.total_issuance,
            in_trust_store: self.in_trust_store,
            series,
            examples: self.examples.as_ref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerArtifact<'a> {
    pub issuer: &'a str,
    pub total_issuance: u64,
    #[serde(rename = "issuerInMozillaDB")]
    pub in_trust_store: bool,
    pub series: Vec<&'a TimeSeries>,
    pub examples: Option<&'a ExampleSet>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub issuer: String,
    pub total_issuance: u64,
    #[serde(rename = "issuerInMozillaDB")]
    pub in_trust_store: bool,
    /// Overall raw score of the most recent bucket. Ranking input only.
    #[serde(skip)]
    pub current_raw_score: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub issuers: Vec<CatalogEntry>,
    pub max_issuance: u64,
}

impl Catalog {
    pub fn from_entries(issuers: Vec<CatalogEntry>) -> Self {
        let max_issuance = issuers
            .iter()
            .map(|e| e.total_issuance)
            .max()
            .unwrap_or(0);
        Self {
            issuers,
            max_issuance,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RankingResult {
    #[serde(rename = "topIssuers")]
    pub top_by_volume: Vec<String>,
    #[serde(rename = "worstIssuers")]
    pub worst_by_score: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingArtifact<'a> {
    pub top_issuers: &'a [String],
    pub worst_issuers: &'a [String],
    pub top_series: &'a [TimeSeries],
    pub worst_series: &'a [TimeSeries],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunManifest {
    pub tool_version: String,
    pub source_digest: Option<String>,
    pub score_kind: ScoreKind,
    pub issuers: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct IssuerFailure {
    pub issuer: String,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub out_dir: String,
    pub issuers: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<IssuerFailure>,
}

#[derive(Clone, Debug)]
pub struct PipelineRun {
    pub catalog: Catalog,
    pub rankings: RankingResult,
    pub summary: RunSummary,
}

#[derive(Serialize)]
pub struct FilterReport {
    pub percent: f64,
    pub minimum_issuance: u64,
    pub issuers: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_volume_floor")]
    pub volume_floor: u64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            volume_floor: DEFAULT_VOLUME_FLOOR,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub score_kind: ScoreKind,
    #[serde(default = "default_write_retries")]
    pub write_retries: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            score_kind: ScoreKind::Raw,
            write_retries: DEFAULT_WRITE_RETRIES,
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_volume_floor() -> u64 {
    DEFAULT_VOLUME_FLOOR
}

fn default_query_timeout_ms() -> u64 {
    DEFAULT_QUERY_TIMEOUT_MS
}

fn default_write_retries() -> u32 {
    DEFAULT_WRITE_RETRIES
}
