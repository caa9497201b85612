use crate::domain::columns::{Column, ScoreKind};
use crate::domain::constants::{
    CATALOG_ARTIFACT, ISSUER_ARTIFACT_DIR, MANIFEST_ARTIFACT, RANKINGS_ARTIFACT,
};
use crate::domain::models::{
    Catalog, CatalogEntry, IssuerBundle, IssuerFailure, PipelineConfig, PipelineRun,
    RankingArtifact, RunManifest, RunSummary, TimeSeries,
};
use crate::services::examples::examples_from_rows;
use crate::services::ranking::compute_rankings;
use crate::services::scores::score_bundle_from_rows;
use crate::services::series::build_series;
use crate::services::source::{DataSourceError, MeasurementSource};
use crate::services::storage::{
    ensure_dir, issuer_artifact_path, sanitize, write_artifact, StorageError,
};
use std::collections::HashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("catalog query failed: {0}")]
    Catalog(#[source] DataSourceError),
    #[error("series for ranked issuer `{issuer}` failed: {source}")]
    RankedSeries {
        issuer: String,
        #[source]
        source: DataSourceError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
enum IssuerStepError {
    #[error(transparent)]
    Source(#[from] DataSourceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub fn build_issuer_bundle(
    source: &dyn MeasurementSource,
    entry: &CatalogEntry,
    kind: ScoreKind,
) -> Result<IssuerBundle, DataSourceError> {
    let mut rows = source.issuer_rows(&entry.issuer)?;
    rows.retain(|r| r.issuer == entry.issuer);
    let mut example_rows = source.issuer_examples(&entry.issuer)?;
    example_rows.retain(|r| r.issuer == entry.issuer);

    let scores = score_bundle_from_rows(&rows, kind);
    Ok(IssuerBundle {
        issuer: entry.issuer.clone(),
        total_issuance: entry.total_issuance,
        in_trust_store: entry.in_trust_store,
        score_series: scores.scores.into_values().collect(),
        volume_series: scores.volume,
        examples: examples_from_rows(&example_rows),
    })
}

fn ranked_series(
    source: &dyn MeasurementSource,
    issuers: &[String],
) -> Result<Vec<TimeSeries>, PipelineError> {
    issuers
        .iter()
        .map(|issuer| {
            build_series(source, issuer, Column::Score(ScoreKind::Raw)).map_err(|source| {
                PipelineError::RankedSeries {
                    issuer: issuer.clone(),
                    source,
                }
            })
        })
        .collect()
}

fn write_issuer(
    source: &dyn MeasurementSource,
    entry: &CatalogEntry,
    config: &PipelineConfig,
    out_dir: &Path,
) -> Result<(), IssuerStepError> {
    let bundle = build_issuer_bundle(source, entry, config.output.score_kind)?;
    let path = issuer_artifact_path(out_dir, &entry.issuer);
    write_artifact(&path, &bundle.artifact(), config.output.write_retries)?;
    tracing::debug!(issuer = %entry.issuer, path = %path.display(), "wrote issuer artifact");
    Ok(())
}

/// Runs one full batch pass over `source` and writes every artifact under `out_dir`.
///
/// Catalog, ranking and global artifact failures abort the run. Per-issuer
/// failures are logged, skipped and reported in the summary.
pub fn run(
    source: &dyn MeasurementSource,
    config: &PipelineConfig,
    out_dir: &Path,
) -> Result<PipelineRun, PipelineError> {
    let entries = source.catalog().map_err(PipelineError::Catalog)?;
    let rankings = compute_rankings(&entries, &config.ranking);
    tracing::info!(
        issuers = entries.len(),
        top = rankings.top_by_volume.len(),
        worst = rankings.worst_by_score.len(),
        "computed rankings"
    );

    let top_series = ranked_series(source, &rankings.top_by_volume)?;
    let worst_series = ranked_series(source, &rankings.worst_by_score)?;
    let catalog = Catalog::from_entries(entries);

    ensure_dir(&out_dir.join(ISSUER_ARTIFACT_DIR))?;

    let mut stems: HashMap<String, &str> = HashMap::new();
    let mut succeeded = 0usize;
    let mut failures = Vec::new();
    for entry in &catalog.issuers {
        if let Some(previous) = stems.insert(sanitize(&entry.issuer), &entry.issuer) {
            tracing::warn!(
                issuer = %entry.issuer,
                previous = %previous,
                "issuer artifact name collides; previous artifact is overwritten"
            );
        }
        match write_issuer(source, entry, config, out_dir) {
            Ok(()) => succeeded += 1,
            Err(e) => {
                tracing::warn!(issuer = %entry.issuer, error = %e, "skipping issuer artifact");
                failures.push(IssuerFailure {
                    issuer: entry.issuer.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let retries = config.output.write_retries;
    write_artifact(&out_dir.join(CATALOG_ARTIFACT), &catalog, retries)?;
    write_artifact(
        &out_dir.join(RANKINGS_ARTIFACT),
        &RankingArtifact {
            top_issuers: &rankings.top_by_volume,
            worst_issuers: &rankings.worst_by_score,
            top_series: &top_series,
            worst_series: &worst_series,
        },
        retries,
    )?;

    let source_digest = source.snapshot_digest().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "snapshot digest unavailable");
        None
    });
    write_artifact(
        &out_dir.join(MANIFEST_ARTIFACT),
        &RunManifest {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            source_digest,
            score_kind: config.output.score_kind,
            issuers: catalog.issuers.len(),
            succeeded,
            failed: failures.len(),
        },
        retries,
    )?;

    tracing::info!(
        issuers = catalog.issuers.len(),
        succeeded,
        failed = failures.len(),
        out_dir = %out_dir.display(),
        "pipeline run complete"
    );

    let summary = RunSummary {
        out_dir: out_dir.display().to_string(),
        issuers: catalog.issuers.len(),
        succeeded,
        failed: failures.len(),
        failures,
    };
    Ok(PipelineRun {
        catalog,
        rankings,
        summary,
    })
}
