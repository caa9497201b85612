//! Service layer containing the pipeline stages and side-effect helpers.
//!
//! ## Service map
//! - `source.rs`: measurement source trait + read-only SQLite adapter.
//! - `series.rs`: one column of one issuer as a rounded time series.
//! - `scores.rs`: per-category score series + issuance volume series.
//! - `ranking.rs`: top-by-volume and worst-by-score rankings.
//! - `examples.rs`: most recent bad certificate per category.
//! - `assembler.rs`: full batch run, per-issuer isolation, global artifacts.
//! - `storage.rs`: name sanitization + atomic artifact writes.
//! - `filter.rs`: dashboard volume-threshold filter over the catalog.
//! - `config.rs`: TOML pipeline config loading.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Stages are pure over rows where possible; only `source.rs` queries and
//!   only `storage.rs` writes.
//! - Keep command handlers thin; delegate to services.

pub mod assembler;
pub mod config;
pub mod examples;
pub mod filter;
pub mod output;
pub mod ranking;
pub mod scores;
pub mod series;
pub mod source;
pub mod storage;
#[cfg(test)]
pub mod testing;
