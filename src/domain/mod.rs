//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep measurement, series and artifact structs in one place.
//! - Avoid cyclic imports between the pipeline stages.
//! - Make JSON artifact schema changes explicit and reviewable.
//!
//! ## Files
//! - `columns.rs`: violation categories, score kinds and column selectors.
//! - `models.rs`: measurement rows, series, bundles, catalog, rankings, reports.
//! - `constants.rs`: stable names (tables, artifacts, synthetic views).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/database side effects.
//!
//! ## Compatibility note
//! Changes in these structs change the dashboard artifacts.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod columns;
pub mod constants;
pub mod models;
