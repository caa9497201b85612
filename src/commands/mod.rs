//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `pipeline.rs`: the `build` batch run.
//! - `inspect.rs`: series/scores/rank/examples/filter/sanitize lookups.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod pipeline;

pub use inspect::handle_inspect_commands;
pub use pipeline::handle_build;
