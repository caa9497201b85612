use crate::domain::columns::ScoreKind;
use crate::domain::constants::{DEFAULT_DB_PATH, DEFAULT_OUT_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sunlight-dash",
    version,
    about = "Issuer reputation dashboard artifact builder"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_DB_PATH,
        help = "SQLite measurement snapshot"
    )]
    pub db: PathBuf,
    #[arg(
        long,
        global = true,
        help = "Pipeline config (default: ~/.config/sunlight-dash/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log filter directive (stderr)"
    )]
    pub log: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every issuer, catalog, ranking and manifest artifact.
    Build {
        #[arg(long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
        #[arg(long, value_enum)]
        score_kind: Option<ScoreKind>,
    },
    /// Print one issuer's series for a column such as `expTooSmallRawScore`.
    Series { issuer: String, column: String },
    /// Print the six category score series and the volume series for an issuer.
    Scores {
        issuer: String,
        #[arg(long, value_enum, default_value_t = ScoreKind::Raw)]
        score_kind: ScoreKind,
    },
    /// Print the top-by-volume and worst-by-score rankings.
    Rank,
    /// Print the selected example certificates for an issuer.
    Examples { issuer: String },
    /// List issuers at or above the issuance threshold for a slider percentage.
    Filter {
        #[arg(long)]
        percent: f64,
        #[arg(long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
    },
    /// Print the artifact file stem for an issuer name.
    Sanitize { name: String },
}
