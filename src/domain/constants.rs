pub const DEFAULT_DB_PATH: &str = "BRs.db";
pub const DEFAULT_OUT_DIR: &str = "dashboard";

pub const MEASUREMENTS_TABLE: &str = "issuerReputation";
pub const EXAMPLES_TABLE: &str = "issuerExamples";

pub const DEFAULT_TOP_N: usize = 10;
/// Issuers at or below this summed raw volume are too small to rank as "worst".
pub const DEFAULT_VOLUME_FLOOR: u64 = 1000;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_WRITE_RETRIES: u32 = 1;

pub const SCORE_DECIMALS: i32 = 3;

pub const VOLUME_SERIES_NAME: &str = "Issuance Volume";
pub const VOLUME_Y_AXIS: u8 = 1;

pub const WORST_VIEW: &str = "Worst CAs";
pub const TOP_VIEW: &str = "Top 10 CAs";

pub const ISSUER_ARTIFACT_DIR: &str = "data";
pub const CATALOG_ARTIFACT: &str = "issuers.json";
pub const RANKINGS_ARTIFACT: &str = "rankings.json";
pub const MANIFEST_ARTIFACT: &str = "manifest.json";
