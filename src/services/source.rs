use crate::domain::columns::{Category, CATEGORY_COUNT};
use crate::domain::constants::{EXAMPLES_TABLE, MEASUREMENTS_TABLE};
use crate::domain::models::{
    CatalogEntry, CategoryMeasurement, ExampleRow, ExampleSlot, MeasurementRow, SourceConfig,
};
use rusqlite::{params, Connection, OpenFlags, Row};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(thiserror::Error, Debug)]
pub enum DataSourceError {
    #[error("failed to open measurement source {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("measurement query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("measurement query exceeded {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only view over one measurement snapshot.
///
/// Every method reads to completion and hands back an owned collection.
pub trait MeasurementSource {
    /// One entry per issuer: summed `rawCount`, trust-store flag, latest overall raw score.
    fn catalog(&self) -> Result<Vec<CatalogEntry>, DataSourceError>;

    /// All buckets for `issuer`, ascending by `beginTime`.
    fn issuer_rows(&self, issuer: &str) -> Result<Vec<MeasurementRow>, DataSourceError>;

    /// Candidate example certificates for `issuer`.
    fn issuer_examples(&self, issuer: &str) -> Result<Vec<ExampleRow>, DataSourceError>;

    /// Content digest of the snapshot, when the source is file-backed.
    fn snapshot_digest(&self) -> Result<Option<String>, DataSourceError> {
        Ok(None)
    }
}

pub struct SqliteSource {
    conn: Connection,
    path: PathBuf,
    timeout: Duration,
    has_examples: bool,
}

impl SqliteSource {
    pub fn open(path: &Path, config: &SourceConfig) -> Result<Self, DataSourceError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| DataSourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let timeout = Duration::from_millis(config.query_timeout_ms);
        conn.busy_timeout(timeout)?;
        let has_examples = table_exists(&conn, EXAMPLES_TABLE)?;
        if !has_examples {
            tracing::info!(
                table = EXAMPLES_TABLE,
                "examples relation absent; issuer examples will be null"
            );
        }
        Ok(Self {
            conn,
            path: path.to_path_buf(),
            timeout,
            has_examples,
        })
    }

    /// Interrupts the next statement once the per-query deadline passes.
    fn arm_deadline(&self) {
        let deadline = Instant::now() + self.timeout;
        self.conn
            .progress_handler(1_000, Some(move || Instant::now() > deadline));
    }

    fn classify(&self, err: rusqlite::Error) -> DataSourceError {
        match err {
            rusqlite::Error::SqliteFailure(ref e, _)
                if e.code == rusqlite::ErrorCode::OperationInterrupted =>
            {
                DataSourceError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            }
            other => DataSourceError::Query(other),
        }
    }
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, DataSourceError> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        params![name],
        |r| r.get(0),
    )?)
}

fn count(v: Option<i64>) -> u64 {
    v.unwrap_or(0).max(0) as u64
}

fn measurement_columns() -> String {
    let mut cols = vec![
        "COALESCE(issuer, '')".to_string(),
        "beginTime".to_string(),
        "rawCount".to_string(),
        "validCount".to_string(),
        "issuerInMozillaDB".to_string(),
        "rawScore".to_string(),
        "normalizedScore".to_string(),
    ];
    for cat in Category::ALL {
        cols.push(format!("{}RawScore", cat.as_str()));
        cols.push(format!("{}NormalizedScore", cat.as_str()));
        cols.push(format!("{}Count", cat.as_str()));
    }
    cols.join(", ")
}

fn read_measurement(r: &Row<'_>) -> rusqlite::Result<MeasurementRow> {
    let mut categories = [CategoryMeasurement::default(); CATEGORY_COUNT];
    for (i, slot) in categories.iter_mut().enumerate() {
        let base = 7 + i * 3;
        *slot = CategoryMeasurement {
            raw_score: r.get(base)?,
            normalized_score: r.get(base + 1)?,
            count: count(r.get(base + 2)?),
        };
    }
    Ok(MeasurementRow {
        issuer: r.get(0)?,
        begin_time: r.get(1)?,
        raw_count: count(r.get(2)?),
        valid_count: count(r.get(3)?),
        in_mozilla_db: r.get::<_, Option<bool>>(4)?.unwrap_or(false),
        raw_score: r.get(5)?,
        normalized_score: r.get(6)?,
        categories,
    })
}

impl MeasurementSource for SqliteSource {
    fn catalog(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        let sql = format!(
            "WITH n AS (
                SELECT COALESCE(issuer, '') AS issuer, beginTime, rawCount,
                       issuerInMozillaDB, rawScore
                  FROM {t}
             )
             SELECT m.issuer,
                    COALESCE(SUM(m.rawCount), 0),
                    COALESCE(MAX(m.issuerInMozillaDB), 0),
                    (SELECT l.rawScore FROM n l
                      WHERE l.issuer = m.issuer
                      ORDER BY l.beginTime DESC LIMIT 1)
             FROM n m
             GROUP BY m.issuer
             ORDER BY m.issuer",
            t = MEASUREMENTS_TABLE
        );
        self.arm_deadline();
        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.classify(e))?;
        let rows = stmt
            .query_map([], |r| {
                Ok(CatalogEntry {
                    issuer: r.get(0)?,
                    total_issuance: count(r.get(1)?),
                    in_trust_store: r.get(2)?,
                    current_raw_score: r.get(3)?,
                })
            })
            .map_err(|e| self.classify(e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| self.classify(e))?;
        Ok(rows)
    }

    fn issuer_rows(&self, issuer: &str) -> Result<Vec<MeasurementRow>, DataSourceError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE COALESCE(issuer, '') = ?1 ORDER BY beginTime ASC",
            measurement_columns(),
            MEASUREMENTS_TABLE
        );
        self.arm_deadline();
        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.classify(e))?;
        let rows = stmt
            .query_map(params![issuer], read_measurement)
            .map_err(|e| self.classify(e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| self.classify(e))?;
        Ok(rows)
    }

    fn issuer_examples(&self, issuer: &str) -> Result<Vec<ExampleRow>, DataSourceError> {
        if !self.has_examples {
            return Ok(vec![]);
        }
        let mut cols = vec!["COALESCE(issuer, '')".to_string()];
        for cat in Category::ALL {
            cols.push(cat.example_column());
            cols.push(cat.last_seen_column());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE COALESCE(issuer, '') = ?1",
            cols.join(", "),
            EXAMPLES_TABLE
        );
        self.arm_deadline();
        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.classify(e))?;
        let rows = stmt
            .query_map(params![issuer], |r| {
                let mut slots: [ExampleSlot; CATEGORY_COUNT] = Default::default();
                for (i, slot) in slots.iter_mut().enumerate() {
                    slot.pem = r.get(1 + i * 2)?;
                    slot.last_seen = r.get(2 + i * 2)?;
                }
                Ok(ExampleRow {
                    issuer: r.get(0)?,
                    slots,
                })
            })
            .map_err(|e| self.classify(e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| self.classify(e))?;
        Ok(rows)
    }

    fn snapshot_digest(&self) -> Result<Option<String>, DataSourceError> {
        let snapshot_err = |source| DataSourceError::Snapshot {
            path: self.path.clone(),
            source,
        };
        let mut hasher = Sha256::new();
        let mut f = File::open(&self.path).map_err(snapshot_err)?;
        let mut buf = [0u8; 8192];
        loop {
            let n = f.read(&mut buf).map_err(snapshot_err)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Some(hex::encode(hasher.finalize())))
    }
}
