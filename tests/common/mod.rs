#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CATEGORIES: [&str; 6] = [
    "validPeriodTooLong",
    "deprecatedVersion",
    "deprecatedSignatureAlgorithm",
    "missingCNinSAN",
    "keyTooShort",
    "expTooSmall",
];

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub db: PathBuf,
    pub out: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let db = make_fixture_db(tmp.path());
        let out = tmp.path().join("dashboard");

        Self {
            _tmp: tmp,
            home,
            db,
            out,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("sunlight-dash");
        cmd.env("HOME", &self.home)
            .arg("--db")
            .arg(&self.db);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn build(&self) -> Value {
        let out = self.out.to_str().expect("out path utf8").to_string();
        self.run_json(&["build", "--out-dir", &out])
    }

    pub fn artifact(&self, rel: &str) -> Value {
        let raw = fs::read_to_string(self.out.join(rel)).expect("read artifact");
        serde_json::from_str(&raw).expect("artifact json")
    }
}

/// (issuer, beginTime, rawCount, issuerInMozillaDB, rawScore)
const MEASUREMENTS: &[(&str, i64, i64, bool, f64)] = &[
    ("Acme CA", 1000, 1000, true, 0.4),
    ("Acme CA", 2000, 2000, true, 0.35),
    ("Bad CA", 1000, 5000, true, 0.05),
    ("Small CA", 1000, 500, true, 0.01),
    ("Untrusted CA", 1000, 10_001, false, 0.2),
    ("1&1 uses TLS", 1000, 10, false, 0.9),
];

fn make_fixture_db(base: &Path) -> PathBuf {
    let path = base.join("BRs.db");
    let conn = Connection::open(&path).expect("open fixture db");

    let mut cols = vec![
        "issuer TEXT".to_string(),
        "beginTime INTEGER".to_string(),
        "rawCount INTEGER".to_string(),
        "validCount INTEGER".to_string(),
        "issuerInMozillaDB BOOL".to_string(),
        "rawScore REAL".to_string(),
        "normalizedScore REAL".to_string(),
    ];
    for cat in CATEGORIES {
        cols.push(format!("{}RawScore REAL", cat));
        cols.push(format!("{}NormalizedScore REAL", cat));
        cols.push(format!("{}Count INTEGER", cat));
    }
    conn.execute_batch(&format!(
        "CREATE TABLE issuerReputation ({});",
        cols.join(", ")
    ))
    .expect("create issuerReputation");

    for (issuer, begin, raw, trusted, score) in MEASUREMENTS {
        conn.execute(
            "INSERT INTO issuerReputation
               (issuer, beginTime, rawCount, validCount, issuerInMozillaDB,
                rawScore, normalizedScore, keyTooShortRawScore, keyTooShortCount)
             VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?5, 0.1234, 3)",
            params![issuer, begin, raw, trusted, score],
        )
        .expect("insert measurement");
    }

    let mut cols = vec!["issuer TEXT".to_string()];
    for cat in CATEGORIES {
        cols.push(format!("{}Example TEXT", cat));
        cols.push(format!("{}LastSeen INTEGER", cat));
    }
    conn.execute_batch(&format!(
        "CREATE TABLE issuerExamples ({});",
        cols.join(", ")
    ))
    .expect("create issuerExamples");
    for (pem, seen) in [("OLD PEM", 10), ("NEW PEM", 20)] {
        conn.execute(
            "INSERT INTO issuerExamples (issuer, expTooSmallExample, expTooSmallLastSeen)
             VALUES ('Bad CA', ?1, ?2)",
            params![pem, seen],
        )
        .expect("insert example");
    }

    path
}
