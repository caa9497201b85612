use crate::domain::constants::{CATALOG_ARTIFACT, ISSUER_ARTIFACT_DIR};
use crate::domain::models::Catalog;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to serialize {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {} after {attempts} attempt(s): {source}", .path.display())]
    Write {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File-safe stem for an issuer name: `[A-Za-z0-9]` kept, everything else `_`,
/// and a leading `_` when the result would start with a digit.
///
/// Replacement is per UTF-16 code unit, so a character outside the BMP
/// becomes `__`. The dashboard escapes names the same way when it fetches
/// `data/<stem>.json`.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.extend(std::iter::repeat('_').take(c.len_utf16()));
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

pub fn issuer_artifact_path(out_dir: &Path, issuer: &str) -> PathBuf {
    out_dir
        .join(ISSUER_ARTIFACT_DIR)
        .join(format!("{}.json", sanitize(issuer)))
}

pub fn ensure_dir(path: &Path) -> Result<(), StorageError> {
    std::fs::create_dir_all(path).map_err(|source| StorageError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, path)
}

/// Serializes `value` and replaces `path` with it, retrying failed writes `retries` times.
pub fn write_artifact<T: Serialize>(
    path: &Path,
    value: &T,
    retries: u32,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value).map_err(|source| StorageError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;
    let mut attempts = 0;
    loop {
        attempts += 1;
        match write_atomic(path, &body) {
            Ok(()) => return Ok(()),
            Err(e) if attempts <= retries => {
                tracing::debug!(path = %path.display(), error = %e, attempts, "retrying artifact write");
            }
            Err(source) => {
                return Err(StorageError::Write {
                    path: path.to_path_buf(),
                    attempts,
                    source,
                })
            }
        }
    }
}

pub fn load_catalog(out_dir: &Path) -> anyhow::Result<Catalog> {
    let path = out_dir.join(CATALOG_ARTIFACT);
    if !path.exists() {
        anyhow::bail!(
            "catalog not found at {}; run `sunlight-dash build` first",
            path.display()
        );
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
