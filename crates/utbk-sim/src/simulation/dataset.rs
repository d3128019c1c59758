use super::domain::CutoffRecord;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub enum DatasetError {
    SourceNotFound {
        path: PathBuf,
    },
    ReadFailure {
        path: PathBuf,
        source: io::Error,
    },
    ParseFailure {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::SourceNotFound { path } => {
                write!(f, "cutoff dataset '{}' was not found", path.display())
            }
            DatasetError::ReadFailure { path, source } => write!(
                f,
                "failed to read cutoff dataset '{}': {}",
                path.display(),
                source
            ),
            DatasetError::ParseFailure { path, source } => write!(
                f,
                "invalid JSON in cutoff dataset '{}': {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::SourceNotFound { .. } => None,
            DatasetError::ReadFailure { source, .. } => Some(source),
            DatasetError::ParseFailure { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCutoffRow {
    #[serde(rename = "Universitas", default, deserialize_with = "text_or_empty")]
    university: String,
    #[serde(rename = "JURUSAN", default, deserialize_with = "text_or_empty")]
    major: String,
    #[serde(rename = "SKOR UTBK", default, deserialize_with = "score_as_text")]
    raw_score: Option<String>,
}

/// A null or non-string cell counts as an empty field, so the row is dropped
/// by the completeness filter instead of failing the whole dataset.
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => text,
        _ => String::new(),
    })
}

/// Accepts the score cell as either a JSON string or a bare number; anything
/// else is treated as missing and falls through to the 0.0 fallback.
fn score_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}

/// Strips parentheses, converts the comma decimal separator to a period, and
/// parses the remainder; non-numeric input becomes 0.0 and is filtered out.
fn normalize_score(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parses the raw dataset content, keeping only rows with a university, a
/// major, and a strictly positive minimum score.
pub fn parse_cutoffs(content: &str) -> Result<Vec<CutoffRecord>, serde_json::Error> {
    let rows: Vec<RawCutoffRow> = serde_json::from_str(content)?;
    let total = rows.len();

    let records: Vec<CutoffRecord> = rows
        .into_iter()
        .filter_map(|row| {
            if row.university.is_empty() || row.major.is_empty() {
                return None;
            }

            let min_score = normalize_score(row.raw_score.as_deref().unwrap_or("0"));
            if min_score > 0.0 {
                Some(CutoffRecord {
                    university: row.university,
                    major: row.major,
                    min_score,
                })
            } else {
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!(
            dropped = total - records.len(),
            kept = records.len(),
            "dropped incomplete or non-positive cutoff rows"
        );
    }

    Ok(records)
}

/// Loads the cutoff dataset from disk. Reads the file once per call; the
/// dataset is static, so callers may load per request or cache the result.
pub fn load_cutoffs(path: &Path) -> Result<Vec<CutoffRecord>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| DatasetError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Err(DatasetError::ReadFailure {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "dataset file is empty"),
        });
    }

    parse_cutoffs(&content).map_err(|source| DatasetError::ParseFailure {
        path: path.to_path_buf(),
        source,
    })
}
