use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::assessors::ScaleKind;
use super::domain::{ApplicationId, ComponentScore, DimensionId};

#[derive(Debug)]
pub enum ScoreImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownDimension { line: u64, value: String },
    UnknownScale { line: u64, value: String },
}

impl std::fmt::Display for ScoreImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreImportError::Io(err) => write!(f, "failed to read score sheet: {}", err),
            ScoreImportError::Csv(err) => write!(f, "invalid score sheet CSV data: {}", err),
            ScoreImportError::UnknownDimension { line, value } => {
                write!(f, "line {}: unknown dimension '{}'", line, value)
            }
            ScoreImportError::UnknownScale { line, value } => {
                write!(f, "line {}: unknown scale '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for ScoreImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreImportError::Io(err) => Some(err),
            ScoreImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScoreImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Component scores grouped by application, in application id order.
pub type ScoreSheet = BTreeMap<ApplicationId, BTreeMap<DimensionId, ComponentScore>>;

/// Reads externally computed component scores from a CSV sheet with the
/// columns `application_id,dimension,score,scale`.
///
/// A blank score marks the dimension unavailable. A blank scale means percent.
/// When a dimension repeats for the same application the last row wins.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ScoreSheet, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ScoreSheet, ScoreImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut sheet = ScoreSheet::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|position| position.line()).unwrap_or_default();
            let row: ScoreRow = record.deserialize(Some(&headers))?;
            let dimension = DimensionId::parse(&row.dimension).ok_or_else(|| {
                ScoreImportError::UnknownDimension {
                    line,
                    value: row.dimension.clone(),
                }
            })?;
            let scale = ScaleKind::parse(row.scale.as_deref().unwrap_or_default()).ok_or_else(
                || ScoreImportError::UnknownScale {
                    line,
                    value: row.scale.clone().unwrap_or_default(),
                },
            )?;

            let score = match row.score {
                Some(value) => ComponentScore::available(dimension, scale.raw(value).normalize())
                    .with_evidence(format!("imported from score sheet line {line}")),
                None => ComponentScore::unavailable(dimension, "score sheet entry left blank"),
            };

            let scores = sheet
                .entry(ApplicationId(row.application_id.clone()))
                .or_default();
            if scores.insert(dimension, score).is_some() {
                warn!(
                    application_id = %row.application_id,
                    %dimension,
                    line,
                    "duplicate score sheet entry replaces earlier row"
                );
            }
        }

        Ok(sheet)
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    application_id: String,
    dimension: String,
    #[serde(default, deserialize_with = "empty_string_as_none_f64")]
    score: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    scale: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_string_as_none_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
