//! Flat tabular form of an entry, as stored in the record file.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::entry::{Entry, EntryError, ExerciseSet, PLACEHOLDER_EXERCISE};
use crate::model::names::{ExerciseName, ProgramName, Weight};

/// Column order of the record file.
pub const RECORD_COLUMNS: [&str; 5] = ["date", "program_name", "exercise_name", "weight", "reps"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while interpreting a stored row.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("invalid date: {raw:?}")]
    InvalidDate { raw: String },

    #[error("weight is not a number: {raw:?}")]
    InvalidWeight { raw: String },

    #[error("reps is not a whole number: {raw:?}")]
    InvalidReps { raw: String },

    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// One row exactly as it sits in storage: every cell is text.
///
/// Numbers are coerced only when the record is turned into an [`Entry`], so a
/// corrupted cell surfaces as a [`RecordError`] instead of a silent zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub date: String,
    pub program_name: String,
    pub exercise_name: String,
    pub weight: String,
    pub reps: String,
}

impl EntryRecord {
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        match entry {
            Entry::Placeholder { date, program } => Self {
                date: format_date(*date),
                program_name: program.as_str().to_owned(),
                exercise_name: PLACEHOLDER_EXERCISE.to_owned(),
                weight: format_weight(Weight::ZERO),
                reps: "0".to_owned(),
            },
            Entry::Exercise {
                date,
                program,
                exercise,
                weight,
                reps,
            } => Self {
                date: format_date(*date),
                program_name: program.as_str().to_owned(),
                exercise_name: exercise.as_str().to_owned(),
                weight: format_weight(*weight),
                reps: reps.to_string(),
            },
        }
    }

    /// Convert the record back into a domain `Entry`.
    ///
    /// Placeholder rows ignore their weight and reps cells.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the date or numbers cannot be parsed, or the
    /// values fail entry validation.
    pub fn into_entry(self) -> Result<Entry, RecordError> {
        let date = parse_date(&self.date)?;
        let program = ProgramName::new(self.program_name)?;
        if self.exercise_name.trim() == PLACEHOLDER_EXERCISE {
            return Ok(Entry::placeholder(date, program));
        }

        let exercise = ExerciseName::new(self.exercise_name)?;
        let weight = Weight::new(parse_weight(&self.weight)?)?;
        let reps = parse_reps(&self.reps)?;
        Ok(Entry::exercise(
            date,
            program,
            ExerciseSet {
                exercise,
                weight,
                reps,
            },
        ))
    }
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Weights are always written with a decimal point ("100.0", "2.5").
#[must_use]
pub fn format_weight(weight: Weight) -> String {
    let kg = weight.kg();
    if kg.fract() == 0.0 {
        format!("{kg:.1}")
    } else {
        kg.to_string()
    }
}

/// Parse a stored date cell into a calendar date.
///
/// Accepts plain ISO dates as well as timestamp forms other tools tend to
/// write (`2024-01-01 00:00:00`, `2024-01-01T00:00:00.000`, RFC 3339). The
/// time part is dropped without any timezone conversion.
///
/// # Errors
///
/// Returns `RecordError::InvalidDate` if no accepted format matches.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RecordError> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    Err(RecordError::InvalidDate {
        raw: raw.to_string(),
    })
}

/// Coerce a weight cell to a number.
///
/// # Errors
///
/// Returns `RecordError::InvalidWeight` if the cell is not numeric.
pub fn parse_weight(raw: &str) -> Result<f64, RecordError> {
    let s = raw.trim();
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordError::InvalidWeight {
            raw: raw.to_string(),
        })
}

/// Coerce a reps cell to a count. Integral floats such as `"5.0"` are accepted.
///
/// # Errors
///
/// Returns `RecordError::InvalidReps` for non-numeric or fractional cells and
/// `RecordError::Entry` for negative counts.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn parse_reps(raw: &str) -> Result<u32, RecordError> {
    let s = raw.trim();
    let invalid = || RecordError::InvalidReps {
        raw: raw.to_string(),
    };
    let value = match s.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = s.parse::<f64>().map_err(|_| invalid())?;
            if !f.is_finite() || f.fract() != 0.0 || f.abs() > i64::MAX as f64 {
                return Err(invalid());
            }
            f as i64
        }
    };
    if value < 0 {
        return Err(EntryError::NegativeReps { reps: value }.into());
    }
    u32::try_from(value).map_err(|_| EntryError::RepsOutOfRange { reps: value }.into())
}
