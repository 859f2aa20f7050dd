//! Error types for agenda core
//!
//! Provides error handling for:
//! - Draft validation before submission
//! - Directory catalog loading
//! - Calendar month construction

use chrono::NaiveDate;
use std::path::PathBuf;

/// Draft validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field is blank
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    /// Date range runs backwards
    #[error("start date {start} is after end date {end}")]
    InvertedRange {
        /// First blocked day
        start: NaiveDate,
        /// Last blocked day
        end: NaiveDate,
    },

    /// Coordinator not in the catalog
    #[error("unknown coordinator: {0}")]
    UnknownCoordinator(String),

    /// Profession not in the catalog
    #[error("unknown profession: {0}")]
    UnknownProfession(String),

    /// Block type not in the catalog
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    /// Professional is not on the roster for the profession
    #[error("{professional} is not on the {profession} roster")]
    NotOnRoster {
        /// Staff member named in the draft
        professional: String,
        /// Discipline named in the draft
        profession: String,
    },
}

impl ValidationError {
    /// Create roster membership error
    pub fn not_on_roster(professional: impl Into<String>, profession: impl Into<String>) -> Self {
        Self::NotOnRoster {
            professional: professional.into(),
            profession: profession.into(),
        }
    }
}

/// Directory catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("io error reading {path}: {source}")]
    Io {
        /// Catalog file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Catalog TOML is malformed
    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// Catalog parsed but is unusable
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Calendar construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Month outside 1..=12 or year outside the supported range
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth {
        /// Requested year
        year: i32,
        /// Requested month
        month: u32,
    },

    /// Month label did not parse as `YYYY-MM`
    #[error("invalid month label: '{0}' (expected YYYY-MM)")]
    InvalidLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::not_on_roster("HUGO OLAVE", "Médico");
        assert_eq!(err.to_string(), "HUGO OLAVE is not on the Médico roster");

        let err = ValidationError::MissingField("solicitante");
        assert!(err.to_string().contains("solicitante"));
    }

    #[test]
    fn calendar_error_display() {
        let err = CalendarError::InvalidMonth { year: 2024, month: 13 };
        assert_eq!(err.to_string(), "invalid month: 2024-13");
    }
}
