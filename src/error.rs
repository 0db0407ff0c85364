//! Pasusat - Error types
//!
//! Loading is the only fatal path. Everything a view asks for after load
//! degrades to [`ColumnNotFound`] instead.

use thiserror::Error;

use crate::species::{Metric, Species};

/// Failure to bring the census file into memory. Aborts the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid {encoding} text")]
    Encoding { path: String, encoding: &'static str },

    #[error("failed to parse CSV: {0}")]
    Parse(String),

    #[error("{0} has no header row")]
    Empty(String),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// A query named a column the loaded table does not have.
///
/// Callers skip the dependent view; this never reaches the user as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnNotFound {
    #[error("no {} column for {}", .metric.label(), .species.label())]
    Category { species: Species, metric: Metric },

    #[error("no numeric column labelled {0:?}")]
    Label(String),

    #[error("no region column {0:?}")]
    Region(String),
}
