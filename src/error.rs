use std::path::PathBuf;
use thiserror::Error;

use crate::types::{BoxError, ColumnOutOfRange};

/// Main error type for csv2sql conversions
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Cannot open {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {} at record {record}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        record: u64,
        message: String,
    },

    #[error("Configuration error{}: {message}", row_suffix(.row))]
    Configuration { row: Option<usize>, message: String },

    #[error("Filter failed at row {row}: {source}")]
    Filter {
        row: usize,
        #[source]
        source: BoxError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" at row {}", row),
        None => String::new(),
    }
}

impl ConvertError {
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Resource {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, record: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            record,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            row: None,
            message: message.into(),
        }
    }

    pub fn configuration_at(row: usize, message: impl Into<String>) -> Self {
        Self::Configuration {
            row: Some(row),
            message: message.into(),
        }
    }

    /// Wrap an error raised by a user hook while processing `row`.
    ///
    /// Out-of-range column lookups are caller configuration mistakes rather
    /// than hook failures, so they are reported as such.
    pub fn from_hook(row: usize, source: BoxError) -> Self {
        match source.downcast::<ColumnOutOfRange>() {
            Ok(out_of_range) => Self::configuration_at(row, out_of_range.to_string()),
            Err(source) => Self::Filter { row, source },
        }
    }

    /// Row index the error was raised for, when known.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Configuration { row, .. } => *row,
            Self::Filter { row, .. } => Some(*row),
            _ => None,
        }
    }
}
