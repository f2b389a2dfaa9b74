//! Crate-level error type, `Result` alias, and the closed `StatusCode`
//! enumeration every query outcome folds into. GDAL failures surface as
//! `UnreadableRaster` carrying the offending path.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Raster not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unreadable raster {}: {reason}", path.display())]
    UnreadableRaster { path: PathBuf, reason: String },

    #[error("Class whitelist is empty")]
    EmptyClassList,

    #[error("Duplicate class code in whitelist: {code}")]
    DuplicateClass { code: i64 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("No valid data for {metric}")]
    NoValidData { metric: &'static str },

    #[error("Scan ended mid-row: {cells} cells fed for width {width}")]
    TruncatedScan { cells: usize, width: usize },

    #[error("Short read at row {first_row}: expected {expected} cells, got {actual}")]
    ShortStrip {
        first_row: usize,
        expected: usize,
        actual: usize,
    },
}

impl Error {
    pub fn invalid_argument<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }

    /// Fold this error into the closed status enumeration.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::FileNotFound { .. } => StatusCode::FileNotFound,
            Error::UnreadableRaster { .. }
            | Error::TruncatedScan { .. }
            | Error::ShortStrip { .. } => StatusCode::UnreadableRaster,
            Error::EmptyClassList => StatusCode::EmptyClassList,
            Error::DuplicateClass { .. } | Error::InvalidArgument { .. } => {
                StatusCode::InvalidArgument
            }
            Error::NoValidData { .. } => StatusCode::NoValidData,
        }
    }
}

/// Outcome attached to every query. No result field is meaningful unless the
/// status is `Success`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StatusCode {
    Success,
    FileNotFound,
    UnreadableRaster,
    EmptyClassList,
    NoValidData,
    InvalidArgument,
}

impl StatusCode {
    /// Stable integer code, compatible with the historical native return values.
    pub fn code(self) -> i32 {
        match self {
            StatusCode::Success => 0,
            StatusCode::FileNotFound => 1,
            StatusCode::UnreadableRaster => 2,
            StatusCode::NoValidData => 3,
            StatusCode::EmptyClassList => 4,
            StatusCode::InvalidArgument => 100,
        }
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusCode::Success => "Success",
            StatusCode::FileNotFound => "FileNotFound",
            StatusCode::UnreadableRaster => "UnreadableRaster",
            StatusCode::EmptyClassList => "EmptyClassList",
            StatusCode::NoValidData => "NoValidData",
            StatusCode::InvalidArgument => "InvalidArgument",
        };
        write!(f, "{}", s)
    }
}

/// Status of a query result: `Success` for `Ok`, the folded code otherwise.
pub fn status_of<T>(result: &Result<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::Success,
        Err(e) => e.status(),
    }
}
