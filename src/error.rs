//! Error taxonomy shared by the resolver, renderer, loader, and exporter.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Malformed or contradictory options. `field` names the offending option
    /// (`"type_"`, `"format"`, `"axis-range"`, `"size"`, ...).
    #[error("invalid option: {field}")]
    Validation { field: String },

    /// Data unsuitable for the chosen chart (e.g. `"empty-data"`).
    #[error("cannot render chart: {reason}")]
    Render { reason: String },

    /// Reading the data file or writing the output failed. Passed through as-is.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The data file (or options file) exists but could not be parsed.
    #[error("failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// A drawing backend or encoder failed while producing the output bytes.
    #[error("failed to encode chart: {0}")]
    Encode(String),
}

impl ChartError {
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    pub fn render(reason: impl Into<String>) -> Self {
        Self::Render {
            reason: reason.into(),
        }
    }

    /// Field name for validation errors, `None` otherwise.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field } => Some(field),
            _ => None,
        }
    }

    /// Reason for render errors, `None` otherwise.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Render { reason } => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_only_match_their_variant() {
        let v = ChartError::validation("format");
        assert_eq!(v.field(), Some("format"));
        assert_eq!(v.reason(), None);
        assert_eq!(v.to_string(), "invalid option: format");

        let r = ChartError::render("empty-data");
        assert_eq!(r.reason(), Some("empty-data"));
        assert_eq!(r.field(), None);
    }

    #[test]
    fn io_errors_pass_through_unchanged() {
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e: ChartError = inner.into();
        assert_eq!(e.to_string(), "nope");
        match e {
            ChartError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
