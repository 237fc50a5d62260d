//! Error types for geodat.

use thiserror::Error;

use crate::GeoKind;

/// Error type for geodat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Kind string is neither `geosite` nor `geoip`
    #[error("bad_kind: {0:?} (expected geosite or geoip)")]
    InvalidKind(String),

    /// Buffer does not match the schema for the declared kind
    #[error("decode_failed: not a valid {kind} list: {source}")]
    Decode {
        kind: GeoKind,
        #[source]
        source: prost::DecodeError,
    },

    /// Dump requested without a tag
    #[error("tag_required")]
    TagRequired,

    /// No group carries the requested tag
    #[error("tag_not_found: {0}")]
    TagNotFound(String),

    /// IO error
    #[error("io_error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("json_error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for geodat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of the call is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is malformed.
    Caller,
    /// The request was fine but could not be served.
    Processing,
}

impl Error {
    /// Classify the error for exit-code or status-code selection.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::InvalidKind(_) | Error::TagRequired => ErrorClass::Caller,
            Error::Decode { .. } | Error::TagNotFound(_) | Error::Io(_) | Error::Json(_) => {
                ErrorClass::Processing
            }
        }
    }

    /// Stable short code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidKind(_) => "bad_kind",
            Error::Decode { .. } => "decode_failed",
            Error::TagRequired => "tag_required",
            Error::TagNotFound(_) => "tag_not_found",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_class() {
        assert_eq!(Error::InvalidKind("x".into()).class(), ErrorClass::Caller);
        assert_eq!(Error::TagRequired.class(), ErrorClass::Caller);
        assert_eq!(Error::TagNotFound("cn".into()).class(), ErrorClass::Processing);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(Error::from(io).class(), ErrorClass::Processing);
    }

    #[test]
    fn test_display_starts_with_code() {
        let errors = [
            Error::InvalidKind("mmdb".into()),
            Error::TagRequired,
            Error::TagNotFound("cn".into()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with(err.code()), "{}", err);
        }
    }
}
