//! Error types for report generation.
//!
//! Layout and serialization cannot fail on well-formed payloads: empty
//! sections degrade to placeholder lines and internal bookkeeping is asserted.
//! The variants here cover what is left: the caller asking for an output
//! format we do not produce, and the I/O and JSON plumbing around exports.

use crate::report::OutputFormat;

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested output format is not one we can produce (client error)
    #[error("Unsupported output format '{requested}': expected one of {}", OutputFormat::supported_list())]
    UnsupportedFormat {
        /// The format string as requested by the caller
        requested: String,
    },

    /// Unknown report kind requested
    #[error("Unknown report kind '{0}': expected 'participants' or 'modules'")]
    UnknownReportKind(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was caused by the request rather than by the engine.
    ///
    /// The routing layer maps client errors to HTTP 400.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnsupportedFormat { .. } | Error::UnknownReportKind(_))
    }
}
