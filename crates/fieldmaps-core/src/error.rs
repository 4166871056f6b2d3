//! Error types for the field maps library.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to rasterize the current map viewport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Viewport capture failed: {message}")]
pub struct CaptureError {
    pub message: String,
}

impl CaptureError {
    /// Create a capture error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Comprehensive error type for all field maps operations.
#[derive(Error, Debug)]
pub enum FieldMapsError {
    /// Operation referenced a location id absent from the store
    #[error("Location with ID {id} not found")]
    LocationNotFound { id: u64 },
    /// Rasterization of the viewport failed
    #[error(transparent)]
    Capture(#[from] CaptureError),
    /// Any failure during the sequential export loop
    #[error("Export aborted at page {page} ({location}): {source}")]
    ExportAborted {
        page: usize,
        location: String,
        #[source]
        source: Box<FieldMapsError>,
    },
    /// Document writer errors
    #[error("Document error: {message}")]
    Document { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> FieldMapsError {
        FieldMapsError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl FieldMapsError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a document writer error.
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Wraps a failure raised while producing page `page` for `location`.
    pub fn export_aborted(
        page: usize,
        location: impl Into<String>,
        source: FieldMapsError,
    ) -> Self {
        Self::ExportAborted {
            page,
            location: location.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error (or the error it wraps) is a capture failure.
    pub fn is_capture_failure(&self) -> bool {
        match self {
            Self::Capture(_) => true,
            Self::ExportAborted { source, .. } => source.is_capture_failure(),
            _ => false,
        }
    }
}

/// Extension trait for I/O results that need a path attached.
pub trait IoResultExt<T> {
    /// Map an I/O error into [`FieldMapsError::FileSystem`] for `path`.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| FieldMapsError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Result type alias for field maps operations
pub type Result<T> = std::result::Result<T, FieldMapsError>;
