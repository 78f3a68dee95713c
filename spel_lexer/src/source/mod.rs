//! Loading expression text from files
//!
//! Expressions normally arrive as in-memory strings. For the CLI and for
//! fixture-driven tests they can also be read from a UTF-8 file, bounded by
//! the same `max_source_length` limit the tokenizer enforces.

use crate::config::compile_time::lexical::MAX_SOURCE_LENGTH;
use crate::logging::codes::{self, Code};
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },
}

impl SourceError {
    pub fn error_code(&self) -> Code {
        match self {
            SourceError::NotFound { .. } => codes::source::FILE_NOT_FOUND,
            SourceError::PermissionDenied { .. } => codes::source::PERMISSION_DENIED,
            SourceError::TooLarge { .. } => codes::source::FILE_TOO_LARGE,
            SourceError::InvalidEncoding { .. } => codes::source::INVALID_ENCODING,
            SourceError::Io { .. } => codes::source::IO_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    fn from_io(path: &str, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => SourceError::NotFound {
                path: path.to_string(),
            },
            ErrorKind::PermissionDenied => SourceError::PermissionDenied {
                path: path.to_string(),
            },
            ErrorKind::InvalidData => SourceError::InvalidEncoding {
                path: path.to_string(),
            },
            _ => SourceError::Io {
                path: path.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Read an expression file. Trailing line terminators are kept; they lex as
/// whitespace.
pub fn load_expression_file(path: impl AsRef<Path>) -> Result<String, SourceError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    log_debug!("Loading expression file", "file" => display.as_str());

    let result = read_bounded(path, &display);
    match &result {
        Ok(source) => {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS,
                "Expression file loaded",
                "file" => display.as_str(),
                "size_bytes" => source.len(),
                "lines" => source.lines().count()
            );
            if source.trim().is_empty() {
                log_warning!("Expression file has no content", "file" => display.as_str());
            }
        }
        Err(error) => {
            log_error!(error.error_code(), &error.to_string(), "file" => display.as_str());
        }
    }
    result
}

fn read_bounded(path: &Path, display: &str) -> Result<String, SourceError> {
    let metadata = fs::metadata(path).map_err(|e| SourceError::from_io(display, e))?;

    let max_size = MAX_SOURCE_LENGTH as u64;
    if metadata.len() > max_size {
        return Err(SourceError::TooLarge {
            size: metadata.len(),
            max_size,
        });
    }

    let bytes = fs::read(path).map_err(|e| SourceError::from_io(display, e))?;
    String::from_utf8(bytes).map_err(|_| SourceError::InvalidEncoding {
        path: display.to_string(),
    })
}
