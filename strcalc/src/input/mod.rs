//! Expression input handling for the CLI
//!
//! Reads an expression from a file with compile-time size limits and UTF-8
//! validation. The tokenizing core itself never performs I/O; all failure
//! modes here belong to the command-line layer.

use crate::config::compile_time::input::{LARGE_EXPRESSION_THRESHOLD, MAX_EXPRESSION_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_warning};
use std::fs;
use std::path::{Path, PathBuf};

/// Expression input errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputError {
    #[error("expression file not found: {path}")]
    FileNotFound { path: String },

    #[error("expression too large: {size} bytes (max: {max_size})")]
    ExpressionTooLarge { size: u64, max_size: u64 },

    #[error("invalid UTF-8 encoding in expression file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading expression file: {message}")]
    Io { message: String },
}

impl InputError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            InputError::FileNotFound { .. } => codes::input::FILE_NOT_FOUND,
            InputError::ExpressionTooLarge { .. } => codes::input::EXPRESSION_TOO_LARGE,
            InputError::InvalidEncoding { .. } => codes::input::INVALID_ENCODING,
            InputError::Io { .. } => codes::input::IO_ERROR,
        }
    }
}

/// Expression read from a file, with its origin
#[derive(Debug, Clone)]
pub struct ExpressionInput {
    pub text: String,
    pub source: PathBuf,
    pub size: u64,
}

impl ExpressionInput {
    /// Check if the expression is large enough to be worth flagging
    pub fn is_large(&self) -> bool {
        self.size > LARGE_EXPRESSION_THRESHOLD as u64
    }
}

/// Read an expression from a file, enforcing the size limit before reading
pub fn read_expression_file(path: &Path) -> Result<ExpressionInput, InputError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => InputError::Io {
            message: e.to_string(),
        },
    })?;

    let size = metadata.len();
    if size > MAX_EXPRESSION_SIZE as u64 {
        let error = InputError::ExpressionTooLarge {
            size,
            max_size: MAX_EXPRESSION_SIZE as u64,
        };
        log_error!(error.error_code(), "Expression file exceeds size limit",
            "path" => path.display(),
            "size" => size,
            "limit" => MAX_EXPRESSION_SIZE
        );
        return Err(error);
    }

    let bytes = fs::read(path).map_err(|e| InputError::Io {
        message: e.to_string(),
    })?;

    let text = String::from_utf8(bytes).map_err(|_| InputError::InvalidEncoding {
        path: path.display().to_string(),
    })?;

    let input = ExpressionInput {
        text,
        source: path.to_path_buf(),
        size,
    };

    if input.is_large() {
        log_warning!("Expression file is large",
            "path" => path.display(),
            "size" => size
        );
    }

    log_debug!("Expression file read",
        "path" => path.display(),
        "size" => size
    );

    Ok(input)
}
