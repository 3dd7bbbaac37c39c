//! Error types for NVVFR

use thiserror::Error;

/// Result type alias using NvvfrError
pub type Result<T> = std::result::Result<T, NvvfrError>;

/// Main error type for NVVFR operations
#[derive(Debug, Error)]
pub enum NvvfrError {
    /// Input validation error (missing or contradictory sources)
    #[error("Input error: {0}")]
    Input(String),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// NVEncC binary could not be located
    #[error("NVEncC binary not found: {0}")]
    BinaryNotFound(String),

    /// AviSynth script generation error
    #[error("Script error: {0}")]
    Script(String),

    /// Encoder error
    #[error("Encoder error: {0}")]
    Encoder(String),

    /// NVEncC exited with a non-zero status
    #[error("NVEncC failed with exit code {code}: {stderr}")]
    EncodeFailed { code: i32, stderr: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<NvvfrError>,
    },
}

impl NvvfrError {
    /// Create an input validation error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound(path.into())
    }

    /// Create a script generation error
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Create an encoder error
    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_failed_message() {
        let err = NvvfrError::EncodeFailed {
            code: 1,
            stderr: "device not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("device not found"));
    }

    #[test]
    fn test_context_wrapping() {
        let result: Result<()> = Err(NvvfrError::input("no source"));
        let wrapped = result.context("validating encode request");
        let msg = wrapped.unwrap_err().to_string();
        assert!(msg.starts_with("validating encode request"));
    }
}
