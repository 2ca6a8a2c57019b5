//! Error types for the statistics estimators
//!
//! Provides a unified error type for the recoverable failure paths of this
//! crate (histogram dump I/O and parsing). Contract violations such as
//! mutating a finalized estimator panic instead; see the individual methods.

use thiserror::Error;

/// Error type for histogram dump I/O and parsing
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (for dump read/write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a malformed dump line
    pub fn malformed_line(line_no: usize, line: &str) -> Self {
        Self::InvalidInput(format!("malformed histogram line {line_no}: {line:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("negative value".to_string());
        assert_eq!(err.to_string(), "Invalid input: negative value");

        let err = Error::malformed_line(3, "a\tb\tc");
        assert_eq!(
            err.to_string(),
            "Invalid input: malformed histogram line 3: \"a\\tb\\tc\""
        );

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::from(io);
        assert!(err.to_string().contains("disk full"));
    }
}
