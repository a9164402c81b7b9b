//! Result and error types for Pagewright.

use thiserror::Error;

/// Result type for Pagewright operations
pub type PagewrightResult<T> = Result<T, PagewrightError>;

/// Errors that can occur in Pagewright
#[derive(Debug, Error)]
pub enum PagewrightError {
    /// Browser executable not found at the resolved path
    #[error("Browser driver not found at {path}")]
    DriverNotFound {
        /// Path that was probed
        path: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    ScriptError {
        /// Error message
        message: String,
    },

    /// A wait condition was never satisfied.
    ///
    /// Covers both "the condition stayed false" and "the element never
    /// existed" — the two are deliberately not distinguished.
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Live element lookup matched zero elements
    #[error("No element matched locator {locator}")]
    ElementNotFound {
        /// Locator that matched nothing
        locator: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// Environment data folder does not exist
    #[error("Environment folder '{path}' does not exist")]
    MissingDataFolder {
        /// Folder that was probed
        path: String,
    },

    /// Derived CSV file does not exist
    #[error("No CSV file found for test '{test}' at '{path}'")]
    MissingDataFile {
        /// Test name the path was derived from
        test: String,
        /// Path that was probed
        path: String,
    },

    /// Data row is missing a required field
    #[error("Data row {index} is missing required field '{field}'")]
    MissingField {
        /// Zero-based row index
        index: usize,
        /// Field name
        field: String,
    },

    /// Environment key absent from the configuration document
    #[error("Environment '{env}' not present in config '{path}'")]
    UnknownEnvironment {
        /// Environment name
        env: String,
        /// Config file path
        path: String,
    },

    /// Assertion failed in a business flow
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PagewrightError {
    /// Check whether this error is a readiness timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check whether this error is a fatal configuration error
    /// (raised before any test body executes, never retried)
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDataFolder { .. }
                | Self::MissingDataFile { .. }
                | Self::UnknownEnvironment { .. }
        )
    }
}
