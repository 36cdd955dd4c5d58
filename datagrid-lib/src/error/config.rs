//! ConfigError for grid configuration

/// Error type for rejected grid configurations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Pagination and virtualization were both requested for one view.
    #[error("Pagination and virtualization cannot be enabled on the same view")]
    ConflictingWindowing,

    /// Page size must be at least one row.
    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    /// A pixel dimension was zero, negative or not a number.
    #[error("{name} must be a positive number of pixels, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// The configuration file could not be parsed.
    #[error("Failed to parse grid configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Creates a new invalid dimension error.
    pub fn invalid_dimension(name: &'static str, value: f64) -> Self {
        Self::InvalidDimension { name, value }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
