//! Error types for the kmeans1d crate

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during clustering operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The number of clusters is not a positive integer
    #[error("Invalid number of clusters: {k} (must be > 0)")]
    InvalidK {
        /// Requested number of clusters
        k: usize,
    },

    /// A record does not expose the attribute being clustered on
    #[error("Record at index {index} has no numeric attribute '{attribute}'")]
    MissingAttribute {
        /// Position of the offending record in the input
        index: usize,
        /// Attribute that was requested
        attribute: String,
    },

    /// The assignment did not stabilise within the iteration cap
    #[error("Did not converge after {iterations} iterations")]
    DidNotConverge {
        /// Number of assignment passes performed
        iterations: usize,
    },

    /// Invalid configuration parameter
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Error message
        message: String,
    },

    /// An input entry cannot be clustered
    #[error("Invalid data at index {index}: {message}")]
    InvalidData {
        /// Position of the offending entry in the input
        index: usize,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new InvalidK error
    pub fn invalid_k(k: usize) -> Self {
        Self::InvalidK { k }
    }

    /// Create a new MissingAttribute error
    pub fn missing_attribute(index: usize, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            index,
            attribute: attribute.into(),
        }
    }

    /// Create a new DidNotConverge error
    pub fn did_not_converge(iterations: usize) -> Self {
        Self::DidNotConverge { iterations }
    }

    /// Create a new InvalidParameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a new InvalidData error
    pub fn invalid_data(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidData {
            index,
            message: message.into(),
        }
    }
}
