//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for workhub
///
/// Circular provider loading is deliberately absent from this enum: it is a
/// programming defect in a provider's construction path and surfaces as a
/// panic from the registry, never as a recoverable `Err`.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// No installed provider matches the requested URI scheme
    #[error("Provider \"{scheme}\" not found")]
    ProviderNotFound {
        /// The scheme (or scheme-specific-part fallback) that failed to match
        scheme: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a provider not found error
    pub fn provider_not_found<S: Into<String>>(scheme: S) -> Self {
        Self::ProviderNotFound {
            scheme: scheme.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a configuration error (simple)
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_not_found_carries_literal_scheme() {
        let err = Error::provider_not_found("nope");
        assert_eq!(err.to_string(), "Provider \"nope\" not found");
        match err {
            Error::ProviderNotFound { scheme } => assert_eq!(scheme, "nope"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn configuration_error_preserves_source() {
        let source = Error::invalid_argument("inner");
        let err = Error::configuration_with_source("outer", source);
        assert_eq!(err.to_string(), "Configuration error: outer");
        let chained = std::error::Error::source(&err).expect("source retained");
        assert_eq!(chained.to_string(), "Invalid argument: inner");
    }
}
