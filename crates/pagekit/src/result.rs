//! Result and error types for pagekit.

use thiserror::Error;

/// Result type for pagekit operations
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while driving page objects
#[derive(Debug, Error)]
pub enum PageError {
    /// The browser driver reported a failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// No element matched a selector
    #[error("No element matches selector `{selector}`")]
    ElementNotFound {
        /// Selector that was queried
        selector: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A wait window was opened while another is open on the same session
    #[error("wait window is not reentrant (session {session})")]
    NestedWait {
        /// Session the nested window was requested on
        session: uuid::Uuid,
    },

    /// Screenshot capture or persistence failed
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Invalid configuration or selector spec
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PageError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create an element-not-found error
    #[must_use]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Create a navigation error
    #[must_use]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a screenshot error
    #[must_use]
    pub fn screenshot(message: impl Into<String>) -> Self {
        Self::Screenshot {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        let err = PageError::driver("session closed");
        assert_eq!(err.to_string(), "Driver error: session closed");
    }

    #[test]
    fn test_element_not_found_display() {
        let err = PageError::element_not_found("#login .submit");
        assert!(err.to_string().contains("#login .submit"));
    }

    #[test]
    fn test_navigation_error_carries_url() {
        let err = PageError::navigation("http://x/y?a=1", "net::ERR_CONNECTION_REFUSED");
        let msg = err.to_string();
        assert!(msg.contains("http://x/y?a=1"));
        assert!(msg.contains("ERR_CONNECTION_REFUSED"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PageError = io_err.into();
        assert!(matches!(err, PageError::Io(_)));
        assert!(err.to_string().contains("I/O"));
    }

    #[test]
    fn test_nested_wait_display() {
        let err = PageError::NestedWait {
            session: uuid::Uuid::nil(),
        };
        assert!(err.to_string().contains("not reentrant"));
    }

    #[test]
    fn test_config_error() {
        let err = PageError::config("duplicate selector `submit`");
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
