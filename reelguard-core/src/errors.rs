//! reelguard error types
//!
//! Default policy for advisory failures is fail-closed: the resolver maps
//! them to the most restrictive sensitivity level instead of surfacing them.
//! The variants here exist for the paths that do surface (config, store
//! lifecycle, upstream passthrough) and for structured logging.

use thiserror::Error;

/// Error category for structured logging and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// `reelguard.toml` or env misconfigured
    ConfigError,
    /// Errors creating/connecting/querying the sensitivity store
    StoreError,
    /// Advisory page fetch or parse failures (recovered internally)
    AdvisoryError,
    /// Upstream catalog fetch failures on the passthrough path
    UpstreamError,
}

impl ErrorCategory {
    /// Machine-readable code for logging and error payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::StoreError => "STORE_ERROR",
            Self::AdvisoryError => "ADVISORY_ERROR",
            Self::UpstreamError => "UPSTREAM_ERROR",
        }
    }
}

/// reelguard error with category and context
#[derive(Debug, Error)]
pub enum ReelguardError {
    #[error("config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("advisory error: {message}")]
    Advisory {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ReelguardError {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::ConfigError,
            Self::Store { .. } => ErrorCategory::StoreError,
            Self::Advisory { .. } => ErrorCategory::AdvisoryError,
            Self::Upstream { .. } => ErrorCategory::UpstreamError,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an advisory error with source
    pub fn advisory_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Advisory {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Create an upstream error with source
    pub fn upstream_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for reelguard operations
pub type Result<T> = std::result::Result<T, ReelguardError>;
