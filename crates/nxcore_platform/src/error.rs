//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to initialize platform
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// The presentation surface could not be established or presented;
    /// nothing can render after this
    #[error("Fatal graphics error: {0}")]
    Fatal(String),

    /// Platform was already initialized once in this process
    #[error("Platform already initialized")]
    AlreadyInitialized,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Capability not supported on this device
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

impl PlatformError {
    /// Whether the error leaves the platform unable to render
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlatformError::Fatal(_))
    }
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
