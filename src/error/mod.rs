//! Error types for the fantasy advisor client.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`ApiError`]: Analysis API transport and payload errors
//! - [`SettingsError`]: Settings form validation errors
//! - [`ConfigError`]: Configuration errors
//! - [`CommandParseError`]: REPL command parsing errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Wraps all subsystem errors for unified handling at the binary boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Analysis API error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Settings error.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command parsing error.
    #[error("Command error: {0}")]
    Command(#[from] CommandParseError),

    /// Terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Analysis API errors.
///
/// Every failure mode of an outbound call maps to one of these. None of
/// them is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request timed out.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Network communication error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Status code returned.
        status: u16,
        /// Response body (may be empty).
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The payload carried `success: false`.
    #[error("Request rejected by {endpoint}")]
    Rejected {
        /// Endpoint path that reported the failure.
        endpoint: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {message}")]
    ClientBuild {
        /// Description of the builder failure.
        message: String,
    },
}

impl ApiError {
    /// Returns true if the error came from the transport rather than the payload.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }
}

/// Settings validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required field is empty.
    #[error("Missing required setting: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}

/// REPL command parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// The slash command is not known.
    #[error("Unknown command: /{command}")]
    UnknownCommand {
        /// The command name without the slash.
        command: String,
    },

    /// A required argument was not given.
    #[error("Missing argument for /{command}: {argument}")]
    MissingArgument {
        /// The command name.
        command: String,
        /// The argument that is missing.
        argument: String,
    },

    /// An argument has an unusable value.
    #[error("Invalid argument for /{command}: {message}")]
    InvalidArgument {
        /// The command name.
        command: String,
        /// Description of the problem.
        message: String,
    },
}
