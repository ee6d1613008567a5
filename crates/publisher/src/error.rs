// ABOUTME: Error types for the publisher including the ErrorCode enum and the Error struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the categories of publish failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Conversion,
    Serialization,
    Publish,
    Transport,
    Timeout,
    InvalidRequest,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Conversion => "conversion error",
            ErrorCode::Serialization => "serialization error",
            ErrorCode::Publish => "publish error",
            ErrorCode::Transport => "transport error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::InvalidRequest => "invalid request",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for conversion, partitioning and publishing.
///
/// `page` is the index of the partition being published when the error
/// occurred, if any.
#[derive(Debug, thiserror::Error)]
pub struct Error {
    pub code: ErrorCode,
    pub op: String,
    pub page: Option<usize>,
    pub message: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "telepage: {}: {}", self.op, self.code)?;
        if let Some(page) = self.page {
            write!(f, " (page {})", page)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl Error {
    fn new(
        code: ErrorCode,
        op: impl Into<String>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            op: op.into(),
            page: None,
            message: message.into(),
            source,
        }
    }

    /// Create a Conversion error.
    pub fn conversion(
        op: impl Into<String>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Conversion, op, message, source)
    }

    /// Create a Serialization error.
    pub fn serialization(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Serialization, op, "", source)
    }

    /// Create a Publish error carrying the string reported by the service.
    pub fn publish(op: impl Into<String>, service_error: impl Into<String>) -> Self {
        Self::new(ErrorCode::Publish, op, service_error, None)
    }

    /// Create a Transport error.
    pub fn transport(
        op: impl Into<String>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Transport, op, message, source)
    }

    /// Create a Timeout error.
    pub fn timeout(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Timeout, op, "", source)
    }

    /// Create an InvalidRequest error.
    pub fn invalid_request(op: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, op, message, None)
    }

    /// Attach the index of the partition that failed.
    pub fn at_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// The error string returned by the service, for Publish errors.
    pub fn service_error(&self) -> Option<&str> {
        match self.code {
            ErrorCode::Publish => Some(self.message.as_str()),
            _ => None,
        }
    }

    /// Returns true if this is a Conversion error.
    pub fn is_conversion(&self) -> bool {
        self.code == ErrorCode::Conversion
    }

    /// Returns true if this is a Serialization error.
    pub fn is_serialization(&self) -> bool {
        self.code == ErrorCode::Serialization
    }

    /// Returns true if this is a Publish error.
    pub fn is_publish(&self) -> bool {
        self.code == ErrorCode::Publish
    }

    /// Returns true if this is a Transport error.
    pub fn is_transport(&self) -> bool {
        self.code == ErrorCode::Transport
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is an InvalidRequest error.
    pub fn is_invalid_request(&self) -> bool {
        self.code == ErrorCode::InvalidRequest
    }
}
