//! # Error Types
//!
//! Structured error types for split_core. Every failure the splitter can hit
//! (bad position reads, input events missing coordinates, host binding
//! failures) maps onto one variant here, so the browser layer can report it
//! with a stable code instead of crashing the interaction.
//!
//! ## Example
//!
//! ```rust
//! use split_core::errors::{SplitError, SplitResult};
//!
//! fn require_touch(count: usize) -> SplitResult<()> {
//!     if count == 0 {
//!         return Err(SplitError::NoTouchPoint {
//!             event_type: "touchmove".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_touch(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for split_core operations
pub type SplitResult<T> = Result<T, SplitError>;

/// Structured error type for splitter operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SplitError {
    /// The split property has never been written on the root element
    #[error("Split property '{name}' is not set")]
    MissingProperty { name: String },

    /// The split property holds something that is not a pixel offset
    #[error("Malformed split position '{raw}': {reason}")]
    MalformedPosition { raw: String, reason: String },

    /// A touch event arrived with an empty touch list
    #[error("No touch point in '{event_type}' event")]
    NoTouchPoint { event_type: String },

    /// A pointer event arrived without a horizontal client coordinate
    #[error("No horizontal coordinate in '{event_type}' event")]
    MissingCoordinate { event_type: String },

    /// A drag session was started twice
    #[error("Drag session already {state}; sessions are single-use")]
    SessionReused { state: String },

    /// Element lookup by id failed
    #[error("Element not found: #{id}")]
    MissingElement { id: String },

    /// Configuration failed validation
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// The host environment rejected an operation
    #[error("Host error: {operation} - {reason}")]
    HostError { operation: String, reason: String },
}

impl SplitError {
    /// Create a MissingProperty error
    pub fn missing_property(name: impl Into<String>) -> Self {
        SplitError::MissingProperty { name: name.into() }
    }

    /// Create a MalformedPosition error
    pub fn malformed_position(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        SplitError::MalformedPosition {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoTouchPoint error
    pub fn no_touch_point(event_type: impl Into<String>) -> Self {
        SplitError::NoTouchPoint {
            event_type: event_type.into(),
        }
    }

    /// Create a MissingCoordinate error
    pub fn missing_coordinate(event_type: impl Into<String>) -> Self {
        SplitError::MissingCoordinate {
            event_type: event_type.into(),
        }
    }

    /// Create a MissingElement error
    pub fn missing_element(id: impl Into<String>) -> Self {
        SplitError::MissingElement { id: id.into() }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SplitError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a HostError
    pub fn host_error(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        SplitError::HostError {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// True when the error only means "no usable prior position", which the
    /// controller answers by recentering.
    pub fn is_position_fallback(&self) -> bool {
        matches!(
            self,
            SplitError::MissingProperty { .. } | SplitError::MalformedPosition { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SplitError::MissingProperty { .. } => "MISSING_PROPERTY",
            SplitError::MalformedPosition { .. } => "MALFORMED_POSITION",
            SplitError::NoTouchPoint { .. } => "NO_TOUCH_POINT",
            SplitError::MissingCoordinate { .. } => "MISSING_COORDINATE",
            SplitError::SessionReused { .. } => "SESSION_REUSED",
            SplitError::MissingElement { .. } => "MISSING_ELEMENT",
            SplitError::InvalidConfig { .. } => "INVALID_CONFIG",
            SplitError::HostError { .. } => "HOST_ERROR",
        }
    }
}
