//! Unified error codes for the swatch fulfillment service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Fulfillment errors
//! - 5xxx: Upstream platform errors
//! - 6xxx: Scan log errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the scanner front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Invalid identifier or PIN
    InvalidCredentials = 1002,
    /// Request signature did not verify
    SignatureInvalid = 1003,
    /// Request signature header or parameter missing
    SignatureMissing = 1004,

    // ==================== 2xxx: Permission ====================
    /// Signed shop is not the store this deployment administers
    ShopNotServed = 2001,

    // ==================== 4xxx: Fulfillment ====================
    /// No fulfillment order in an actionable state
    NoFulfillableOrder = 4002,
    /// Verified items do not match any fulfillment-order line item
    NoMatchingItems = 4003,
    /// Upstream rejected the fulfillment request
    FulfillmentRejected = 4004,

    // ==================== 5xxx: Upstream ====================
    /// Upstream query or mutation reported an error
    UpstreamQueryFailed = 5001,

    // ==================== 6xxx: Scan log ====================
    /// Scan log entry not found
    ScanLogNotFound = 6001,
    /// Scan log entry could not be written
    AuditWriteFailed = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::InvalidCredentials => "Invalid identifier or PIN",
            ErrorCode::SignatureInvalid => "Request signature is invalid",
            ErrorCode::SignatureMissing => "Request signature is missing",

            // Permission
            ErrorCode::ShopNotServed => "Shop is not served by this deployment",

            // Fulfillment
            ErrorCode::NoFulfillableOrder => "No fulfillable orders found",
            ErrorCode::NoMatchingItems => {
                "No items to fulfill - verified items don't match fulfillment order"
            }
            ErrorCode::FulfillmentRejected => "Unable to create fulfillment",

            // Upstream
            ErrorCode::UpstreamQueryFailed => "Upstream query failed",

            // Scan log
            ErrorCode::ScanLogNotFound => "Scan log not found",
            ErrorCode::AuditWriteFailed => "Scan log could not be written",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::SignatureInvalid),
            1004 => Ok(ErrorCode::SignatureMissing),

            // Permission
            2001 => Ok(ErrorCode::ShopNotServed),

            // Fulfillment
            4002 => Ok(ErrorCode::NoFulfillableOrder),
            4003 => Ok(ErrorCode::NoMatchingItems),
            4004 => Ok(ErrorCode::FulfillmentRejected),

            // Upstream
            5001 => Ok(ErrorCode::UpstreamQueryFailed),

            // Scan log
            6001 => Ok(ErrorCode::ScanLogNotFound),
            6002 => Ok(ErrorCode::AuditWriteFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
