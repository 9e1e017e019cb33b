//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 4xxx: Fulfillment errors
/// - 5xxx: Upstream platform errors
/// - 6xxx: Scan log errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Fulfillment errors (4xxx)
    Fulfillment,
    /// Upstream platform errors (5xxx)
    Upstream,
    /// Scan log errors (6xxx)
    ScanLog,
    /// System errors (3xxx, 7xxx-9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Fulfillment,
            5000..6000 => Self::Upstream,
            6000..7000 => Self::ScanLog,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Fulfillment => "fulfillment",
            Self::Upstream => "upstream",
            Self::ScanLog => "scan_log",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1003), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Fulfillment);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Upstream);
        assert_eq!(ErrorCategory::from_code(6002), ErrorCategory::ScanLog);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::SignatureInvalid.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::NoMatchingItems.category(),
            ErrorCategory::Fulfillment
        );
        assert_eq!(
            ErrorCode::UpstreamQueryFailed.category(),
            ErrorCategory::Upstream
        );
        assert_eq!(ErrorCode::AuditWriteFailed.category(), ErrorCategory::ScanLog);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::ScanLog).unwrap();
        assert_eq!(json, "\"scan_log\"");

        let category: ErrorCategory = serde_json::from_str("\"fulfillment\"").unwrap();
        assert_eq!(category, ErrorCategory::Fulfillment);
    }
}
