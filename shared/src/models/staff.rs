//! Staff & Settings Model
//!
//! Settings and staff rows are managed elsewhere; the service only reads
//! them to check a scanner PIN login.

use serde::{Deserialize, Serialize};

/// Email reported for the built-in admin identity
pub const ADMIN_EMAIL: &str = "admin@store.local";

/// Per-shop settings record, resolved once per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AppSettings {
    pub shop: String,
    pub admin_name: String,
    #[serde(skip_serializing)]
    pub admin_pin: String,
}

impl AppSettings {
    pub const DEFAULT_ADMIN_NAME: &'static str = "Admin";
    pub const DEFAULT_ADMIN_PIN: &'static str = "1234";

    pub fn with_defaults(shop: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            admin_name: Self::DEFAULT_ADMIN_NAME.to_string(),
            admin_pin: Self::DEFAULT_ADMIN_PIN.to_string(),
        }
    }

    /// Admin login: identifier is the admin name (any case) or `admin`
    pub fn authenticate_admin(&self, identifier: &str, pin: &str) -> Option<StaffIdentity> {
        let identifier = identifier.to_lowercase();
        let name_matches =
            identifier == self.admin_name.to_lowercase() || identifier == "admin";
        if name_matches && self.admin_pin == pin {
            Some(StaffIdentity {
                name: self.admin_name.clone(),
                email: ADMIN_EMAIL.to_string(),
                is_admin: true,
            })
        } else {
            None
        }
    }
}

/// Staff member row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffMember {
    pub id: i64,
    pub shop: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub pin: String,
}

impl StaffMember {
    pub fn identity(&self) -> StaffIdentity {
        StaffIdentity {
            name: self.name.clone(),
            email: self.email.clone(),
            is_admin: false,
        }
    }
}

/// Authenticated scanner operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffIdentity {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// POST /api/proxy/auth body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAuthRequest {
    pub identifier: String,
    pub pin: String,
}

/// POST /api/proxy/auth response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAuthResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff: Option<StaffIdentity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_matches_name_case_insensitively() {
        let settings = AppSettings {
            shop: "s".into(),
            admin_name: "Maria".into(),
            admin_pin: "9876".into(),
        };
        let admin = settings.authenticate_admin("MARIA", "9876").unwrap();
        assert!(admin.is_admin);
        assert_eq!(admin.name, "Maria");
        assert_eq!(admin.email, ADMIN_EMAIL);

        assert!(settings.authenticate_admin("admin", "9876").is_some());
        assert!(settings.authenticate_admin("maria", "0000").is_none());
        assert!(settings.authenticate_admin("bob", "9876").is_none());
    }

    #[test]
    fn defaults() {
        let settings = AppSettings::with_defaults("s");
        assert!(settings.authenticate_admin("Admin", "1234").is_some());
    }

    #[test]
    fn pins_are_not_serialized() {
        let json = serde_json::to_value(AppSettings::with_defaults("s")).unwrap();
        assert!(json.get("admin_pin").is_none());

        let member = StaffMember {
            id: 1,
            shop: "s".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            pin: "1111".into(),
        };
        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("pin").is_none());
        assert!(!member.identity().is_admin);
    }
}
