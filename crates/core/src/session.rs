//! Session model and storage layout

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of the signed-in account
///
/// Deserializes through [`FromStr`], so backend responses and stored values
/// accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::unknown_role(other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Keys under which session fields are persisted
///
/// The string values are the exact keys the storefront has always used, so an
/// existing durable store stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AccessToken,
    UserEmail,
    UserName,
    UserRole,
    HasReviewed,
}

impl StorageKey {
    /// Every key the client writes
    pub const ALL: [StorageKey; 5] = [
        StorageKey::AccessToken,
        StorageKey::UserEmail,
        StorageKey::UserName,
        StorageKey::UserRole,
        StorageKey::HasReviewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AccessToken => "access_token",
            StorageKey::UserEmail => "userEmail",
            StorageKey::UserName => "userName",
            StorageKey::UserRole => "userRole",
            StorageKey::HasReviewed => "hasReviewed",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated session as produced by login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub role: Role,
    pub email: String,
    pub name: String,
    /// Selects the durable area when true, the session-scoped one otherwise
    pub remember_me: bool,
}

/// Consistent read-only view of whatever session is currently stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub access_token: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" USER ".parse::<Role>().unwrap(), Role::User);
        assert!(matches!(
            "guest".parse::<Role>(),
            Err(CoreError::UnknownRole { .. })
        ));
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_role_serde_matches_from_str() {
        for raw in ["Admin", " ADMIN ", "admin"] {
            let role: Role = serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(role, raw.parse::<Role>().unwrap());
        }
        assert!(serde_json::from_str::<Role>("\"guest\"").is_err());
    }

    #[test]
    fn test_storage_key_names() {
        let names: Vec<_> = StorageKey::ALL.iter().map(StorageKey::as_str).collect();
        assert_eq!(
            names,
            ["access_token", "userEmail", "userName", "userRole", "hasReviewed"]
        );
    }

    #[test]
    fn test_snapshot_flags() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_authenticated());
        assert!(!snapshot.is_admin());

        snapshot.access_token = Some(String::new());
        assert!(!snapshot.is_authenticated());

        snapshot.access_token = Some("T1".into());
        snapshot.role = Some(Role::Admin);
        assert!(snapshot.is_authenticated());
        assert!(snapshot.is_admin());
    }
}
