use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user document. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    // Kept as supplied; nothing hashes it.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Fields accepted on create (all candidates) and update (any subset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserFields {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UserFields {
    /// First required field that is absent or empty, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .find(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> UserFields {
        UserFields {
            username: Some("testUser".to_string()),
            email: Some("test@example.com".to_string()),
            password: Some("password123".to_string()),
            role: None,
        }
    }

    #[test]
    fn test_role_is_optional() {
        assert_eq!(full().missing_required(), None);
    }

    #[test]
    fn test_missing_required_reports_first_gap() {
        let fields = UserFields {
            username: None,
            password: Some(String::new()),
            ..full()
        };
        assert_eq!(fields.missing_required(), Some("username"));

        let fields = UserFields {
            password: Some(String::new()),
            ..full()
        };
        assert_eq!(fields.missing_required(), Some("password"));
    }

    #[test]
    fn test_user_serializes_without_absent_role() {
        let user = User {
            id: "abc".to_string(),
            username: "testUser".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            role: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["id"], "abc");
        assert_eq!(json["password"], "password123");
    }
}
