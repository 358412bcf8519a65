//! User types

use serde::{Deserialize, Deserializer, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Parse a role submitted through a form.
    ///
    /// Only the exact string `admin` grants the admin role; anything else
    /// (including an empty field) is a regular user.
    pub fn from_form(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Unknown role strings on disk load as `User` instead of failing the
/// whole roster.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Role::from_form).unwrap_or_default())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One roster entry.
///
/// Field names on disk are `mail` and `type` so existing `users.json`
/// documents keep loading. Records written from a form with blank fields
/// may lack keys; those load as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(rename = "mail", default)]
    pub email: String,
    /// Stored as plaintext.
    #[serde(default)]
    pub password: String,
    #[serde(rename = "type", default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
