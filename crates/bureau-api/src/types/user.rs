//! Usuários do console e identidade da sessão

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Papel do usuário no console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Usuário retornado por `/auth/me` e `/auth/users`.
///
/// Quando vem de `/auth/me` representa a identidade da sessão atual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub clearance_level: i32,
    pub created_at: NaiveDateTime,
}

/// Identidade resolvida da sessão (mesmo formato de [`User`])
pub type SessionIdentity = User;

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Payload de `POST /auth/users`
#[derive(Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub clearance_level: i32,
}

impl NewUser {
    /// Novo operador com nível de acesso 1 (padrões do backend)
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: Role::Operator,
            clearance_level: 1,
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn clearance_level(mut self, level: i32) -> Self {
        self.clearance_level = level;
        self
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("clearance_level", &self.clearance_level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_backend_json() {
        let json = r#"{
            "id": "6f1c2b1e-8a34-4d7e-9a61-1d2f3e4a5b6c",
            "username": "chief",
            "role": "admin",
            "clearance_level": 5,
            "created_at": "2024-03-01T10:15:30.123456"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "chief");
        assert!(user.is_admin());
        assert_eq!(user.clearance_level, 5);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("op", "pw");
        assert_eq!(user.role, Role::Operator);
        assert_eq!(user.clearance_level, 1);

        let value = serde_json::to_value(user.role(Role::Admin).clearance_level(3)).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["clearance_level"], 3);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("guest".parse::<Role>().is_err());
    }
}
