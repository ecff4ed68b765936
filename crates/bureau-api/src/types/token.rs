//! Credenciais de sessão (access + refresh)

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Par de credenciais emitido por `/auth/login` e `/auth/refresh`.
///
/// O par é sempre gravado e substituído inteiro; nunca existe um access token
/// sem o refresh token correspondente.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: default_token_type(),
        }
    }

    /// Valor do header `Authorization` para o access token
    pub fn authorization_header(&self) -> String {
        bearer(&self.access_token)
    }
}

// Tokens nunca aparecem inteiros em logs ou Debug.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &preview(&self.access_token))
            .field("refresh_token", &preview(&self.refresh_token))
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Formata o header `Authorization: Bearer <token>`
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Prévia segura de um token para logs: primeiros caracteres + `...`
pub fn preview(token: &str) -> String {
    let head: String = token.chars().take(6).collect();
    if head.len() < token.len() {
        format!("{}...", head)
    } else {
        "***".to_string()
    }
}

/// Credenciais enviadas para `/auth/login`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
