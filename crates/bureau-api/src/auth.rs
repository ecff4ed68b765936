//! Endpoints de autenticação e administração de usuários (`/auth/*`)

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::RequestConfig;
use crate::types::{LoginRequest, MessageResponse, NewUser, SessionIdentity, TokenPair, User};

/// Operações de `/auth`
///
/// `login` só faz a troca de credenciais; gravar o par e resolver a
/// identidade é responsabilidade de quem gerencia a sessão.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    ///
    /// Um 401 aqui significa credenciais inválidas e volta direto ao chamador,
    /// sem refresh nem encerramento de sessão.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        tracing::debug!("[AuthApi] Login de {}", username);

        let request = RequestConfig::post("/auth/login").json(&body)?.without_refresh();
        self.client.execute_json(request).await
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<SessionIdentity> {
        self.client.get_json("/auth/me").await
    }

    /// `GET /auth/users` (admin)
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.client.get_json("/auth/users").await
    }

    /// `POST /auth/users` (admin)
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.client.post_json("/auth/users", user).await
    }

    /// `DELETE /auth/users/{id}` (admin)
    pub async fn delete_user(&self, id: Uuid) -> Result<MessageResponse> {
        self.client.delete_json(&format!("/auth/users/{}", id)).await
    }
}
