//! Session Manager
//!
//! Estado de sessão explícito e injetável: quem precisa da identidade do
//! operador recebe um `SessionManager` (clones compartilham o mesmo estado).

use std::sync::Arc;

use bureau_api::{ApiClient, ApiError, AuthApi, SessionIdentity};
use tokio::sync::RwLock;

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Fotografia do estado da sessão
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<SessionIdentity>,
    /// `true` até o primeiro `bootstrap` ou `login` terminar
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Gerenciador da sessão do operador
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: ApiClient,
    auth: AuthApi,
    state: Arc<RwLock<SessionState>>,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            client,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Restaura a sessão a partir das credenciais guardadas.
    ///
    /// Sem access token não há chamada de rede. Se `/auth/me` falhar, as
    /// credenciais são descartadas e a sessão fica deslogada; o erro não
    /// chega ao chamador.
    pub async fn bootstrap(&self) -> Option<SessionIdentity> {
        let has_credentials = match self.client.has_credentials() {
            Ok(has) => has,
            Err(e) => {
                log_session_bootstrap_failed(&e.to_string());
                self.clear_store();
                false
            }
        };

        let user = if has_credentials {
            match self.auth.me().await {
                Ok(user) => {
                    log_session_restored(&user.username, user.role.as_str());
                    Some(user)
                }
                Err(e) => {
                    log_session_bootstrap_failed(&e.to_string());
                    self.clear_store();
                    None
                }
            }
        } else {
            None
        };

        self.set_state(user.clone()).await;
        user
    }

    /// Troca credenciais por um par de tokens e resolve a identidade.
    ///
    /// Credenciais recusadas não gravam nada: um par e uma identidade de
    /// uma sessão anterior continuam como estavam. Se a identidade não puder
    /// ser obtida logo após o login, o par recém gravado é descartado e o
    /// login falha por inteiro.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<SessionIdentity> {
        let pair = match self.auth.login(username, password).await {
            Ok(pair) => pair,
            Err(e) => {
                log_login_failed(username, &e.to_string());
                self.state.write().await.loading = false;
                return Err(login_error(e));
            }
        };

        self.client.store().replace(pair)?;

        match self.auth.me().await {
            Ok(user) => {
                log_login_success(&user.username);
                self.set_state(Some(user.clone())).await;
                Ok(user)
            }
            Err(e) => {
                log_login_failed(username, &e.to_string());
                self.clear_store();
                self.set_state(None).await;
                Err(AppError::LoginFailed(format!(
                    "could not resolve identity: {}",
                    e
                )))
            }
        }
    }

    /// Descarta as credenciais locais e dispara o redirecionamento.
    /// Não há chamada ao servidor.
    pub async fn logout(&self) {
        self.client.end_session();
        self.set_state(None).await;
        log_logout();
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<SessionIdentity> {
        self.state.read().await.user.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    /// Guard para telas autenticadas
    pub async fn require_user(&self) -> AppResult<SessionIdentity> {
        self.current_user().await.ok_or(AppError::Unauthenticated)
    }

    /// Guard para operações administrativas (usuários, exclusão de registros)
    pub async fn require_admin(&self) -> AppResult<SessionIdentity> {
        let user = self.require_user().await?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AppError::Forbidden(format!(
                "{} ({}) is not an administrator",
                user.username,
                user.role.as_str()
            )))
        }
    }

    async fn set_state(&self, user: Option<SessionIdentity>) {
        let mut state = self.state.write().await;
        state.user = user;
        state.loading = false;
    }

    fn clear_store(&self) {
        if let Err(e) = self.client.store().clear() {
            log_error(&format!("[Session] Failed to clear credentials: {}", e));
        }
    }
}

/// Erros 4xx do login são credenciais recusadas; o resto segue como erro de API
fn login_error(err: ApiError) -> AppError {
    match err {
        ApiError::Api {
            status, message, ..
        } if (400..500).contains(&status) => AppError::LoginFailed(message),
        other => AppError::Api(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bureau_api::{CountingRedirect, MemoryTokenStore, TokenPair, TokenStore};

    fn manager(pair: Option<TokenPair>) -> (SessionManager, Arc<MemoryTokenStore>) {
        let store = Arc::new(match pair {
            Some(pair) => MemoryTokenStore::with_pair(pair),
            None => MemoryTokenStore::new(),
        });
        // Porta reservada: nenhum teste aqui deveria chegar à rede
        let client = ApiClient::builder("http://127.0.0.1:9/api")
            .token_store(store.clone())
            .login_redirect(Arc::new(CountingRedirect::new()))
            .build()
            .unwrap();
        (SessionManager::new(client), store)
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let (session, _) = manager(None);
        let state = session.state().await;

        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_without_credentials_skips_network() {
        let (session, _) = manager(None);

        assert!(session.bootstrap().await.is_none());
        assert!(!session.is_loading().await);
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_guards_without_user() {
        let (session, _) = manager(None);
        session.bootstrap().await;

        assert!(matches!(
            session.require_user().await,
            Err(AppError::Unauthenticated)
        ));
        assert!(matches!(
            session.require_admin().await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_store_without_network() {
        let (session, store) = manager(Some(TokenPair::new("A1", "R1")));

        session.logout().await;

        assert_eq!(store.load().unwrap(), None);
        assert!(!session.is_authenticated().await);
        assert!(!session.is_loading().await);
    }

    #[test]
    fn test_login_error_mapping() {
        let rejected = login_error(ApiError::Api {
            status: 401,
            message: "Invalid credentials".into(),
            body: String::new(),
        });
        assert!(matches!(rejected, AppError::LoginFailed(ref m) if m == "Invalid credentials"));

        let outage = login_error(ApiError::Api {
            status: 503,
            message: "Service Unavailable".into(),
            body: String::new(),
        });
        assert!(matches!(outage, AppError::Api(_)));
    }
}
