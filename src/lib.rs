// Biblioteca do console do Bureau of Identification
// Expõe módulos para uso em testes e no binário

pub mod auth;
pub mod config;
pub mod services;
pub mod utils;

use std::sync::Arc;

use bureau_api::{ApiClient, FileTokenStore};

use auth::{CliRedirect, SessionManager};
use utils::AppResult;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub client: ApiClient,
    pub session: SessionManager,
    pub redirect: Arc<CliRedirect>,
}

impl AppState {
    /// Monta o cliente com store em arquivo e o redirect do console
    pub fn new(settings: config::Settings) -> AppResult<Self> {
        let redirect = Arc::new(CliRedirect::new(settings.session.login_path.clone()));
        let store = Arc::new(FileTokenStore::new(&settings.session.store_path));

        let client = ApiClient::builder(settings.api.base_url.clone())
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .token_store(store)
            .login_redirect(redirect.clone())
            .build()?;

        Ok(Self {
            session: SessionManager::new(client.clone()),
            settings,
            client,
            redirect,
        })
    }
}
