//! Cliente HTTP autenticado para a API do Bureau
//!
//! Toda requisição passa pelo mesmo pipeline:
//!
//! 1. O access token atual é lido do [`TokenStore`] imediatamente antes do
//!    envio e anexado como `Authorization: Bearer <token>` (sem token, sem header).
//! 2. Se a resposta for 401 e a requisição ainda não tiver sido repetida, ela
//!    é marcada como repetida e o refresh token é trocado em `/auth/refresh`.
//! 3. Com o novo par gravado, a requisição original é reenviada uma única vez;
//!    o resultado desse replay é o que o chamador recebe.
//! 4. Sem refresh token, ou se a troca falhar, a sessão é encerrada (store
//!    limpo + [`LoginRedirect`]) e o chamador recebe o 401 original.
//!
//! Renovações concorrentes passam por um único portão: quem chega depois que
//! outra requisição já renovou o par reaproveita o token novo em vez de fazer
//! uma segunda troca.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{ApiError, Result};
use crate::redirect::{LogRedirect, LoginRedirect};
use crate::request::{RequestBody, RequestConfig};
use crate::token_store::{MemoryTokenStore, TokenStore};
use crate::types::token::{bearer, preview};
use crate::types::TokenPair;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const REFRESH_PATH: &str = "/auth/refresh";

/// Cliente autenticado da API do Bureau.
///
/// `Clone` é barato: clones compartilham o pool HTTP, o store de credenciais
/// e o portão de refresh.
#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    store: Arc<dyn TokenStore>,
    redirect: Arc<dyn LoginRedirect>,
    refresh_gate: Arc<Mutex<()>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder do [`ApiClient`]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    store: Option<Arc<dyn TokenStore>>,
    redirect: Option<Arc<dyn LoginRedirect>>,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn login_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
        self.redirect = Some(redirect);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        let http_client = HttpClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| ApiError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ApiClient {
            http_client,
            base_url,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
            redirect: self
                .redirect
                .unwrap_or_else(|| Arc::new(LogRedirect::default())),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }
}

impl ApiClient {
    /// Inicia a construção de um cliente para a base informada (ex: `https://host/api`)
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: concat!("bureau-api/", env!("CARGO_PKG_VERSION")).to_string(),
            store: None,
            redirect: None,
        }
    }

    /// Cliente com store em memória e timeouts padrão (30s / 5s)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Há um access token guardado localmente?
    pub fn has_credentials(&self) -> Result<bool> {
        Ok(self.store.access_token()?.is_some())
    }

    pub(crate) fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Envia a requisição pelo pipeline autenticado.
    ///
    /// Retorna a resposta 2xx; qualquer outro status vira [`ApiError::Api`].
    /// Um 401 recuperado via refresh é invisível para o chamador.
    pub async fn send(&self, mut request: RequestConfig) -> Result<Response> {
        let sent_with = self.store.access_token()?;
        let response = self.dispatch(&request, sent_with.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || request.retried {
            return Self::check_status(response).await;
        }

        request.retried = true;
        let original = Self::error_from(response).await;

        tracing::info!(
            "[ApiClient] 401 em {} {}, tentando renovar a sessão",
            request.method,
            request.path
        );

        match self.recover_session(sent_with.as_deref()).await {
            Some(access_token) => {
                let response = self.dispatch(&request, Some(&access_token)).await?;
                Self::check_status(response).await
            }
            None => Err(original),
        }
    }

    /// Envia e decodifica o corpo JSON da resposta
    pub async fn execute_json<T: DeserializeOwned>(&self, request: RequestConfig) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute_json(RequestConfig::get(path)).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_json(RequestConfig::post(path).json(body)?).await
    }

    pub async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_json(RequestConfig::patch(path).json(body)?).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute_json(RequestConfig::delete(path)).await
    }

    /// Encerra a sessão local: limpa todas as credenciais e dispara o redirect.
    ///
    /// Não há chamada ao servidor; o refresh token não é invalidado remotamente.
    pub fn end_session(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("[ApiClient] Falha ao limpar credenciais: {}", e);
        }
        self.redirect.redirect_to_login();
    }

    /// Troca o refresh token por um novo par, fora do pipeline autenticado
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenPair> {
        let url = self.build_url(REFRESH_PATH);

        tracing::debug!("[ApiClient] POST {} (refresh {})", url, preview(refresh_token));

        let response = self
            .http_client
            .post(&url)
            .query(&[("refresh_token", refresh_token)])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Obtém um access token válido depois de um 401.
    ///
    /// `sent_with` é o token com que a requisição falhou. Retorna `None` quando
    /// a sessão foi encerrada.
    async fn recover_session(&self, sent_with: Option<&str>) -> Option<String> {
        let _gate = self.refresh_gate.lock().await;

        let current = match self.store.load() {
            Ok(current) => current,
            Err(e) => {
                tracing::error!("[ApiClient] Falha ao ler credenciais: {}", e);
                None
            }
        };

        let Some(pair) = current else {
            tracing::warn!("[ApiClient] Sem refresh token, encerrando sessão");
            self.end_session();
            return None;
        };

        // Outra requisição já renovou o par enquanto esta aguardava
        if sent_with != Some(pair.access_token.as_str()) {
            tracing::debug!(
                "[ApiClient] Par já renovado ({}), reaproveitando",
                preview(&pair.access_token)
            );
            return Some(pair.access_token);
        }

        match self.exchange_refresh_token(&pair.refresh_token).await {
            Ok(new_pair) => {
                let access_token = new_pair.access_token.clone();
                if let Err(e) = self.store.replace(new_pair) {
                    tracing::error!("[ApiClient] Falha ao gravar novo par: {}", e);
                    self.end_session();
                    return None;
                }
                tracing::info!("[ApiClient] Sessão renovada ({})", preview(&access_token));
                Some(access_token)
            }
            Err(e) => {
                tracing::warn!("[ApiClient] Refresh falhou: {}", e);
                self.end_session();
                None
            }
        }
    }

    async fn dispatch(&self, request: &RequestConfig, access_token: Option<&str>) -> Result<Response> {
        let url = self.build_url(&request.path);

        tracing::debug!(
            "[ApiClient] {} {}{}",
            request.method,
            url,
            if request.retried { " (replay)" } else { "" }
        );

        let mut builder = self.http_client.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = access_token {
            builder = builder.header(AUTHORIZATION, bearer(token));
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => builder.multipart(RequestBody::to_form(fields)?),
        };

        Ok(builder.send().await?)
    }

    /// Processa a resposta HTTP e trata erros
    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        tracing::debug!("[ApiClient] Bureau API error ({}): {}", status, body);

        ApiError::from_response(status, body)
    }
}
