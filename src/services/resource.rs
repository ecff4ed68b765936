//! Recurso carregado via GET, com estado de carregamento e erro

use bureau_api::ApiClient;
use serde::de::DeserializeOwned;

use crate::utils::logging::log_warning;

/// Mensagem exibida quando o carregamento falha
pub const LOAD_ERROR: &str = "Failed to load";

/// Resultado de um `GET` mantido entre recargas.
///
/// Começa com `loading = true` e o valor inicial. Uma falha registra
/// [`LOAD_ERROR`] e preserva os dados anteriores.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    client: ApiClient,
    path: String,
    data: T,
    loading: bool,
    error: Option<String>,
}

impl<T: DeserializeOwned> Resource<T> {
    pub fn new(client: ApiClient, path: impl Into<String>, initial: T) -> Self {
        Self {
            client,
            path: path.into(),
            data: initial,
            loading: true,
            error: None,
        }
    }

    /// Busca o recurso novamente pelo pipeline autenticado
    pub async fn refresh(&mut self) -> &T {
        self.loading = true;

        match self.client.get_json::<T>(&self.path).await {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(e) => {
                log_warning(&format!("[Resource] GET {} failed: {}", self.path, e));
                self.error = Some(LOAD_ERROR.to_string());
            }
        }

        self.loading = false;
        &self.data
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
