//! Tipos de erro para o crate bureau-api

use serde_json::Value;
use thiserror::Error;

/// Erros do cliente da API do Bureau
#[derive(Debug, Error)]
pub enum ApiError {
    /// Erro de transporte HTTP (conexão, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Resposta com status diferente de 2xx
    #[error("Bureau API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    /// Corpo JSON malformado ou incompatível com o tipo esperado
    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Falha ao ler ou gravar as credenciais locais
    #[error("Token store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Erro de configuração do cliente
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Monta um erro de API a partir do status e do corpo bruto da resposta.
    ///
    /// O FastAPI responde erros como `{"detail": "..."}`; outros formatos
    /// comuns (`error`, `message`) também são aceitos. Sem JSON, usa o corpo.
    pub fn from_response(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| {
                json.get("detail")
                    .or_else(|| json.get("error"))
                    .or_else(|| json.get("message"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.clone()
                }
            });

        Self::Api {
            status,
            message,
            body,
        }
    }

    /// Status HTTP associado ao erro, quando houver
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, ApiError>;
