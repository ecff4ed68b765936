//! Configuração tipada de uma requisição lógica
//!
//! Uma `RequestConfig` descreve tudo o que é preciso para (re)enviar a mesma
//! requisição: método, caminho relativo à base da API, query, corpo e o
//! marcador de retry. O corpo é reconstruível, então o replay depois de um
//! refresh envia exatamente o mesmo conteúdo.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Campo de um formulário multipart
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Corpo da requisição
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

impl RequestBody {
    /// Monta um `multipart::Form` novo a cada envio (o `Form` do reqwest não é `Clone`)
    pub(crate) fn to_form(fields: &[FormField]) -> Result<Form> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name.clone(), value.clone()),
                FormField::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let part = Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(content_type)?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Requisição lógica enviada pelo [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: Method,
    /// Caminho relativo à base da API, ex: `/persons`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Marcado quando a requisição já passou por um ciclo de refresh + replay
    pub retried: bool,
}

impl RequestConfig {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Um 401 nesta requisição é definitivo: não há refresh nem replay.
    ///
    /// Usado no login, onde 401 significa credenciais inválidas.
    pub fn without_refresh(mut self) -> Self {
        self.retried = true;
        self
    }
}
