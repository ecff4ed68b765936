//! Cliente da API do Bureau of Identification
//!
//! Este crate concentra a comunicação do console com o backend:
//!
//! - [`ApiClient`]: pipeline autenticado (bearer token, refresh automático em
//!   401 com um único replay, encerramento da sessão quando o refresh falha)
//! - [`TokenStore`]: armazenamento local do par access/refresh
//! - [`LoginRedirect`]: efeito disparado quando a sessão é encerrada à força
//! - Gerenciadores tipados por recurso: [`AuthApi`], [`PersonsApi`],
//!   [`DetectionsApi`], [`DashboardApi`]
//!
//! # Exemplo Básico
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bureau_api::{ApiClient, FileTokenStore, PersonsApi};
//!
//! # async fn run() -> bureau_api::Result<()> {
//! let client = ApiClient::builder("http://localhost:8000/api")
//!     .token_store(Arc::new(FileTokenStore::new(".bureau/session.json")))
//!     .build()?;
//!
//! let persons = PersonsApi::new(client).list().await?;
//! println!("{} registros", persons.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod detections;
pub mod error;
pub mod persons;
pub mod redirect;
pub mod request;
pub mod token_store;
pub mod types;

pub use auth::AuthApi;
pub use client::{ApiClient, ApiClientBuilder};
pub use dashboard::DashboardApi;
pub use detections::DetectionsApi;
pub use error::{ApiError, Result};
pub use persons::PersonsApi;
pub use redirect::{CountingRedirect, LogRedirect, LoginRedirect};
pub use request::{FormField, RequestBody, RequestConfig};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    DashboardStats, Detection, LoginRequest, MessageResponse, NewDetection, NewPerson, NewUser,
    Person, Photo, Priority, Role, SessionIdentity, SystemHealth, TokenPair, User,
};
