//! Sessão do operador
//!
//! - `session`: bootstrap, login, logout e guards de acesso
//! - `redirect`: reação do console ao encerramento forçado da sessão

pub mod redirect;
pub mod session;

pub use redirect::CliRedirect;
pub use session::{SessionManager, SessionState};
