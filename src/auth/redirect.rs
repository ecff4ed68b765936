use std::sync::atomic::{AtomicBool, Ordering};

use bureau_api::LoginRedirect;

use crate::utils::logging::log_warning;

/// Redirecionamento do console: não há navegação, então o evento é
/// registrado e a CLI avisa o operador ao final do comando.
#[derive(Debug)]
pub struct CliRedirect {
    login_path: String,
    triggered: AtomicBool,
}

impl CliRedirect {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            triggered: AtomicBool::new(false),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn was_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

impl LoginRedirect for CliRedirect {
    fn redirect_to_login(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        log_warning(&format!(
            "[Session] Session ended, login required ({})",
            self.login_path
        ));
    }
}
