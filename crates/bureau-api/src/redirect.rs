//! Redirecionamento para o login quando a sessão é encerrada à força

use std::sync::atomic::{AtomicUsize, Ordering};

/// Efeito colateral disparado quando a sessão não pode ser recuperada.
///
/// No navegador isto era a navegação para `/login`; aqui cada consumidor
/// decide o que fazer (encerrar a CLI, avisar o operador, etc).
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

/// Apenas registra o redirecionamento no log
#[derive(Debug, Clone)]
pub struct LogRedirect {
    login_path: String,
}

impl LogRedirect {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

impl Default for LogRedirect {
    fn default() -> Self {
        Self::new("/login")
    }
}

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self) {
        tracing::warn!("[Session] Sessão encerrada, redirecionando para {}", self.login_path);
    }
}

/// Conta quantas vezes o redirecionamento foi disparado
#[derive(Debug, Default)]
pub struct CountingRedirect {
    count: AtomicUsize,
}

impl CountingRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn was_triggered(&self) -> bool {
        self.count() > 0
    }
}

impl LoginRedirect for CountingRedirect {
    fn redirect_to_login(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
