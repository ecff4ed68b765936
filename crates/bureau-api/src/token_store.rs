//! Armazenamento local das credenciais
//!
//! Equivalente ao armazenamento chave/valor do navegador: guarda um único par
//! `access_token` / `refresh_token`, substituído sempre por inteiro e apagado
//! por completo no logout ou quando o refresh falha.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::{ApiError, Result};
use crate::types::TokenPair;

/// Armazenamento do par de credenciais da sessão.
///
/// Implementações precisam garantir que `replace` troca os dois tokens de uma
/// vez: um leitor nunca observa o access token novo com o refresh antigo.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<TokenPair>>;

    fn replace(&self, pair: TokenPair) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn access_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|pair| pair.access_token))
    }

    fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|pair| pair.refresh_token))
    }
}

/// Store em memória, útil para testes e sessões efêmeras
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    pair: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            pair: RwLock::new(Some(pair)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<TokenPair>> {
        let guard = self
            .pair
            .read()
            .map_err(|_| ApiError::store("memory store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn replace(&self, pair: TokenPair) -> Result<()> {
        let mut guard = self
            .pair
            .write()
            .map_err(|_| ApiError::store("memory store lock poisoned"))?;
        *guard = Some(pair);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .pair
            .write()
            .map_err(|_| ApiError::store("memory store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Store persistido em um arquivo JSON (`{"access_token": .., "refresh_token": ..}`).
///
/// A escrita vai para um arquivo temporário e depois é renomeada, então o
/// arquivo final sempre contém um par completo.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<TokenPair>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            ApiError::store(format!(
                "corrupted session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn replace(&self, pair: TokenPair) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ApiError::store("file store lock poisoned"))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, serde_json::to_vec_pretty(&pair)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)?;
        tracing::debug!("[TokenStore] Credenciais gravadas em {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ApiError::store("file store lock poisoned"))?;

        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("[TokenStore] Credenciais removidas de {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
