use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionSettings {
    /// Arquivo JSON com o par access/refresh
    pub store_path: PathBuf,
    /// Destino do redirecionamento quando a sessão é encerrada
    pub login_path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardSettings {
    pub poll_interval_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::from_dir("config", &run_mode)
    }

    /// Carrega `{dir}/default` → `{dir}/{run_mode}` → variáveis `BUREAU_*`
    pub fn from_dir(dir: impl AsRef<Path>, run_mode: &str) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        let mut builder = Config::builder()
            // Valores embutidos, usados quando não há arquivo
            .set_default("api.base_url", "http://localhost:8000/api")?
            .set_default("api.timeout_secs", 30)?
            .set_default("api.connect_timeout_secs", 5)?
            .set_default("session.store_path", ".bureau/session.json")?
            .set_default("session.login_path", "/login")?
            .set_default("dashboard.poll_interval_secs", 15)?
            // Arquivo de configuração base
            .add_source(File::from(dir.join("default")).required(false))
            // Arquivo específico do ambiente
            .add_source(File::from(dir.join(run_mode)).required(false))
            // BUREAU_API__BASE_URL, BUREAU_SESSION__STORE_PATH, ...
            .add_source(
                Environment::with_prefix("BUREAU")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // Atalho usado nos scripts de deploy
        if let Ok(url) = std::env::var("BUREAU_API_URL") {
            builder = builder.set_override("api.base_url", url)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Message("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Message("api.timeout_secs must be positive".into()));
        }
        if self.dashboard.poll_interval_secs == 0 {
            return Err(ConfigError::Message(
                "dashboard.poll_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard.poll_interval_secs)
    }
}
