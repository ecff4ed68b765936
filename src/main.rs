//! Bureau Console: interface de linha de comando para o operador
//!
//! Todo comando (exceto `login`) restaura a sessão a partir das credenciais
//! guardadas antes de chamar a API. Um access token expirado é renovado de
//! forma transparente pelo cliente; se a renovação falhar, a sessão é
//! encerrada e o operador precisa fazer login novamente.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

use bureau_api::{
    AuthApi, DetectionsApi, NewPerson, NewUser, PersonsApi, Photo, Priority, Role,
};
use bureau_console::config::Settings;
use bureau_console::services::{poll_dashboard, DashboardSnapshot};
use bureau_console::utils::logging::*;
use bureau_console::utils::{AppError, AppResult};
use bureau_console::AppState;

#[derive(Parser)]
#[command(name = "bureau-console")]
#[command(version)]
#[command(about = "Console de operação do Bureau of Identification", long_about = None)]
struct Cli {
    /// URL base da API (sobrescreve api.base_url)
    #[arg(long, env = "BUREAU_API_URL", global = true)]
    api_url: Option<String>,

    /// Formato de saída (json, pretty)
    #[arg(short = 'o', long, default_value = "pretty", global = true)]
    output: OutputFormat,

    /// Modo verbose para debug
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, PartialEq)]
enum OutputFormat {
    Json,
    Pretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(format!("Formato desconhecido: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Autentica e guarda o par de tokens localmente
    Login {
        #[arg(short = 'u', long, env = "BUREAU_USERNAME")]
        username: String,

        #[arg(short = 'p', long, env = "BUREAU_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Descarta as credenciais locais
    Logout,

    /// Mostra o operador autenticado
    Whoami,

    /// Registro de pessoas
    Persons {
        #[command(subcommand)]
        command: PersonsCommand,
    },

    /// Feed de detecções
    Detections {
        #[command(subcommand)]
        command: DetectionsCommand,
    },

    /// Métricas e saúde do sistema
    Dashboard {
        /// Atualiza periodicamente até Ctrl+C
        #[arg(short = 'w', long)]
        watch: bool,
    },

    /// Administração de usuários (admin)
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
}

#[derive(Subcommand)]
enum PersonsCommand {
    /// Lista os registros (ordenados por distância se lat/lon forem informados)
    List {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Registra uma pessoa desaparecida
    Register {
        #[arg(short = 'n', long)]
        name: String,

        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        /// normal, high ou monitored
        #[arg(long, default_value = "normal")]
        priority: Priority,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Foto de referência (jpg/png)
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Remove um registro (admin)
    Delete { id: Uuid },

    /// Altera a prioridade de um registro
    Priority { id: Uuid, priority: Priority },
}

#[derive(Subcommand)]
enum DetectionsCommand {
    /// Lista as detecções mais recentes primeiro
    List {
        #[arg(short = 'l', long, default_value_t = bureau_api::detections::DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Últimas 10 detecções
    Recent,

    /// Atualiza o status de uma detecção (ex: confirmed, dismissed)
    Status { id: Uuid, status: String },
}

#[derive(Subcommand)]
enum UsersCommand {
    List,

    Create {
        #[arg(short = 'u', long)]
        username: String,

        #[arg(short = 'p', long, env = "BUREAU_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, default_value = "operator")]
        role: Role,

        #[arg(long, default_value_t = 1)]
        clearance_level: i32,
    },

    Delete { id: Uuid },
}

/// Estrutura para resposta padronizada
#[derive(serde::Serialize)]
struct CliResponse {
    success: bool,
    data: Option<serde_json::Value>,
    error: Option<String>,
}

impl CliResponse {
    fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let mut settings = Settings::new().context("failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        settings.api.base_url = url.clone();
    }
    log_config_loaded(&run_mode, &settings.api.base_url);

    let state = AppState::new(settings).context("failed to build API client")?;

    let result = execute_command(&cli, &state).await;

    // logout também dispara o redirect; ali ele é esperado
    if state.redirect.was_triggered() && !matches!(cli.command, Commands::Logout) {
        eprintln!("⚠️  Sessão expirada. Execute `bureau-console login` novamente.");
    }

    match result {
        Ok(response) => {
            output_response(response, &cli.output)?;
            Ok(())
        }
        Err(e) => {
            if e.requires_login() {
                log_warning(&format!("[Session] {}", e));
            }
            output_response(CliResponse::error(e.to_string()), &cli.output)?;
            std::process::exit(1);
        }
    }
}

async fn execute_command(cli: &Cli, state: &AppState) -> AppResult<CliResponse> {
    let session = &state.session;

    match &cli.command {
        Commands::Login { username, password } => {
            let user = session.login(username, password).await?;
            Ok(CliResponse::success(json!({
                "message": format!("Logged in as {}", user.username),
                "user": user,
            })))
        }

        Commands::Logout => {
            session.logout().await;
            Ok(CliResponse::success(json!({ "message": "Logged out" })))
        }

        Commands::Whoami => {
            session.bootstrap().await;
            let user = session.require_user().await?;
            Ok(CliResponse::success(json!(user)))
        }

        Commands::Persons { command } => {
            session.bootstrap().await;
            let api = PersonsApi::new(state.client.clone());

            match command {
                PersonsCommand::List { lat, lon } => {
                    session.require_user().await?;
                    let persons = match (lat, lon) {
                        (Some(lat), Some(lon)) => api.list_near(*lat, *lon).await?,
                        _ => api.list().await?,
                    };
                    Ok(CliResponse::success(json!({
                        "count": persons.len(),
                        "persons": persons,
                    })))
                }
                PersonsCommand::Register {
                    name,
                    age,
                    contact,
                    priority,
                    lat,
                    lon,
                    photo,
                } => {
                    session.require_user().await?;
                    if name.trim().is_empty() {
                        return Err(AppError::Validation("name must not be empty".into()));
                    }

                    let mut person = NewPerson::new(name.clone()).priority(*priority);
                    if let Some(age) = age {
                        person = person.age(age.clone());
                    }
                    if let Some(contact) = contact {
                        person = person.contact(contact.clone());
                    }
                    if let (Some(lat), Some(lon)) = (lat, lon) {
                        person = person.location(*lat, *lon);
                    }
                    if let Some(path) = photo {
                        person = person.photo(load_photo(path).await?);
                    }

                    let created = api.register(person).await?;
                    Ok(CliResponse::success(json!({
                        "message": format!("Registered {}", created.case_id),
                        "person": created,
                    })))
                }
                PersonsCommand::Delete { id } => {
                    session.require_admin().await?;
                    let resp = api.delete(*id).await?;
                    Ok(CliResponse::success(json!(resp)))
                }
                PersonsCommand::Priority { id, priority } => {
                    session.require_user().await?;
                    let person = api.update_priority(*id, *priority).await?;
                    Ok(CliResponse::success(json!({
                        "case_id": person.case_id,
                        "priority": person.priority.label(),
                    })))
                }
            }
        }

        Commands::Detections { command } => {
            session.bootstrap().await;
            session.require_user().await?;
            let api = DetectionsApi::new(state.client.clone());

            match command {
                DetectionsCommand::List { limit } => {
                    let detections = api.list(*limit).await?;
                    Ok(CliResponse::success(json!({
                        "count": detections.len(),
                        "detections": detections,
                    })))
                }
                DetectionsCommand::Recent => {
                    let detections = api.recent().await?;
                    Ok(CliResponse::success(json!(detections)))
                }
                DetectionsCommand::Status { id, status } => {
                    let resp = api.update_status(*id, status).await?;
                    Ok(CliResponse::success(json!(resp)))
                }
            }
        }

        Commands::Dashboard { watch } => {
            session.bootstrap().await;
            session.require_user().await?;

            if *watch {
                watch_dashboard(state, &cli.output).await?;
                Ok(CliResponse::success(json!({ "message": "Dashboard watch stopped" })))
            } else {
                let snapshot = DashboardSnapshot::load(&state.client).await?;
                Ok(CliResponse::success(json!(snapshot)))
            }
        }

        Commands::Users { command } => {
            session.bootstrap().await;
            session.require_admin().await?;
            let api = AuthApi::new(state.client.clone());

            match command {
                UsersCommand::List => {
                    let users = api.list_users().await?;
                    Ok(CliResponse::success(json!(users)))
                }
                UsersCommand::Create {
                    username,
                    password,
                    role,
                    clearance_level,
                } => {
                    let new_user = NewUser::new(username.clone(), password.clone())
                        .role(*role)
                        .clearance_level(*clearance_level);
                    let user = api.create_user(&new_user).await?;
                    Ok(CliResponse::success(json!(user)))
                }
                UsersCommand::Delete { id } => {
                    let resp = api.delete_user(*id).await?;
                    Ok(CliResponse::success(json!(resp)))
                }
            }
        }
    }
}

/// Imprime um snapshot a cada intervalo até Ctrl+C ou a sessão cair
async fn watch_dashboard(state: &AppState, format: &OutputFormat) -> AppResult<()> {
    let (tx, mut rx) = mpsc::channel(1);
    let poller = tokio::spawn(poll_dashboard(
        state.client.clone(),
        state.settings.poll_interval(),
        tx,
    ));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = rx.recv() => match update {
                Some(Ok(snapshot)) => print_snapshot(&snapshot, format),
                Some(Err(e)) => {
                    eprintln!("❌ Erro: {}", e);
                    if state.redirect.was_triggered() {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    drop(rx);
    let _ = poller.await;
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, format: &OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => log_error(&format!("[Dashboard] Failed to serialize snapshot: {}", e)),
        },
        OutputFormat::Pretty => {
            let stats = &snapshot.stats;
            let health = &snapshot.health;
            println!(
                "[{}] registered={} matches={} alerts={} new_today={} | db={} storage={} latency={:.1}ms used={}% | pending={}",
                snapshot.fetched_at.format("%H:%M:%S"),
                stats.total_registered,
                stats.active_matches,
                stats.alerts_dispatched,
                stats.daily_new_records,
                if health.db_connected { "up" } else { "down" },
                if health.storage_connected { "up" } else { "down" },
                health.api_latency_ms,
                health.storage_used_pct,
                snapshot.pending_detections(),
            );
        }
    }
}

async fn load_photo(path: &Path) -> AppResult<Photo> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());

    let content_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => {
            return Err(AppError::Validation(format!(
                "unsupported photo format: {}",
                path.display()
            )))
        }
    };

    Ok(Photo {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}

fn output_response(response: CliResponse, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&response)?);
        }
        OutputFormat::Pretty => {
            if response.success {
                if let Some(data) = response.data {
                    println!("✅ Sucesso!");
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
            } else if let Some(error) = response.error {
                eprintln!("❌ Erro: {}", error);
            }
        }
    }
    Ok(())
}
