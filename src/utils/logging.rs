use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Inicializa o subscriber global. `RUST_LOG` tem precedência; sem ele,
/// `info` (ou `debug` com `--verbose`).
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // Em testes o subscriber pode já estar registrado
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn log_config_loaded(env: &str, base_url: &str) {
    info!("Configuration loaded for environment: {} - API: {}", env, base_url);
}

pub fn log_session_restored(username: &str, role: &str) {
    info!("[Session] Session restored: {} ({})", username, role);
}

pub fn log_session_bootstrap_failed(error: &str) {
    warn!("[Session] Stored credentials rejected, clearing: {}", error);
}

pub fn log_login_success(username: &str) {
    info!("[Session] Login successful: {}", username);
}

pub fn log_login_failed(username: &str, error: &str) {
    warn!("[Session] Login failed for {}: {}", username, error);
}

pub fn log_logout() {
    info!("[Session] Logged out, credentials cleared");
}

pub fn log_dashboard_refreshed(total_registered: u64, recent: usize) {
    debug!(
        "[Dashboard] Snapshot refreshed - Registered: {} - Recent detections: {}",
        total_registered, recent
    );
}

pub fn log_dashboard_error(error: &str) {
    error!("[Dashboard] Failed to refresh snapshot: {}", error);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
