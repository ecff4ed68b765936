//! Dashboard: métricas, saúde do sistema e detecções recentes

use std::time::Duration;

use bureau_api::{ApiClient, DashboardApi, DashboardStats, Detection, DetectionsApi, SystemHealth};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::utils::logging::*;
use crate::utils::AppResult;

/// Intervalo padrão de atualização do dashboard
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub health: SystemHealth,
    pub recent: Vec<Detection>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Carrega as três fontes em paralelo; qualquer falha derruba o snapshot
    pub async fn load(client: &ApiClient) -> AppResult<Self> {
        let dashboard = DashboardApi::new(client.clone());
        let detections = DetectionsApi::new(client.clone());

        let (stats, health, recent) =
            tokio::try_join!(dashboard.stats(), dashboard.health(), detections.recent())?;

        log_dashboard_refreshed(stats.total_registered, recent.len());

        Ok(Self {
            stats,
            health,
            recent,
            fetched_at: Utc::now(),
        })
    }

    pub fn pending_detections(&self) -> usize {
        self.recent.iter().filter(|d| d.is_pending()).count()
    }
}

/// Publica um snapshot a cada `interval` (o primeiro imediatamente).
///
/// Termina quando o receptor é descartado. Falhas são enviadas como `Err`
/// e o polling continua.
pub async fn poll_dashboard(
    client: ApiClient,
    interval: Duration,
    sender: mpsc::Sender<AppResult<DashboardSnapshot>>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = sender.closed() => break,
        }

        let update = DashboardSnapshot::load(&client).await;
        if let Err(e) = &update {
            log_dashboard_error(&e.to_string());
        }

        if sender.send(update).await.is_err() {
            break;
        }
    }

    log_info("[Dashboard] Polling stopped");
}
