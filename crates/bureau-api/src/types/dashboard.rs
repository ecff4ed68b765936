//! Métricas do dashboard

use serde::{Deserialize, Serialize};

/// `GET /dashboard/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_registered: u64,
    pub active_matches: u64,
    pub alerts_dispatched: u64,
    pub daily_new_records: u64,
}

/// `GET /dashboard/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub db_connected: bool,
    pub storage_connected: bool,
    pub api_latency_ms: f64,
    pub storage_used_pct: u8,
}

impl SystemHealth {
    pub fn is_healthy(&self) -> bool {
        self.db_connected && self.storage_connected
    }
}

/// Resposta genérica `{"message": "..."}` de deleções e atualizações de status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
