//! Métricas do dashboard (`/dashboard`)

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{DashboardStats, SystemHealth};

#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get_json("/dashboard/stats").await
    }

    pub async fn health(&self) -> Result<SystemHealth> {
        self.client.get_json("/dashboard/health").await
    }
}
