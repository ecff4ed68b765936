//! Feed de detecções (`/detections`)

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::RequestConfig;
use crate::types::{Detection, MessageResponse, NewDetection};

/// Limite padrão da listagem, igual ao do backend
pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct DetectionsApi {
    client: ApiClient,
}

impl DetectionsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /detections?limit=N`, mais recentes primeiro
    pub async fn list(&self, limit: u32) -> Result<Vec<Detection>> {
        let request = RequestConfig::get("/detections").query("limit", limit);
        self.client.execute_json(request).await
    }

    /// `GET /detections/recent` (últimas 10)
    pub async fn recent(&self) -> Result<Vec<Detection>> {
        self.client.get_json("/detections/recent").await
    }

    /// `POST /detections` (multipart)
    pub async fn create(&self, detection: NewDetection) -> Result<Detection> {
        let request = RequestConfig::post("/detections").multipart(detection.into_form());
        self.client.execute_json(request).await
    }

    /// `PATCH /detections/{id}/status?status=..`
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<MessageResponse> {
        let request =
            RequestConfig::patch(format!("/detections/{}/status", id)).query("status", status);
        self.client.execute_json(request).await
    }
}
