//! Eventos de detecção facial vindos das câmeras

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::person::Photo;
use crate::request::FormField;

/// Status inicial de toda detecção criada pelo backend
pub const STATUS_PENDING: &str = "pending";

/// Detecção registrada (`GET /detections`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: Uuid,
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub camera_id: Option<String>,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub snapshot_url: Option<String>,
    /// Distância facial (0 = idêntico); o console exibe `1 - confidence`
    #[serde(default)]
    pub confidence: Option<f64>,
    pub sms_sent: bool,
    pub status: String,
}

impl Detection {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }

    /// Similaridade em porcentagem, como mostrada no dashboard
    pub fn match_percent(&self) -> Option<f64> {
        self.confidence.map(|c| (1.0 - c) * 100.0)
    }
}

/// Detecção enviada manualmente (`POST /detections`, multipart)
#[derive(Debug, Clone, Default)]
pub struct NewDetection {
    pub case_id: Option<String>,
    pub location: Option<String>,
    pub camera_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub snapshot: Option<Photo>,
}

impl NewDetection {
    pub fn into_form(self) -> Vec<FormField> {
        let mut fields = Vec::new();

        if let Some(case_id) = self.case_id {
            fields.push(FormField::text("case_id", case_id));
        }
        if let Some(location) = self.location {
            fields.push(FormField::text("location", location));
        }
        if let Some(camera_id) = self.camera_id {
            fields.push(FormField::text("camera_id", camera_id));
        }
        if let Some(lat) = self.latitude {
            fields.push(FormField::text("latitude", lat.to_string()));
        }
        if let Some(lon) = self.longitude {
            fields.push(FormField::text("longitude", lon.to_string()));
        }
        if let Some(snapshot) = self.snapshot {
            fields.push(FormField::File {
                name: "snapshot".to_string(),
                file_name: snapshot.file_name,
                content_type: snapshot.content_type,
                bytes: snapshot.bytes,
            });
        }

        fields
    }
}
