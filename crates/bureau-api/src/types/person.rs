//! Registro de pessoas desaparecidas

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::request::FormField;

/// Prioridade de um caso no registro.
///
/// O backend guarda a prioridade como texto livre; valores fora dos três
/// conhecidos viram `Unknown` em vez de invalidar a listagem inteira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Exibido no console como "PENDING REVIEW"
    #[default]
    Normal,
    High,
    Monitored,
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Monitored => "monitored",
            Priority::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Normal => "PENDING REVIEW",
            Priority::High => "HIGH PRIORITY",
            Priority::Monitored => "MONITORED",
            Priority::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "monitored" => Ok(Priority::Monitored),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Pessoa registrada (`GET /persons`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub case_id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub registered_at: NaiveDateTime,
}

/// Foto anexada ao registro
#[derive(Clone)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Dados de um novo registro, enviados como multipart (`POST /persons`)
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
    pub name: String,
    pub age: Option<String>,
    pub contact: Option<String>,
    pub priority: Priority,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo: Option<Photo>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Campos do formulário na ordem em que o backend os declara
    pub fn into_form(self) -> Vec<FormField> {
        let mut fields = vec![FormField::text("name", self.name)];

        if let Some(age) = self.age {
            fields.push(FormField::text("age", age));
        }
        if let Some(contact) = self.contact {
            fields.push(FormField::text("contact", contact));
        }
        fields.push(FormField::text("priority", self.priority.as_str()));
        if let Some(lat) = self.latitude {
            fields.push(FormField::text("latitude", lat.to_string()));
        }
        if let Some(lon) = self.longitude {
            fields.push(FormField::text("longitude", lon.to_string()));
        }
        if let Some(photo) = self.photo {
            fields.push(FormField::File {
                name: "photo".to_string(),
                file_name: photo.file_name,
                content_type: photo.content_type,
                bytes: photo.bytes,
            });
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_optional_fields() {
        let json = r#"{
            "id": "0b6f7c1a-2d3e-4f50-8a9b-0c1d2e3f4a5b",
            "case_id": "ID-4821",
            "name": "Jane Roe",
            "priority": "high",
            "registered_at": "2024-05-02T08:00:00"
        }"#;

        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.case_id, "ID-4821");
        assert_eq!(person.priority, Priority::High);
        assert!(person.photo_url.is_none());
    }

    #[test]
    fn test_unrecognized_priority_decodes_as_unknown() {
        let json = r#"{
            "id": "0b6f7c1a-2d3e-4f50-8a9b-0c1d2e3f4a5b",
            "case_id": "ID-4822",
            "name": "John Doe",
            "priority": "critical",
            "registered_at": "2024-05-02T08:00:00"
        }"#;

        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.priority, Priority::Unknown);
        assert_eq!(person.priority.label(), "UNKNOWN");
        // Só os valores conhecidos são aceitos na entrada do operador
        assert!("critical".parse::<Priority>().is_err());
        assert!("unknown".parse::<Priority>().is_err());
    }

    #[test]
    fn test_new_person_form_skips_missing_fields() {
        let form = NewPerson::new("John Doe").priority(Priority::Monitored).into_form();
        let names: Vec<&str> = form.iter().map(FormField::name).collect();
        assert_eq!(names, vec!["name", "priority"]);
    }

    #[test]
    fn test_new_person_form_with_photo_and_location() {
        let photo = Photo {
            file_name: "face.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50],
        };
        let form = NewPerson::new("John Doe")
            .age("34")
            .contact("+1 555 0100")
            .location(40.7, -74.0)
            .photo(photo)
            .into_form();

        let names: Vec<&str> = form.iter().map(FormField::name).collect();
        assert_eq!(
            names,
            vec!["name", "age", "contact", "priority", "latitude", "longitude", "photo"]
        );
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(Priority::default().label(), "PENDING REVIEW");
        assert_eq!("Monitored".parse::<Priority>().unwrap(), Priority::Monitored);
    }
}
