// ============================================================================
// Registro de pessoas desaparecidas (`/persons`)
// ============================================================================
//
// - Listagem (opcionalmente ordenada por distância de um ponto)
// - Cadastro via multipart, com foto opcional
// - Remoção (admin) e troca de prioridade

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::{FormField, RequestConfig};
use crate::types::{MessageResponse, NewPerson, Person, Priority};

#[derive(Debug, Clone)]
pub struct PersonsApi {
    client: ApiClient,
}

impl PersonsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /persons`, mais recentes primeiro
    pub async fn list(&self) -> Result<Vec<Person>> {
        self.client.get_json("/persons").await
    }

    /// `GET /persons?lat=..&lon=..`, ordenado pela distância ao ponto
    pub async fn list_near(&self, lat: f64, lon: f64) -> Result<Vec<Person>> {
        let request = RequestConfig::get("/persons").query("lat", lat).query("lon", lon);
        self.client.execute_json(request).await
    }

    /// `POST /persons` (multipart). O backend gera o `case_id`.
    pub async fn register(&self, person: NewPerson) -> Result<Person> {
        tracing::info!("[PersonsApi] Registrando {}", person.name);

        let request = RequestConfig::post("/persons").multipart(person.into_form());
        self.client.execute_json(request).await
    }

    /// `DELETE /persons/{id}` (admin)
    pub async fn delete(&self, id: Uuid) -> Result<MessageResponse> {
        self.client.delete_json(&format!("/persons/{}", id)).await
    }

    /// `PATCH /persons/{id}/priority` com o campo de formulário `priority`
    pub async fn update_priority(&self, id: Uuid, priority: Priority) -> Result<Person> {
        let request = RequestConfig::patch(format!("/persons/{}/priority", id))
            .multipart(vec![FormField::text("priority", priority.as_str())]);
        self.client.execute_json(request).await
    }
}
