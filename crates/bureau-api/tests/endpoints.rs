//! Formato das requisições de cada gerenciador de recurso

mod common;

use bureau_api::{
    AuthApi, DashboardApi, DetectionsApi, NewUser, PersonsApi, Priority, Role, TokenPair,
};
use common::{detection_json, person_json, token_json, user_json, Harness, NoAuthorization};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const PERSON_ID: &str = "0b6f7c1a-2d3e-4f50-8a9b-0c1d2e3f4a5b";

#[tokio::test]
async fn test_login_posts_credentials_without_bearer() {
    let h = Harness::new(None).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(NoAuthorization)
        .and(body_partial_json(json!({"username": "admin", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("A1", "R1")))
        .expect(1)
        .mount(&h.server)
        .await;

    let pair = AuthApi::new(h.client.clone())
        .login("admin", "hunter2")
        .await
        .unwrap();

    assert_eq!(pair, TokenPair::new("A1", "R1"));
    // login só troca credenciais; gravar o par fica com a sessão
    assert_eq!(h.stored(), None);
}

#[tokio::test]
async fn test_login_with_bad_credentials_never_refreshes() {
    let h = Harness::logged_in("OLD", "STALE").await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("A2", "R2")))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = AuthApi::new(h.client.clone())
        .login("admin", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Bureau API error (status 401): Invalid credentials");
    assert_eq!(h.redirect.count(), 0);
    assert_eq!(h.stored(), Some(TokenPair::new("OLD", "STALE")));
}

#[tokio::test]
async fn test_me_decodes_identity() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("admin", "admin")))
        .mount(&h.server)
        .await;

    let me = AuthApi::new(h.client.clone()).me().await.unwrap();

    assert_eq!(me.username, "admin");
    assert_eq!(me.role, Role::Admin);
    assert!(me.is_admin());
    assert_eq!(me.clearance_level, 2);
}

#[tokio::test]
async fn test_create_user_sends_json_body() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/api/auth/users"))
        .and(body_partial_json(json!({
            "username": "op1",
            "password": "s3cret",
            "role": "operator",
            "clearance_level": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("op1", "operator")))
        .expect(1)
        .mount(&h.server)
        .await;

    let user = AuthApi::new(h.client.clone())
        .create_user(&NewUser::new("op1", "s3cret").clearance_level(3))
        .await
        .unwrap();

    assert_eq!(user.role, Role::Operator);
}

#[tokio::test]
async fn test_list_and_delete_users() {
    let h = Harness::logged_in("A1", "R1").await;
    let id: Uuid = "6f1c2b1e-8a34-4d7e-9a61-1d2f3e4a5b6c".parse().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json("admin", "admin"),
            user_json("op1", "operator")
        ])))
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/auth/users/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "User deleted"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let api = AuthApi::new(h.client.clone());
    let users = api.list_users().await.unwrap();
    assert_eq!(users.len(), 2);

    let resp = api.delete_user(id).await.unwrap();
    assert_eq!(resp.message, "User deleted");
}

#[tokio::test]
async fn test_list_near_sends_coordinates() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/persons"))
        .and(query_param("lat", "-23.5"))
        .and(query_param("lon", "46.25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([person_json("Jane Roe")])))
        .expect(1)
        .mount(&h.server)
        .await;

    let persons = PersonsApi::new(h.client.clone())
        .list_near(-23.5, 46.25)
        .await
        .unwrap();

    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].priority, Priority::Normal);
}

#[tokio::test]
async fn test_list_tolerates_unrecognized_priority() {
    let h = Harness::logged_in("A1", "R1").await;

    let mut odd = person_json("John Doe");
    odd["id"] = json!("1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f");
    odd["case_id"] = json!("ID-4822");
    odd["priority"] = json!("critical");

    Mock::given(method("GET"))
        .and(path("/api/persons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([person_json("Jane Roe"), odd])))
        .expect(1)
        .mount(&h.server)
        .await;

    let persons = PersonsApi::new(h.client.clone()).list().await.unwrap();

    assert_eq!(persons.len(), 2);
    assert_eq!(persons[0].priority, Priority::Normal);
    assert_eq!(persons[1].name, "John Doe");
    assert_eq!(persons[1].priority, Priority::Unknown);
}

#[tokio::test]
async fn test_update_priority_sends_form_field() {
    let h = Harness::logged_in("A1", "R1").await;

    let mut updated = person_json("Jane Roe");
    updated["priority"] = json!("high");

    Mock::given(method("PATCH"))
        .and(path(format!("/api/persons/{}/priority", PERSON_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&h.server)
        .await;

    let person = PersonsApi::new(h.client.clone())
        .update_priority(PERSON_ID.parse().unwrap(), Priority::High)
        .await
        .unwrap();
    assert_eq!(person.priority, Priority::High);

    let requests = h.server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"priority\""));
    assert!(body.contains("high"));
}

#[tokio::test]
async fn test_detections_list_passes_limit() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/detections"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            detection_json("pending"),
            detection_json("confirmed")
        ])))
        .expect(1)
        .mount(&h.server)
        .await;

    let detections = DetectionsApi::new(h.client.clone())
        .list(bureau_api::detections::DEFAULT_LIMIT)
        .await
        .unwrap();

    assert_eq!(detections.len(), 2);
    assert!(detections[0].is_pending());
    assert!(!detections[1].is_pending());
    let pct = detections[0].match_percent().unwrap();
    assert!((pct - 80.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_update_status_uses_query_param() {
    let h = Harness::logged_in("A1", "R1").await;
    let id: Uuid = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d".parse().unwrap();

    Mock::given(method("PATCH"))
        .and(path(format!("/api/detections/{}/status", id)))
        .and(query_param("status", "confirmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Status updated"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let resp = DetectionsApi::new(h.client.clone())
        .update_status(id, "confirmed")
        .await
        .unwrap();
    assert_eq!(resp.message, "Status updated");
}

#[tokio::test]
async fn test_dashboard_stats_and_health() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_registered": 128,
            "active_matches": 3,
            "alerts_dispatched": 7,
            "daily_new_records": 12
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "db_connected": true,
            "storage_connected": true,
            "api_latency_ms": 12.4,
            "storage_used_pct": 61
        })))
        .mount(&h.server)
        .await;

    let api = DashboardApi::new(h.client.clone());
    let stats = api.stats().await.unwrap();
    let health = api.health().await.unwrap();

    assert_eq!(stats.total_registered, 128);
    assert_eq!(stats.daily_new_records, 12);
    assert!(health.is_healthy());
    assert_eq!(health.storage_used_pct, 61);
}
