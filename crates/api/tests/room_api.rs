//! HTTP-level integration tests for the `/rooms` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! over an in-memory store, without a TCP listener or database.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete, get, memory_store, patch_json, post_empty, post_json,
    put_json,
};
use roomdesk_db::{MemoryRoomStore, RoomStore};
use serde_json::{json, Value};

fn sala_a() -> Value {
    json!({
        "nome": "Sala A",
        "numero": "101",
        "espaco": 10,
        "sede": "Campus Central",
        "recursos": ["WiFi", "TV"]
    })
}

async fn create_room(store: &Arc<dyn RoomStore>, body: Value) -> Value {
    let response = post_json(build_test_app(store.clone()), "/rooms", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["room"].clone()
}

fn ids(json: &Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|room| room["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_room_lifecycle_scenario() {
    let store = memory_store();

    // Create.
    let response = post_json(build_test_app(store.clone()), "/rooms", sala_a()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Sala criada com sucesso!");
    assert_eq!(json["room"]["disponibilidade"], "livre");
    assert_eq!(json["room"]["recursos"], json!(["WiFi", "TV"]));
    let id = json["room"]["id"].as_i64().unwrap();

    // Duplicate (numero, sede).
    let duplicate = json!({
        "nome": "Outra",
        "numero": "101",
        "espaco": 4,
        "sede": "Campus Central"
    });
    let response = post_json(build_test_app(store.clone()), "/rooms", duplicate).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    // Reserve it.
    let response = put_json(
        build_test_app(store.clone()),
        &format!("/rooms/{id}"),
        json!({"disponibilidade": "reservada"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Sala atualizada com sucesso!");
    assert_eq!(json["room"]["nome"], "Sala A");
    assert_eq!(json["room"]["disponibilidade"], "reservada");

    // Only that room is reserved.
    let response = get(build_test_app(store.clone()), "/rooms/reserved").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![id]);

    // Delete.
    let response = delete(build_test_app(store.clone()), &format!("/rooms/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "A sala Sala A foi removida com sucesso.");

    // Gone.
    let response = get(build_test_app(store), &format!("/rooms/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Room with id {id} not found"));
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_returns_rooms_with_decoded_equipment() {
    let store = memory_store();
    create_room(&store, sala_a()).await;
    create_room(
        &store,
        json!({"nome": "Sala B", "numero": "102", "espaco": 6, "sede": "Campus Central"}),
    )
    .await;

    let response = get(build_test_app(store), "/rooms").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rooms = json.as_array().unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0]["recursos"], json!(["WiFi", "TV"]));
    assert_eq!(rooms[1]["recursos"], json!([]));
    assert!(rooms[1]["descricao"].is_null());
}

#[tokio::test]
async fn test_get_by_id_returns_bare_room() {
    let store = memory_store();
    let created = create_room(&store, sala_a()).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(store), &format!("/rooms/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["nome"], "Sala A");
    assert_eq!(json["espaco"], 10);
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_site_filter_matches_url_encoded_names() {
    let store = memory_store();
    let central = create_room(&store, sala_a()).await;
    create_room(
        &store,
        json!({"nome": "Lab", "numero": "101", "espaco": 20, "sede": "Campus Norte"}),
    )
    .await;

    let response = get(build_test_app(store.clone()), "/rooms/sede/Campus%20Central").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        ids(&body_json(response).await),
        vec![central["id"].as_i64().unwrap()]
    );

    let response = get(build_test_app(store), "/rooms/sede/Anexo%20B").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_availability_filters_split_all_rooms() {
    let store: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::with_demo_rooms());

    let all = body_json(get(build_test_app(store.clone()), "/rooms").await).await;
    let available = body_json(get(build_test_app(store.clone()), "/rooms/available").await).await;
    let reserved = body_json(get(build_test_app(store), "/rooms/reserved").await).await;

    assert!(available
        .as_array()
        .unwrap()
        .iter()
        .all(|room| room["disponibilidade"] == "livre"));
    assert!(reserved
        .as_array()
        .unwrap()
        .iter()
        .all(|room| room["disponibilidade"] == "reservada"));
    assert_eq!(
        ids(&available).len() + ids(&reserved).len(),
        ids(&all).len()
    );
}

#[tokio::test]
async fn test_stats_summarise_rooms() {
    let store: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::with_demo_rooms());

    let response = get(build_test_app(store), "/rooms/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({"total": 2, "livres": 1, "reservadas": 1, "capacidade_total": 32})
    );
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let response = get(build_test_app(memory_store()), "/rooms/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_with_missing_fields_lists_all_of_them() {
    let store = memory_store();
    let response = post_json(build_test_app(store.clone()), "/rooms", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["nome", "numero", "espaco", "sede"]);

    // Nothing was written.
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_invalid_values() {
    let mut body = sala_a();
    body["espaco"] = json!(0);
    body["disponibilidade"] = json!("ocupada");
    body["nome"] = json!("x".repeat(256));

    let response = post_json(build_test_app(memory_store()), "/rooms", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["nome", "espaco", "disponibilidade"]);
}

#[tokio::test]
async fn test_mistyped_fields_are_reported_as_field_errors() {
    let store = memory_store();
    let mut body = sala_a();
    body["espaco"] = json!("dez");

    let response = post_json(build_test_app(store.clone()), "/rooms", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"][0]["field"], "espaco");
    assert_eq!(json["fields"][0]["message"], "espaco must be an integer");

    let body = json!({
        "nome": "Sala A",
        "numero": 101,
        "espaco": 10.5,
        "sede": "Campus Central",
        "recursos": "WiFi"
    });
    let response = post_json(build_test_app(store.clone()), "/rooms", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["numero", "espaco", "recursos"]);

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mistyped_update_field_is_reported() {
    let store = memory_store();
    let room = create_room(&store, sala_a()).await;
    let id = room["id"].as_i64().unwrap();

    let response = patch_json(
        build_test_app(store),
        &format!("/rooms/{id}"),
        json!({"espaco": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "espaco");
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let response = post_json(build_test_app(memory_store()), "/rooms", json!(["Sala A"])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_accepts_explicit_reserved_status() {
    let store = memory_store();
    let mut body = sala_a();
    body["disponibilidade"] = json!("reservada");
    let room = create_room(&store, body).await;
    assert_eq!(room["disponibilidade"], "reservada");
}

#[tokio::test]
async fn test_update_validates_only_supplied_fields() {
    let store = memory_store();
    let room = create_room(&store, sala_a()).await;
    let id = room["id"].as_i64().unwrap();

    let response = patch_json(
        build_test_app(store.clone()),
        &format!("/rooms/{id}"),
        json!({"espaco": -3}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "espaco");

    let unchanged = body_json(get(build_test_app(store), &format!("/rooms/{id}")).await).await;
    assert_eq!(unchanged["espaco"], 10);
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let store = memory_store();
    let before = create_room(&store, sala_a()).await;
    let id = before["id"].as_i64().unwrap();

    let response = patch_json(
        build_test_app(store),
        &format!("/rooms/{id}"),
        json!({"recursos": ["Projetor"], "descricao": "Com vista"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let after = body_json(response).await["room"].clone();

    assert_eq!(after["recursos"], json!(["Projetor"]));
    assert_eq!(after["descricao"], "Com vista");
    for field in ["id", "nome", "numero", "espaco", "disponibilidade", "sede", "created_at"] {
        assert_eq!(after[field], before[field], "{field} changed");
    }
}

#[tokio::test]
async fn test_update_into_existing_location_conflicts() {
    let store = memory_store();
    create_room(&store, sala_a()).await;
    let other = create_room(
        &store,
        json!({"nome": "Sala B", "numero": "102", "espaco": 6, "sede": "Campus Central"}),
    )
    .await;
    let id = other["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(store),
        &format!("/rooms/{id}"),
        json!({"numero": "101"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_room_is_not_found() {
    let response = put_json(
        build_test_app(memory_store()),
        "/rooms/999",
        json!({"nome": "Nada"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_flips_availability_both_ways() {
    let store = memory_store();
    let room = create_room(&store, sala_a()).await;
    let id = room["id"].as_i64().unwrap();
    let uri = format!("/rooms/{id}/toggle");

    let json = body_json(post_empty(build_test_app(store.clone()), &uri).await).await;
    assert_eq!(json["room"]["disponibilidade"], "reservada");
    assert_eq!(json["message"], "Sala atualizada com sucesso!");

    let json = body_json(post_empty(build_test_app(store), &uri).await).await;
    assert_eq!(json["room"]["disponibilidade"], "livre");
}

#[tokio::test]
async fn test_toggle_missing_room_is_not_found() {
    let response = post_empty(build_test_app(memory_store()), "/rooms/5/toggle").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_missing_room_is_not_found() {
    let response = delete(build_test_app(memory_store()), "/rooms/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Room with id 1 not found");
}

#[tokio::test]
async fn test_deleted_room_disappears_from_list() {
    let store = memory_store();
    let keep = create_room(&store, sala_a()).await;
    let gone = create_room(
        &store,
        json!({"nome": "Sala B", "numero": "102", "espaco": 6, "sede": "Campus Central"}),
    )
    .await;
    let gone_id = gone["id"].as_i64().unwrap();

    let response = delete(build_test_app(store.clone()), &format!("/rooms/{gone_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let all = body_json(get(build_test_app(store), "/rooms").await).await;
    assert_eq!(ids(&all), vec![keep["id"].as_i64().unwrap()]);
}
