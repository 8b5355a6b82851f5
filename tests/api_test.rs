// Testes de ponta a ponta do router: requisição HTTP completa, sem subir
// servidor (tower::ServiceExt::oneshot).

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{seed_item, seed_project, test_state};
use obra_backend::routes;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Resposta deveria ser JSON")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = routes::app(test_state().await);

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn project_creation_uses_the_success_envelope() {
    let app = routes::app(test_state().await);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/projects",
            serde_json::json!({
                "name": "Residencial Vila Nova",
                "budget": 250000.0,
                "responsible": "Eng. Marcos Lima"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Residencial Vila Nova");
    assert_eq!(body["data"]["status"], "active");
    assert!(body["data"]["id"].is_i64());

    // A listagem traz os agregados do dashboard.
    let response = app
        .oneshot(Request::builder().uri("/api/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["total_spent"], 0.0);
    assert_eq!(body["data"][0]["team_count"], 0);
    assert_eq!(body["data"][0]["material_count"], 0);
}

#[tokio::test]
async fn blank_name_is_rejected_before_touching_the_store() {
    let state = test_state().await;
    let app = routes::app(state.clone());

    let response = app
        .oneshot(json_request("POST", "/api/projects", serde_json::json!({ "name": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].is_string());

    assert!(state.project_service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_return_404_with_error_body() {
    let app = routes::app(test_state().await);

    let response = app
        .oneshot(Request::builder().uri("/api/projects/999").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = routes::app(test_state().await);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn chat_cursor_works_over_http() {
    let state = test_state().await;
    let project_id = seed_project(&state, "Obra com chat").await;

    let mut ids = Vec::new();
    for text in ["primeira", "segunda", "terceira"] {
        ids.push(
            state
                .chat_service
                .create(&state.db_pool, project_id, "Zé", text)
                .await
                .unwrap()
                .id,
        );
    }

    let app = routes::app(state);
    let uri = format!("/api/chat?project_id={}&after={}", project_id, ids[0]);
    let response = app
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let returned: Vec<i64> =
        body["data"].as_array().unwrap().iter().map(|m| m["id"].as_i64().unwrap()).collect();
    assert_eq!(returned, vec![ids[1], ids[2]]);

    let texts: Vec<&str> =
        body["data"].as_array().unwrap().iter().map(|m| m["message"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["segunda", "terceira"]);
}

#[tokio::test]
async fn delivery_without_stock_is_a_400_over_http() {
    let state = test_state().await;
    let item_id = seed_item(&state, "Cimento", 3.0, 40.0).await;

    let app = routes::app(state.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/inventory/deliveries",
            serde_json::json!({
                "inventory_id": item_id,
                "client_name": "Construtora Horizonte",
                "quantity": 30.0,
                "unit_price": 12.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Estoque insuficiente"));

    // Nada foi debitado.
    assert_eq!(state.inventory_service.get_item(item_id).await.unwrap().quantity, 3.0);
}

#[tokio::test]
async fn transactions_summary_flag_switches_the_payload() {
    let state = test_state().await;
    let project_id = state
        .project_service
        .create(
            &state.db_pool,
            "Obra com verba",
            None,
            obra_backend::models::project::ProjectStatus::Active,
            None,
            None,
            10_000.0,
            None,
            None,
        )
        .await
        .unwrap()
        .id;

    let app = routes::app(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/transactions",
            serde_json::json!({
                "project_id": project_id,
                "type": "expense",
                "description": "Concreto usinado",
                "amount": 1_800.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/transactions?summary=1&project_id={}", project_id);
    let response = app
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["expense_total"], 1_800.0);
    assert_eq!(body["data"]["budget"], 10_000.0);
    assert_eq!(body["data"]["remaining_budget"], 8_200.0);
}

#[tokio::test]
async fn inventory_summary_flag_switches_the_payload() {
    let state = test_state().await;
    seed_item(&state, "Cimento", 10.0, 40.0).await;

    let app = routes::app(state);
    let response = app
        .oneshot(
            Request::builder().uri("/api/inventory?summary=1").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["total_value"], 400.0);
}
