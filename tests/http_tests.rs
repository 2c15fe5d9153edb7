use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use product_catalog::app::catalog::handler::{routes, AppState};
use product_catalog::app::catalog::{ProductRepository, Shell};
use product_catalog::infrastructure::storage::{DynStore, MemoryStore};

fn app() -> (Router, AppState) {
    let store: DynStore = Box::new(MemoryStore::new());
    let state = AppState::new(Shell::new(ProductRepository::new(store)));
    (routes(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_listing_shows_seed_products() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["view"], "listing");
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["products"][0]["price_label"], "R$ 2.599,99");
}

#[tokio::test]
async fn test_create_product() {
    let (app, state) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/create",
        Some(json!({"name": "Caneca", "description": "Caneca de cerâmica", "price": "19,90"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["view"], "listing");
    let products = body["data"]["products"].as_array().unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[3]["name"], "Caneca");
    assert_eq!(products[3]["price"], 19.9);
    assert_eq!(state.shell.lock().products().len(), 4);
}

#[tokio::test]
async fn test_create_with_blank_name_returns_field_errors() {
    let (app, state) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/create",
        Some(json!({"name": "", "description": "x", "price": "10"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["page"]["view"], "creating");
    assert_eq!(body["page"]["errors"], json!({"name": "Nome é obrigatório"}));
    assert_eq!(state.shell.lock().products().len(), 3);

    // 表单仍然打开，修改字段后错误被清除
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/form",
        Some(json!({"field": "name", "value": "Caneca"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["errors"], json!({}));
    assert_eq!(body["data"]["values"]["description"], "x");

    let (status, _) = send(&app, Method::POST, "/form/submit", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.shell.lock().products().len(), 4);
}

#[tokio::test]
async fn test_edit_flow_keeps_id_and_position() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/edit/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["view"], "editing");
    assert_eq!(body["data"]["values"]["price"], "4999,9");

    let (status, body) = send(
        &app,
        Method::POST,
        "/edit/2",
        Some(json!({"name": "Notebook", "description": "Novo", "price": "4500"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let products = body["data"]["products"].as_array().unwrap();
    assert_eq!(products[1]["id"], "2");
    assert_eq!(products[1]["name"], "Notebook");
    assert_eq!(products[1]["price"], 4500.0);
}

#[tokio::test]
async fn test_edit_missing_product() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/edit/missing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["view"], "listing");

    let (status, _) = send(
        &app,
        Method::POST,
        "/edit/missing",
        Some(json!({"name": "a", "description": "b", "price": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_discards_form() {
    let (app, state) = app();
    send(&app, Method::GET, "/create", None).await;
    send(
        &app,
        Method::PATCH,
        "/form",
        Some(json!({"field": "name", "value": "Rascunho"})),
    )
    .await;
    let (status, body) = send(&app, Method::POST, "/form/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["view"], "listing");
    assert_eq!(state.shell.lock().products().len(), 3);

    let (status, _) = send(&app, Method::POST, "/form/submit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clients_share_one_open_form() {
    let (app, _) = app();
    send(&app, Method::GET, "/create", None).await;
    send(
        &app,
        Method::PATCH,
        "/form",
        Some(json!({"field": "name", "value": "Rascunho"})),
    )
    .await;

    // 另一个客户端打开新建表单时看到同一份草稿
    let (_, body) = send(&app, Method::GET, "/create", None).await;
    assert_eq!(body["data"]["values"]["name"], "Rascunho");

    // 任一客户端回到列表都会丢弃草稿
    send(&app, Method::GET, "/", None).await;
    let (status, _) = send(&app, Method::POST, "/form/submit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, body) = send(&app, Method::GET, "/create", None).await;
    assert_eq!(body["data"]["values"]["name"], "");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["page"]["view"], "not_found");
    assert_eq!(body["page"]["title"], "Página não encontrada");
}

#[tokio::test]
async fn test_health_reports_shell_state() {
    let (app, _) = app();
    send(&app, Method::GET, "/create", None).await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["catalog"]["products_count"], 3);
    assert_eq!(body["catalog"]["shell"]["state"], "creating");
}
