use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};
use users_info::{
    config::UsersInfoConfig,
    contract::{client::UsersInfoApi, error::UsersInfoError, model::UserDraft},
    UsersInfo,
};

fn create_test_module() -> UsersInfo {
    UsersInfo::new(UsersInfoConfig::default()).expect("default config is valid")
}

fn create_test_app(module: UsersInfo) -> Router {
    let mut ingress = ApiIngress::new(ApiIngressConfig::default());
    ingress.register_module(Arc::new(module));
    ingress.build_router().expect("router builds")
}

fn app() -> Router {
    create_test_app(create_test_module())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, with_json("POST", "/api/users", body)).await
}

#[tokio::test]
async fn create_then_fetch_user() {
    let app = app();

    let (status, created) = create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"id": 1, "name": "Ann", "email": "ann@x.com", "age": 30})
    );

    let (status, fetched) = send(&app, get("/api/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, all) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([created]));
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let (status, all) = send(&app(), get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn invalid_email_is_reported_before_age() {
    let (status, body) = create(&app(), json!({"name": "Bo", "email": "bad-email", "age": -3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Invalid email format"}));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = app();
    create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;

    let (status, body) = create(&app, json!({"name": "Cy", "email": "ann@x.com", "age": 25})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Email already exists"}));

    let (_, all) = send(&app, get("/api/users")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_fields_and_zero_age() {
    let app = app();
    for body in [
        json!({}),
        json!({"name": "Ann", "email": "ann@x.com"}),
        json!({"name": "Ann", "email": "ann@x.com", "age": 0}),
        json!([1, 2]),
    ] {
        let (status, resp) = create(&app, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(resp, json!({"message": "Name, email and age are required"}));
    }
}

#[tokio::test]
async fn invalid_age_is_rejected() {
    let (status, body) = create(&app(), json!({"name": "Ann", "email": "ann@x.com", "age": "30"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Age must be a positive number"}));
}

#[tokio::test]
async fn body_without_json_content_type_has_no_fields() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"name":"Ann","email":"ann@x.com","age":30}"#))
        .unwrap();
    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Name, email and age are required"}));
}

#[tokio::test]
async fn malformed_json_is_an_internal_error() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Internal server error"}));
}

#[tokio::test]
async fn bare_json_scalar_body_is_an_internal_error() {
    let app = app();
    for raw in [r#""Ann""#, "null", "123", "true"] {
        let req = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{raw}");
        assert_eq!(body, json!({"message": "Internal server error"}));
    }

    let (_, all) = send(&app, get("/api/users")).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn oversized_body_is_an_internal_error() {
    let app = app();
    // Well past the 100 KiB default limit
    let name = "a".repeat(200 * 1024);
    let payload = json!({"name": name, "email": "ann@x.com", "age": 30}).to_string();
    let req = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Internal server error"}));

    let (_, all) = send(&app, get("/api/users")).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn body_within_limit_is_accepted() {
    let name = "a".repeat(50 * 1024);
    let (status, created) = create(&app(), json!({"name": name, "email": "ann@x.com", "age": 30})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"].as_str().map(str::len), Some(50 * 1024));
}

#[tokio::test]
async fn integral_float_age_reads_back_as_integer() {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"Ann","email":"ann@x.com","age":30.0}"#))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        r#"{"id":1,"name":"Ann","email":"ann@x.com","age":30}"#
    );
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = app();
    create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;

    let (status, updated) = send(
        &app,
        with_json("PUT", "/api/users/1", json!({"name": "Ann B", "email": "ann@x.com", "age": 31.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": 1, "name": "Ann B", "email": "ann@x.com", "age": 31.5})
    );

    let (_, fetched) = send(&app, get("/api/users/1")).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_cannot_take_another_users_email() {
    let app = app();
    create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;
    create(&app, json!({"name": "Bo", "email": "bo@x.com", "age": 40})).await;

    let (status, body) = send(
        &app,
        with_json("PUT", "/api/users/2", json!({"name": "Bo", "email": "ann@x.com", "age": 40})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Email already exists"}));
}

#[tokio::test]
async fn update_of_unknown_user_is_not_found_even_with_invalid_body() {
    let (status, body) = send(&app(), with_json("PUT", "/api/users/42", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "User not found"}));
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = app();
    create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;

    let response = app.clone().oneshot(delete("/api/users/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());

    let (status, body) = send(&app, get("/api/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "User not found"}));

    let (status, _) = send(&app, delete("/api/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = app();
    create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;
    create(&app, json!({"name": "Bo", "email": "bo@x.com", "age": 40})).await;
    send(&app, delete("/api/users/2")).await;

    let (status, cy) = create(&app, json!({"name": "Cy", "email": "cy@x.com", "age": 25})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cy["id"], 3);

    // A deleted user's email becomes available again
    let (status, _) = create(&app, json!({"name": "Bo", "email": "bo@x.com", "age": 41})).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn path_ids_parse_leniently() {
    let app = app();
    create(&app, json!({"name": "Ann", "email": "ann@x.com", "age": 30})).await;

    let (status, body) = send(&app, get("/api/users/1abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    for raw in ["abc", "0", "-1"] {
        let (status, body) = send(&app, get(&format!("/api/users/{raw}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{raw}");
        assert_eq!(body, json!({"message": "User not found"}));
    }
}

#[tokio::test]
async fn custom_base_path_moves_routes() {
    let module = UsersInfo::new(UsersInfoConfig {
        base_path: "/v2/people".into(),
    })
    .unwrap();
    let app = create_test_app(module);

    let (status, _) = send(&app, get("/v2/people")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn local_client_and_rest_share_state() {
    let module = create_test_module();
    let client: Arc<dyn UsersInfoApi> = module.client();
    let app = create_test_app(module);

    let ann = client
        .create_user(UserDraft::new("Ann", "ann@x.com", 30))
        .await
        .unwrap();

    let (status, body) = send(&app, get(&format!("/api/users/{}", ann.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ann@x.com");

    let err = client
        .create_user(UserDraft::new("Ann", "ann@x.com", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, UsersInfoError::Validation { .. }));

    client.delete_user(ann.id).await.unwrap();
    let err = client.get_user(ann.id).await.unwrap_err();
    assert!(matches!(err, UsersInfoError::NotFound { id } if id == ann.id));
}
