use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use eventfinder_api::{api_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn forwards_query_and_authorization() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .and(query_param("category", "3"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = api_router(AppState::new(upstream.uri()).unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events/?category=3")
                .header("authorization", "Bearer T")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([{ "id": 1 }]));
}

#[tokio::test]
async fn passes_rejections_through_verbatim() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/5/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "This event has reached maximum capacity."
        })))
        .mount(&upstream)
        .await;

    let app = api_router(AppState::new(format!("{}/", upstream.uri())).unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events/5/register/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["detail"],
        "This event has reached maximum capacity."
    );
}

#[tokio::test]
async fn forwards_request_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/attendances/4/"))
        .and(body_json(json!({ "status": "cancelled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4 })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = api_router(AppState::new(upstream.uri()).unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/attendances/4/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"status":"cancelled"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let app = api_router(AppState::new("http://127.0.0.1:1").unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/categories/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(response).await["detail"], "Upstream API unavailable.");
}

#[tokio::test]
async fn leaves_other_paths_alone() {
    let app = api_router(AppState::new("http://127.0.0.1:1").unwrap());
    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn passes_redirects_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "/api/auth/login/elsewhere/"),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/login/elsewhere/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = api_router(AppState::new(upstream.uri()).unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()["location"],
        "/api/auth/login/elsewhere/"
    );
}
