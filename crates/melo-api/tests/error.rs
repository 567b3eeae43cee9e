use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use melo_api::error::ApiError;
use melo_api::summary::SummaryError;
use melo_auth::error::AuthError;
use melo_storage::error::StorageError;
use uuid::Uuid;

async fn parts(error: impl Into<ApiError>) -> (StatusCode, serde_json::Value) {
    let response: Response = error.into().into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn internal() -> serde_json::Value {
    serde_json::json!({ "error": "internal server error" })
}

#[tokio::test]
async fn unknown_patient_maps_to_404() {
    let id = Uuid::new_v4();
    let (status, body) = parts(SummaryError::NotFound(id)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        serde_json::json!({ "error": format!("patient not found: {id}") })
    );
}

#[tokio::test]
async fn configuration_and_generation_failures_hide_detail() {
    for error in [
        SummaryError::Configuration("AZURE_OPENAI_ENDPOINT is not set".to_string()),
        SummaryError::Generation("503 Service Unavailable".to_string()),
    ] {
        let (status, body) = parts(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, internal());
    }
}

#[tokio::test]
async fn storage_failure_maps_to_500() {
    let (status, body) = parts(SummaryError::Storage(StorageError::Config(
        "bad url".to_string(),
    )))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal());
}

#[tokio::test]
async fn key_provider_failures_are_not_the_callers_fault() {
    for error in [
        AuthError::KeyFetch("connection refused".to_string()),
        AuthError::KeyParse("unexpected token".to_string()),
    ] {
        let (status, body) = parts(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, internal());
    }
}

#[tokio::test]
async fn token_rejections_map_to_401_with_reason() {
    let (status, body) = parts(AuthError::TokenExpired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({ "error": "token has expired" }));

    let (status, body) = parts(AuthError::UnknownKeyId("x".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        serde_json::json!({ "error": "invalid token: key id 'x' not found in JWKS" })
    );
}

#[tokio::test]
async fn bad_request_keeps_its_message() {
    let (status, body) = parts(ApiError::BadRequest("invalid patient id: p1".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "error": "invalid patient id: p1" }));
}
