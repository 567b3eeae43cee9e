use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Hello from Melo!",
    })
}
