use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tasty_core::ServiceInfo;

pub async fn info() -> impl IntoResponse {
    (
        [
            (header::HeaderName::from_static("x-api-version"), "1.0.0"),
            (header::CONTENT_LANGUAGE, "en-US"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Json(ServiceInfo {
            service: "MyApp".to_string(),
            description: "This API provides service info.".to_string(),
            status: "running".to_string(),
        }),
    )
}
