//! Cookie set/read demo

use crate::extractors::cookies::read_cookie;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use tasty_core::{AdsCookie, MessageResponse};

pub const ADS_COOKIE: &str = "ads_id";

pub async fn set_cookie() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, format!("{}=abc123; Path=/", ADS_COOKIE))],
        Json(MessageResponse::new("Cookie has been set")),
    )
}

pub async fn read(headers: HeaderMap) -> Json<AdsCookie> {
    Json(AdsCookie {
        ads_id: read_cookie(&headers, ADS_COOKIE),
    })
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, send};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;

    #[tokio::test]
    async fn test_cookie_round_trip() {
        let app = testing::app().await;
        let res = send(&app, testing::get("/cookies/set-cookie/")).await;
        let cookie = res.headers[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("ads_id=abc123"));

        let request = Request::builder()
            .uri("/cookies/items/")
            .header(header::COOKIE, "ads_id=abc123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.body["ads_id"], "abc123");

        let res = send(&app, testing::get("/cookies/items/")).await;
        assert_eq!(res.body["ads_id"], Value::Null);
    }
}
