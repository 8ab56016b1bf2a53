//! Editorial article handlers under `/api/v1`

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, CommonList, DbConn};
use crate::storage::articles::{self, ArticleFilter};
use axum::http::StatusCode;
use axum::Json;
use tasty_core::{Article, ArticleInput, PublishArticles, PublishResult, Validate};
use tracing::info;

pub async fn list(
    mut conn: DbConn,
    CommonList(query): CommonList,
    ApiQuery(filter): ApiQuery<ArticleFilter>,
) -> ApiResult<Json<Vec<Article>>> {
    Ok(Json(articles::list(&mut conn, &query, filter).await?))
}

pub async fn create(
    mut conn: DbConn,
    ApiJson(input): ApiJson<ArticleInput>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    input.validate()?;
    let article = articles::create(&mut conn, &input).await?;
    info!("Article created: {}", article);
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ArticleInput>,
) -> ApiResult<Json<Article>> {
    input.validate()?;
    Ok(Json(articles::update(&mut conn, id, &input).await?))
}

/// Bulk action: publish the listed articles
pub async fn publish(
    mut conn: DbConn,
    ApiJson(request): ApiJson<PublishArticles>,
) -> ApiResult<Json<PublishResult>> {
    let updated = articles::publish(&mut conn, &request.ids).await?;
    info!("Published {} of {} articles", updated, request.ids.len());
    Ok(Json(PublishResult { updated }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_and_filter() {
        let app = testing::app().await;
        let mut ids = Vec::new();
        for title in ["강남 맛집 10선", "역삼 카페"] {
            let res = send(
                &app,
                testing::json(
                    Method::POST,
                    "/api/v1/articles",
                    json!({"title": title, "content": "..."}),
                ),
            )
            .await;
            assert_eq!(res.status, StatusCode::CREATED);
            assert_eq!(res.body["is_published"], false);
            ids.push(res.body["id"].as_i64().unwrap());
        }

        let res = send(
            &app,
            testing::json(Method::POST, "/api/v1/articles/publish", json!({"ids": [ids[0]]})),
        )
        .await;
        assert_eq!(res.body["updated"], 1);

        let res = send(&app, testing::get("/api/v1/articles?is_published=true")).await;
        let published = res.body.as_array().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0]["id"], ids[0]);

        let res = send(&app, testing::get("/api/v1/articles")).await;
        assert_eq!(res.body[0]["id"], ids[1]);
    }

    #[tokio::test]
    async fn test_update_article() {
        let app = testing::app().await;
        let res = send(
            &app,
            testing::json(
                Method::POST,
                "/api/v1/articles",
                json!({"title": "초안", "content": "..."}),
            ),
        )
        .await;
        let id = res.body["id"].as_i64().unwrap();

        let res = send(
            &app,
            testing::json(
                Method::PUT,
                &format!("/api/v1/articles/{}", id),
                json!({"title": "완성", "content": "본문", "show_at_index": true}),
            ),
        )
        .await;
        assert_eq!(res.body["title"], "완성");
        assert_eq!(res.body["show_at_index"], true);

        let res = send(
            &app,
            testing::json(
                Method::PUT,
                "/api/v1/articles/99",
                json!({"title": "x", "content": "y"}),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
