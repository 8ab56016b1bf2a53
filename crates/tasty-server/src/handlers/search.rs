use crate::error::ApiResult;
use crate::extractors::ApiQuery;
use axum::Json;
use tasty_core::search::{SearchParams, SearchRequest};
use tasty_core::SearchResponse;

pub async fn search(ApiQuery(params): ApiQuery<SearchParams>) -> ApiResult<Json<SearchResponse>> {
    let request = SearchRequest::from_params(params)?;
    Ok(Json(request.run()))
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_search_window() {
        let app = testing::app().await;
        let res = send(&app, testing::get("/search/?q=pizza&limit=2&offset=3")).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["results"][0], "pizza_result_4");
        assert_eq!(res.body["results"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["message"], "search succeeded");
    }

    #[tokio::test]
    async fn test_search_rejects_short_query() {
        let app = testing::app().await;
        for uri in ["/search/?q=ab", "/search/", "/search/?q=pizza&limit=0"] {
            let res = send(&app, testing::get(uri)).await;
            assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        }
    }
}
