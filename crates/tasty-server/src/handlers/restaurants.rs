//! Restaurant, image and menu handlers under `/api/v1`

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, CommonList, DbConn};
use crate::storage::restaurants;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasty_core::{
    Deleted, Restaurant, RestaurantDetail, RestaurantImage, RestaurantImageInput, RestaurantInput,
    RestaurantMenu, RestaurantMenuInput, Validate,
};
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct TagFilter {
    pub tag: Option<i64>,
}

pub async fn list(
    mut conn: DbConn,
    CommonList(query): CommonList,
    ApiQuery(filter): ApiQuery<TagFilter>,
) -> ApiResult<Json<Vec<Restaurant>>> {
    Ok(Json(restaurants::list(&mut conn, &query, filter.tag).await?))
}

pub async fn create(
    mut conn: DbConn,
    ApiJson(input): ApiJson<RestaurantInput>,
) -> ApiResult<(StatusCode, Json<Restaurant>)> {
    input.validate()?;
    let created = restaurants::create(&mut conn, &input).await?;
    info!("Restaurant {} created: {}", created.id, created);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<RestaurantDetail>> {
    Ok(Json(restaurants::detail(&mut conn, id).await?))
}

pub async fn update(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<RestaurantInput>,
) -> ApiResult<Json<Restaurant>> {
    input.validate()?;
    let updated = restaurants::update(&mut conn, id, &input).await?;
    info!("Restaurant {} updated", id);
    Ok(Json(updated))
}

pub async fn delete(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Deleted>> {
    restaurants::delete(&mut conn, id).await?;
    info!("Restaurant {} deleted", id);
    Ok(Json(Deleted { id }))
}

pub async fn list_images(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<RestaurantImage>>> {
    restaurants::get(&mut conn, id).await?;
    Ok(Json(restaurants::list_images(&mut conn, id).await?))
}

pub async fn create_image(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<RestaurantImageInput>,
) -> ApiResult<(StatusCode, Json<RestaurantImage>)> {
    input.validate()?;
    let image = restaurants::create_image(&mut conn, id, &input).await?;
    info!("Image {} added to restaurant {}", image.id, id);
    Ok((StatusCode::CREATED, Json(image)))
}

pub async fn update_image(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<RestaurantImageInput>,
) -> ApiResult<Json<RestaurantImage>> {
    input.validate()?;
    Ok(Json(restaurants::update_image(&mut conn, id, &input).await?))
}

pub async fn delete_image(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Deleted>> {
    restaurants::delete_image(&mut conn, id).await?;
    Ok(Json(Deleted { id }))
}

pub async fn list_menus(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<RestaurantMenu>>> {
    restaurants::get(&mut conn, id).await?;
    Ok(Json(restaurants::list_menus(&mut conn, id).await?))
}

pub async fn create_menu(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<RestaurantMenuInput>,
) -> ApiResult<(StatusCode, Json<RestaurantMenu>)> {
    input.validate()?;
    let menu = restaurants::create_menu(&mut conn, id, &input).await?;
    info!("Menu {} added to restaurant {}", menu.id, id);
    Ok((StatusCode::CREATED, Json(menu)))
}

pub async fn delete_menu(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Deleted>> {
    restaurants::delete_menu(&mut conn, id).await?;
    Ok(Json(Deleted { id }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, send};
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};

    fn restaurant() -> Value {
        json!({
            "name": "김밥천국",
            "branch_name": "강남점",
            "address": "서울 강남구 테헤란로 123",
            "feature": "저렴한 가격",
            "latitude": 37.501274,
            "longitude": 127.039585,
            "rating": 4.2,
            "rating_count": 120,
            "start_time": "00:00:00"
        })
    }

    async fn create_restaurant(app: &Router) -> i64 {
        let res = send(app, testing::json(Method::POST, "/api/v1/restaurants", restaurant())).await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_detail_has_inlines() {
        let app = testing::app().await;
        let id = create_restaurant(&app).await;

        send(
            &app,
            testing::json(
                Method::POST,
                &format!("/api/v1/restaurants/{}/menus", id),
                json!({"name": "라면", "price": 4000}),
            ),
        )
        .await;

        let res = send(&app, testing::get(&format!("/api/v1/restaurants/{}", id))).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["display_name"], "김밥천국 강남점");
        assert_eq!(res.body["menus"][0]["price"], 4000);
        assert_eq!(res.body["images"], json!([]));
        assert_eq!(res.body["category"], Value::Null);
    }

    #[tokio::test]
    async fn test_representative_rule_over_http() {
        let app = testing::app().await;
        let id = create_restaurant(&app).await;
        let uri = format!("/api/v1/restaurants/{}/images", id);

        let rep = json!({"is_representative": true, "image": "restaurant/a.jpg"});
        let res = send(&app, testing::json(Method::POST, &uri, rep.clone())).await;
        assert_eq!(res.status, StatusCode::CREATED);

        let res = send(&app, testing::json(Method::POST, &uri, rep)).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            res.body["detail"],
            "Only one representative image can be set per restaurant"
        );

        let plain = json!({"image": "restaurant/b.jpg", "order": 1});
        let res = send(&app, testing::json(Method::POST, &uri, plain)).await;
        assert_eq!(res.status, StatusCode::CREATED);

        let res = send(&app, testing::get(&uri)).await;
        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_fields_rejected() {
        let app = testing::app().await;
        let mut body = restaurant();
        body["latitude"] = json!(120.0);
        let res = send(&app, testing::json(Method::POST, "/api/v1/restaurants", body)).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);

        let mut body = restaurant();
        body["region_id"] = json!(9);
        let res = send(&app, testing::json(Method::POST, "/api/v1/restaurants", body)).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body["detail"], "Region not found");
    }

    #[tokio::test]
    async fn test_children_of_missing_restaurant() {
        let app = testing::app().await;
        let res = send(
            &app,
            testing::json(Method::POST, "/api/v1/restaurants/5/menus", json!({"name": "라면"})),
        )
        .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        let res = send(&app, testing::get("/api/v1/restaurants/5/images")).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
