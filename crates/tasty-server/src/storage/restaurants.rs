//! Restaurants with their tags, images and menus

use chrono::Utc;
use sqlx::{Connection, SqliteConnection};
use tasty_core::validation::{check_single_representative, representative_conflict};
use tasty_core::{
    CommonQuery, Restaurant, RestaurantDetail, RestaurantImage, RestaurantImageInput,
    RestaurantInput, RestaurantMenu, RestaurantMenuInput, Result, TastyError,
};
use tracing::warn;

use super::catalog;
use super::db::{delete_row, ensure_exists, parse_id_list};

const RESTAURANT_COLUMNS: &str = "SELECT id, name, branch_name, description, address, feature, \
    is_closed, latitude, longitude, phone, rating, rating_count, start_time, end_time, \
    last_order_time, category_id, region_id FROM restaurants";

const IMAGE_COLUMNS: &str = "SELECT id, restaurant_id, is_representative, sort_order, name, image, \
    created_at, updated_at FROM restaurant_images";

const MENU_COLUMNS: &str =
    "SELECT id, restaurant_id, name, price, image, created_at, updated_at FROM restaurant_menus";

/// List restaurants, optionally narrowed by `q` (name or branch) and a tag id
pub async fn list(
    conn: &mut SqliteConnection,
    query: &CommonQuery,
    tag_id: Option<i64>,
) -> Result<Vec<Restaurant>> {
    let restaurants = sqlx::query_as::<_, Restaurant>(&format!(
        "{} WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\\' OR branch_name LIKE ?1 ESCAPE '\\') \
         AND (?2 IS NULL OR EXISTS (SELECT 1 FROM restaurant_tags rt \
              WHERE rt.restaurant_id = restaurants.id AND rt.tag_id = ?2)) \
         ORDER BY id LIMIT ?3 OFFSET ?4",
        RESTAURANT_COLUMNS
    ))
    .bind(query.like_pattern())
    .bind(tag_id)
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;

    let mut out = Vec::with_capacity(restaurants.len());
    for restaurant in restaurants {
        out.push(with_tag_ids(conn, restaurant).await?);
    }
    Ok(out)
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Restaurant> {
    let sql = format!("{} WHERE id = ?1", RESTAURANT_COLUMNS);
    let restaurant = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| TastyError::not_found("Restaurant not found"))?;
    with_tag_ids(conn, restaurant).await
}

/// Restaurant with its category, region, tags, menus and images resolved
pub async fn detail(conn: &mut SqliteConnection, id: i64) -> Result<RestaurantDetail> {
    let restaurant = get(conn, id).await?;

    let category = match restaurant.category_id {
        Some(category_id) => Some(catalog::get_category(conn, category_id).await?),
        None => None,
    };
    let region = match restaurant.region_id {
        Some(region_id) => Some(catalog::get_region(conn, region_id).await?),
        None => None,
    };
    let tags = catalog::tags_by_ids(conn, &restaurant.tag_ids).await?;
    let menus = list_menus(conn, id).await?;
    let images = list_images(conn, id).await?;

    Ok(RestaurantDetail {
        display_name: restaurant.display_name(),
        restaurant,
        category,
        region,
        tags,
        menus,
        images,
    })
}

pub async fn create(conn: &mut SqliteConnection, input: &RestaurantInput) -> Result<Restaurant> {
    let mut tx = conn.begin().await?;
    check_references(&mut tx, input).await?;

    let id = bind_fields(
        sqlx::query(
            "INSERT INTO restaurants (name, branch_name, description, address, feature, is_closed, \
             latitude, longitude, phone, rating, rating_count, start_time, end_time, \
             last_order_time, category_id, region_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        ),
        input,
    )
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    replace_tags(&mut tx, id, &input.tag_ids).await?;
    let restaurant = get(&mut tx, id).await?;
    tx.commit().await?;
    Ok(restaurant)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    input: &RestaurantInput,
) -> Result<Restaurant> {
    let mut tx = conn.begin().await?;
    ensure_exists(&mut tx, "restaurants", id, "Restaurant").await?;
    check_references(&mut tx, input).await?;

    bind_fields(
        sqlx::query(
            "UPDATE restaurants SET name = ?1, branch_name = ?2, description = ?3, address = ?4, \
             feature = ?5, is_closed = ?6, latitude = ?7, longitude = ?8, phone = ?9, \
             rating = ?10, rating_count = ?11, start_time = ?12, end_time = ?13, \
             last_order_time = ?14, category_id = ?15, region_id = ?16 WHERE id = ?17",
        ),
        input,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    replace_tags(&mut tx, id, &input.tag_ids).await?;
    let restaurant = get(&mut tx, id).await?;
    tx.commit().await?;
    Ok(restaurant)
}

/// Images, menus, tag links and reviews go with the restaurant
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "restaurants", id, "Restaurant").await
}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

fn bind_fields<'q>(query: SqliteQuery<'q>, input: &'q RestaurantInput) -> SqliteQuery<'q> {
    query
        .bind(&input.name)
        .bind(&input.branch_name)
        .bind(&input.description)
        .bind(&input.address)
        .bind(&input.feature)
        .bind(input.is_closed)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.phone)
        .bind(input.rating)
        .bind(input.rating_count)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.last_order_time)
        .bind(input.category_id)
        .bind(input.region_id)
}

async fn check_references(conn: &mut SqliteConnection, input: &RestaurantInput) -> Result<()> {
    if let Some(category_id) = input.category_id {
        ensure_exists(conn, "restaurant_categories", category_id, "Category").await?;
    }
    if let Some(region_id) = input.region_id {
        ensure_exists(conn, "regions", region_id, "Region").await?;
    }
    for tag_id in &input.tag_ids {
        ensure_exists(conn, "tags", *tag_id, "Tag").await?;
    }
    Ok(())
}

async fn replace_tags(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    tag_ids: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM restaurant_tags WHERE restaurant_id = ?1")
        .bind(restaurant_id)
        .execute(&mut *conn)
        .await?;
    for tag_id in tag_ids {
        sqlx::query("INSERT OR IGNORE INTO restaurant_tags (restaurant_id, tag_id) VALUES (?1, ?2)")
            .bind(restaurant_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn with_tag_ids(
    conn: &mut SqliteConnection,
    mut restaurant: Restaurant,
) -> Result<Restaurant> {
    let (ids,): (Option<String>,) =
        sqlx::query_as("SELECT GROUP_CONCAT(tag_id) FROM restaurant_tags WHERE restaurant_id = ?1")
            .bind(restaurant.id)
            .fetch_one(&mut *conn)
            .await?;
    restaurant.tag_ids = parse_id_list(ids);
    Ok(restaurant)
}

// Images

/// Images of a restaurant, explicit order first
pub async fn list_images(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
) -> Result<Vec<RestaurantImage>> {
    let images = sqlx::query_as::<_, RestaurantImage>(&format!(
        "{} WHERE restaurant_id = ?1 ORDER BY sort_order IS NULL, sort_order, id",
        IMAGE_COLUMNS
    ))
    .bind(restaurant_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(images)
}

pub async fn get_image(conn: &mut SqliteConnection, id: i64) -> Result<RestaurantImage> {
    sqlx::query_as::<_, RestaurantImage>(&format!("{} WHERE id = ?1", IMAGE_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| TastyError::not_found("Image not found"))
}

pub async fn create_image(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    input: &RestaurantImageInput,
) -> Result<RestaurantImage> {
    let mut tx = conn.begin().await?;
    ensure_exists(&mut tx, "restaurants", restaurant_id, "Restaurant").await?;
    ensure_single_representative(&mut tx, restaurant_id, None, input.is_representative).await?;

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO restaurant_images \
         (restaurant_id, is_representative, sort_order, name, image, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(restaurant_id)
    .bind(input.is_representative)
    .bind(input.order)
    .bind(&input.name)
    .bind(&input.image)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(representative_violation)?;

    let image = get_image(&mut tx, result.last_insert_rowid()).await?;
    tx.commit().await?;
    Ok(image)
}

pub async fn update_image(
    conn: &mut SqliteConnection,
    id: i64,
    input: &RestaurantImageInput,
) -> Result<RestaurantImage> {
    let mut tx = conn.begin().await?;
    let current = get_image(&mut tx, id).await?;
    ensure_single_representative(&mut tx, current.restaurant_id, Some(id), input.is_representative)
        .await?;

    sqlx::query(
        "UPDATE restaurant_images SET is_representative = ?1, sort_order = ?2, name = ?3, \
         image = ?4, updated_at = ?5 WHERE id = ?6",
    )
    .bind(input.is_representative)
    .bind(input.order)
    .bind(&input.name)
    .bind(&input.image)
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(representative_violation)?;

    let image = get_image(&mut tx, id).await?;
    tx.commit().await?;
    Ok(image)
}

pub async fn delete_image(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "restaurant_images", id, "Image").await
}

async fn ensure_single_representative(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    image_id: Option<i64>,
    is_representative: bool,
) -> Result<()> {
    if !is_representative {
        return Ok(());
    }

    let (others,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM restaurant_images \
         WHERE restaurant_id = ?1 AND is_representative = 1 AND (?2 IS NULL OR id != ?2)",
    )
    .bind(restaurant_id)
    .bind(image_id)
    .fetch_one(&mut *conn)
    .await?;

    check_single_representative(is_representative, others).map_err(|e| {
        warn!("Rejected second representative image for restaurant {}", restaurant_id);
        e
    })
}

/// The partial unique index reports the same rule as the explicit check
fn representative_violation(e: sqlx::Error) -> TastyError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => representative_conflict(),
        _ => e.into(),
    }
}

// Menus

pub async fn list_menus(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
) -> Result<Vec<RestaurantMenu>> {
    let menus = sqlx::query_as::<_, RestaurantMenu>(&format!(
        "{} WHERE restaurant_id = ?1 ORDER BY id",
        MENU_COLUMNS
    ))
    .bind(restaurant_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(menus)
}

pub async fn create_menu(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    input: &RestaurantMenuInput,
) -> Result<RestaurantMenu> {
    ensure_exists(conn, "restaurants", restaurant_id, "Restaurant").await?;

    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO restaurant_menus (restaurant_id, name, price, image, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(restaurant_id)
    .bind(&input.name)
    .bind(input.price)
    .bind(&input.image)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    sqlx::query_as::<_, RestaurantMenu>(&format!("{} WHERE id = ?1", MENU_COLUMNS))
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
}

pub async fn delete_menu(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "restaurant_menus", id, "Menu").await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::Database;
    use tasty_core::pagination::CommonParams;
    use tasty_core::{CategoryInput, TagInput};

    pub(crate) fn input(name: &str) -> RestaurantInput {
        RestaurantInput {
            name: name.to_string(),
            branch_name: Some("강남점".to_string()),
            description: None,
            address: "서울 강남구 테헤란로 123".to_string(),
            feature: "분식".to_string(),
            is_closed: false,
            latitude: 37.5,
            longitude: 127.0,
            phone: None,
            rating: 4.2,
            rating_count: 10,
            start_time: None,
            end_time: None,
            last_order_time: None,
            category_id: None,
            region_id: None,
            tag_ids: vec![],
        }
    }

    fn image(is_representative: bool) -> RestaurantImageInput {
        RestaurantImageInput {
            is_representative,
            order: None,
            name: None,
            image: "restaurant/a.jpg".to_string(),
        }
    }

    fn all() -> CommonQuery {
        CommonQuery::from_params(CommonParams::default(), 100).unwrap()
    }

    #[tokio::test]
    async fn test_create_with_tags_and_filter() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let tag = catalog::create_tag(&mut conn, &TagInput { name: "혼밥".into() })
            .await
            .unwrap();
        let mut tagged = input("김밥천국");
        tagged.tag_ids = vec![tag.id];
        let created = create(&mut conn, &tagged).await.unwrap();
        create(&mut conn, &input("한솥도시락")).await.unwrap();

        assert_eq!(created.tag_ids, vec![tag.id]);
        assert_eq!(list(&mut conn, &all(), None).await.unwrap().len(), 2);

        let filtered = list(&mut conn, &all(), Some(tag.id)).await.unwrap();
        assert_eq!(filtered, vec![created]);
    }

    #[tokio::test]
    async fn test_missing_tag_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let mut tagged = input("김밥천국");
        tagged.tag_ids = vec![5];
        let err = create(&mut conn, &tagged).await.unwrap_err();
        assert!(matches!(err, TastyError::NotFound(msg) if msg == "Tag not found"));
        assert!(list(&mut conn, &all(), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_representative_rejected() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let restaurant = create(&mut conn, &input("김밥천국")).await.unwrap();

        let first = create_image(&mut conn, restaurant.id, &image(true)).await.unwrap();
        assert!(first.is_representative);

        let err = create_image(&mut conn, restaurant.id, &image(true)).await.unwrap_err();
        assert!(matches!(err, TastyError::Validation(_)));

        // Plain images are always accepted
        create_image(&mut conn, restaurant.id, &image(false)).await.unwrap();
        create_image(&mut conn, restaurant.id, &image(false)).await.unwrap();

        // Re-saving the representative itself is fine
        update_image(&mut conn, first.id, &image(true)).await.unwrap();
        assert_eq!(list_images(&mut conn, restaurant.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_promoting_second_image_rejected() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let restaurant = create(&mut conn, &input("김밥천국")).await.unwrap();

        create_image(&mut conn, restaurant.id, &image(true)).await.unwrap();
        let plain = create_image(&mut conn, restaurant.id, &image(false)).await.unwrap();

        let err = update_image(&mut conn, plain.id, &image(true)).await.unwrap_err();
        assert!(matches!(err, TastyError::Validation(_)));
        assert!(!get_image(&mut conn, plain.id).await.unwrap().is_representative);
    }

    #[tokio::test]
    async fn test_delete_cascades_children() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let restaurant = create(&mut conn, &input("김밥천국")).await.unwrap();

        let image = create_image(&mut conn, restaurant.id, &image(false)).await.unwrap();
        let menu = create_menu(
            &mut conn,
            restaurant.id,
            &RestaurantMenuInput {
                name: "라면".into(),
                price: 4000,
                image: None,
            },
        )
        .await
        .unwrap();

        delete(&mut conn, restaurant.id).await.unwrap();
        assert!(matches!(get_image(&mut conn, image.id).await, Err(TastyError::NotFound(_))));
        assert!(matches!(delete_menu(&mut conn, menu.id).await, Err(TastyError::NotFound(_))));
        assert!(matches!(get(&mut conn, restaurant.id).await, Err(TastyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_category_delete_nulls_restaurant() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let category = catalog::create_category(
            &mut conn,
            &CategoryInput {
                name: "분식".into(),
                cuisine_type_id: None,
            },
        )
        .await
        .unwrap();
        let mut with_category = input("김밥천국");
        with_category.category_id = Some(category.id);
        let restaurant = create(&mut conn, &with_category).await.unwrap();

        let before = detail(&mut conn, restaurant.id).await.unwrap();
        assert_eq!(before.category, Some(category.clone()));
        assert_eq!(before.display_name, "김밥천국 강남점");

        catalog::delete_category(&mut conn, category.id).await.unwrap();
        let after = get(&mut conn, restaurant.id).await.unwrap();
        assert_eq!(after.category_id, None);
    }
}
