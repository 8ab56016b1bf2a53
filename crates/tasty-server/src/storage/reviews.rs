//! Reviews and review images. Lists are newest first.

use chrono::Utc;
use sqlx::SqliteConnection;
use tasty_core::{
    Page, Result, Review, ReviewDetail, ReviewImage, ReviewImageInput, ReviewInput, ReviewListing,
    TastyError,
};

use super::db::{delete_row, ensure_exists};

const REVIEW_COLUMNS: &str = "SELECT id, restaurant_id, social_channel_id, title, author, \
    profile_image, content, rating, created_at, updated_at FROM reviews";

pub async fn list_for_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    page: Page,
) -> Result<Vec<Review>> {
    ensure_exists(conn, "restaurants", restaurant_id, "Restaurant").await?;

    let reviews = sqlx::query_as::<_, Review>(&format!(
        "{} WHERE restaurant_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
        REVIEW_COLUMNS
    ))
    .bind(restaurant_id)
    .bind(page.sql_limit())
    .bind(page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(reviews)
}

/// Admin listing across all restaurants
pub async fn list(conn: &mut SqliteConnection, page: Page) -> Result<Vec<ReviewListing>> {
    let rows: Vec<(i64, String, String, i32, String)> = sqlx::query_as(
        "SELECT r.id, rs.name, r.author, r.rating, r.content FROM reviews r \
         JOIN restaurants rs ON rs.id = r.restaurant_id \
         ORDER BY r.created_at DESC, r.id DESC LIMIT ?1 OFFSET ?2",
    )
    .bind(page.sql_limit())
    .bind(page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, restaurant_name, author, rating, content)| ReviewListing {
            id,
            restaurant_name,
            author,
            rating,
            content_partial: content.chars().take(tasty_core::CONTENT_PREVIEW_CHARS).collect(),
        })
        .collect())
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Review> {
    sqlx::query_as::<_, Review>(&format!("{} WHERE id = ?1", REVIEW_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| TastyError::not_found("Review not found"))
}

pub async fn detail(conn: &mut SqliteConnection, id: i64) -> Result<ReviewDetail> {
    let review = get(conn, id).await?;
    let (restaurant_name,): (String,) = sqlx::query_as("SELECT name FROM restaurants WHERE id = ?1")
        .bind(review.restaurant_id)
        .fetch_one(&mut *conn)
        .await?;
    let images = sqlx::query_as::<_, ReviewImage>(
        "SELECT id, review_id, name, image, created_at, updated_at FROM review_images \
         WHERE review_id = ?1 ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ReviewDetail {
        review,
        restaurant_name,
        images,
    })
}

pub async fn create(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    input: &ReviewInput,
) -> Result<Review> {
    ensure_exists(conn, "restaurants", restaurant_id, "Restaurant").await?;
    if let Some(channel_id) = input.social_channel_id {
        ensure_exists(conn, "social_channels", channel_id, "Social channel").await?;
    }

    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO reviews (restaurant_id, social_channel_id, title, author, profile_image, \
         content, rating, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(restaurant_id)
    .bind(input.social_channel_id)
    .bind(&input.title)
    .bind(&input.author)
    .bind(&input.profile_image)
    .bind(&input.content)
    .bind(input.rating)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    get(conn, id).await
}

/// Review images go with the review
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "reviews", id, "Review").await
}

pub async fn add_image(
    conn: &mut SqliteConnection,
    review_id: i64,
    input: &ReviewImageInput,
) -> Result<ReviewImage> {
    ensure_exists(conn, "reviews", review_id, "Review").await?;

    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO review_images (review_id, name, image, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(review_id)
    .bind(&input.name)
    .bind(&input.image)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(ReviewImage {
        id,
        review_id,
        name: input.name.clone(),
        image: input.image.clone(),
        created_at: now,
        updated_at: now,
    })
}
