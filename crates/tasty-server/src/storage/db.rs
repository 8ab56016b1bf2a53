//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::str::FromStr;
use tasty_core::TastyError;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// Private in-memory database. One connection that is never recycled,
    /// so the data lives as long as the pool.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Check out one connection; it returns to the pool when dropped
    pub async fn acquire(&self) -> std::result::Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.pool.acquire().await
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(pool).await?;
        }
        Ok(())
    }
}

const SCHEMA: &[&str] = &[
    // Accounts
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT UNIQUE NOT NULL,
        hashed_password TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_items_owner ON items(owner_id)",
    // Catalog lookups
    r#"
    CREATE TABLE IF NOT EXISTS cuisine_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        cuisine_type_id INTEGER REFERENCES cuisine_types(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sido TEXT NOT NULL,
        sigungu TEXT NOT NULL,
        eupmyeondong TEXT NOT NULL,
        UNIQUE (sido, sigungu, eupmyeondong)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS social_channels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    // Restaurants
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        branch_name TEXT,
        description TEXT,
        address TEXT NOT NULL,
        feature TEXT NOT NULL,
        is_closed INTEGER NOT NULL DEFAULT 0,
        latitude REAL NOT NULL DEFAULT 0,
        longitude REAL NOT NULL DEFAULT 0,
        phone TEXT,
        rating REAL NOT NULL DEFAULT 0,
        rating_count INTEGER NOT NULL DEFAULT 0,
        start_time TEXT,
        end_time TEXT,
        last_order_time TEXT,
        category_id INTEGER REFERENCES restaurant_categories(id) ON DELETE SET NULL,
        region_id INTEGER REFERENCES regions(id) ON DELETE SET NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_restaurants_name ON restaurants(name)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_branch ON restaurants(branch_name)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_address ON restaurants(address)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_geo ON restaurants(latitude, longitude)",
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_tags (
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
        tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (restaurant_id, tag_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
        is_representative INTEGER NOT NULL DEFAULT 0,
        sort_order INTEGER,
        name TEXT,
        image TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    // One representative image per restaurant
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_restaurant_images_representative
        ON restaurant_images(restaurant_id) WHERE is_representative = 1
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_menus (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        price INTEGER NOT NULL DEFAULT 0,
        image TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    // Reviews
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
        social_channel_id INTEGER REFERENCES social_channels(id) ON DELETE SET NULL,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        profile_image TEXT,
        content TEXT NOT NULL,
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reviews_created ON reviews(created_at)",
    r#"
    CREATE TABLE IF NOT EXISTS review_images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        review_id INTEGER NOT NULL REFERENCES reviews(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        image TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    // Editorial
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        preview_image TEXT,
        content TEXT NOT NULL,
        show_at_index INTEGER NOT NULL DEFAULT 0,
        is_published INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        modified_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_title ON articles(title)",
];

/// `NotFound` unless `table` has a row with `id`
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    id: i64,
    label: &str,
) -> tasty_core::Result<()> {
    let found: Option<(i64,)> = sqlx::query_as(&format!("SELECT id FROM {} WHERE id = ?1", table))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(TastyError::not_found(format!("{} not found", label))),
    }
}

/// Delete one row by id; `NotFound` when nothing was removed
pub(crate) async fn delete_row(
    conn: &mut SqliteConnection,
    table: &'static str,
    id: i64,
    label: &str,
) -> tasty_core::Result<()> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", table))
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TastyError::not_found(format!("{} not found", label)));
    }
    Ok(())
}

/// Parse a `GROUP_CONCAT` id list
/// Map a unique-index violation to a conflict carrying `message`
pub(crate) fn unique_conflict(
    message: impl Into<String>,
) -> impl FnOnce(sqlx::Error) -> TastyError {
    let message = message.into();
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => TastyError::conflict(message),
        _ => e.into(),
    }
}

pub(crate) fn parse_id_list(ids: Option<String>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    ids.sort_unstable();
    ids
}
