//! Editorial articles

use chrono::Utc;
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tasty_core::{Article, ArticleInput, CommonQuery, Result, TastyError};

const ARTICLE_COLUMNS: &str = "SELECT id, title, preview_image, content, show_at_index, \
    is_published, created_at, modified_at FROM articles";

/// Optional flag filters for the article list
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ArticleFilter {
    pub show_at_index: Option<bool>,
    pub is_published: Option<bool>,
}

pub async fn list(
    conn: &mut SqliteConnection,
    query: &CommonQuery,
    filter: ArticleFilter,
) -> Result<Vec<Article>> {
    let articles = sqlx::query_as::<_, Article>(&format!(
        "{} WHERE (?1 IS NULL OR title LIKE ?1 ESCAPE '\\') \
         AND (?2 IS NULL OR show_at_index = ?2) \
         AND (?3 IS NULL OR is_published = ?3) \
         ORDER BY created_at DESC, id DESC LIMIT ?4 OFFSET ?5",
        ARTICLE_COLUMNS
    ))
    .bind(query.like_pattern())
    .bind(filter.show_at_index)
    .bind(filter.is_published)
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(articles)
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Article> {
    sqlx::query_as::<_, Article>(&format!("{} WHERE id = ?1", ARTICLE_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| TastyError::not_found("Article not found"))
}

pub async fn create(conn: &mut SqliteConnection, input: &ArticleInput) -> Result<Article> {
    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO articles (title, preview_image, content, show_at_index, is_published, \
         created_at, modified_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(&input.title)
    .bind(&input.preview_image)
    .bind(&input.content)
    .bind(input.show_at_index)
    .bind(input.is_published)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    get(conn, id).await
}

pub async fn update(conn: &mut SqliteConnection, id: i64, input: &ArticleInput) -> Result<Article> {
    let result = sqlx::query(
        "UPDATE articles SET title = ?1, preview_image = ?2, content = ?3, show_at_index = ?4, \
         is_published = ?5, modified_at = ?6 WHERE id = ?7",
    )
    .bind(&input.title)
    .bind(&input.preview_image)
    .bind(&input.content)
    .bind(input.show_at_index)
    .bind(input.is_published)
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(TastyError::not_found("Article not found"));
    }
    get(conn, id).await
}

/// Mark every listed article published. Unknown ids are skipped.
pub async fn publish(conn: &mut SqliteConnection, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("UPDATE articles SET is_published = 1, modified_at = ");
    builder.push_bind(Utc::now());
    builder.push(" WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = builder.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
