//! Users and their items

use sqlx::SqliteConnection;
use tasty_core::{OwnedItem, OwnedItemCreate, Page, Result, TastyError, User};

use super::db::{ensure_exists, unique_conflict};

const USER_COLUMNS: &str = "SELECT id, email, is_active FROM users";
const ITEM_COLUMNS: &str = "SELECT id, title, description, owner_id FROM items";

const EMAIL_TAKEN: &str = "Email already registered";

pub async fn find_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE email = ?1", USER_COLUMNS))
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
    match user {
        Some(user) => Ok(Some(with_items(conn, user).await?)),
        None => Ok(None),
    }
}

pub async fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    hashed_password: &str,
) -> Result<User> {
    if find_user_by_email(conn, email).await?.is_some() {
        return Err(TastyError::conflict(EMAIL_TAKEN));
    }

    let id = insert_user(conn, email, hashed_password).await?;
    get_user(conn, id).await
}

/// The unique email index still guards a sign-up that raced past the lookup
async fn insert_user(
    conn: &mut SqliteConnection,
    email: &str,
    hashed_password: &str,
) -> Result<i64> {
    let done =
        sqlx::query("INSERT INTO users (email, hashed_password, is_active) VALUES (?1, ?2, 1)")
            .bind(email)
            .bind(hashed_password)
            .execute(&mut *conn)
            .await
            .map_err(unique_conflict(EMAIL_TAKEN))?;
    Ok(done.last_insert_rowid())
}

pub async fn get_user(conn: &mut SqliteConnection, id: i64) -> Result<User> {
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = ?1", USER_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| TastyError::not_found("User not found"))?;
    with_items(conn, user).await
}

pub async fn list_users(conn: &mut SqliteConnection, page: Page) -> Result<Vec<User>> {
    let sql = format!("{} ORDER BY id LIMIT ?1 OFFSET ?2", USER_COLUMNS);
    let users = sqlx::query_as::<_, User>(&sql)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&mut *conn)
        .await?;

    let mut out = Vec::with_capacity(users.len());
    for user in users {
        out.push(with_items(conn, user).await?);
    }
    Ok(out)
}

pub async fn create_user_item(
    conn: &mut SqliteConnection,
    user_id: i64,
    input: &OwnedItemCreate,
) -> Result<OwnedItem> {
    ensure_exists(conn, "users", user_id, "User").await?;

    let id = sqlx::query("INSERT INTO items (title, description, owner_id) VALUES (?1, ?2, ?3)")
        .bind(&input.title)
        .bind(&input.description)
        .bind(user_id)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    Ok(OwnedItem {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        owner_id: user_id,
    })
}

pub async fn list_items(conn: &mut SqliteConnection, page: Page) -> Result<Vec<OwnedItem>> {
    let sql = format!("{} ORDER BY id LIMIT ?1 OFFSET ?2", ITEM_COLUMNS);
    let items = sqlx::query_as::<_, OwnedItem>(&sql)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&mut *conn)
        .await?;
    Ok(items)
}

async fn with_items(conn: &mut SqliteConnection, mut user: User) -> Result<User> {
    let sql = format!("{} WHERE owner_id = ?1 ORDER BY id", ITEM_COLUMNS);
    user.items = sqlx::query_as::<_, OwnedItem>(&sql)
        .bind(user.id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn item(title: &str) -> OwnedItemCreate {
        OwnedItemCreate {
            title: title.to_string(),
            description: Some("desc".to_string()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let user = create_user(&mut conn, "a@x.io", "hash").await.unwrap();
        assert!(user.is_active);
        assert!(user.items.is_empty());

        let err = create_user(&mut conn, "a@x.io", "other").await.unwrap_err();
        assert!(matches!(err, TastyError::Conflict(msg) if msg == "Email already registered"));
    }

    #[tokio::test]
    async fn test_email_index_reports_domain_conflict() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        insert_user(&mut conn, "c@x.io", "hash").await.unwrap();
        let err = insert_user(&mut conn, "c@x.io", "hash").await.unwrap_err();
        assert!(matches!(err, TastyError::Conflict(msg) if msg == "Email already registered"));
    }

    #[tokio::test]
    async fn test_user_owns_created_items() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let user = create_user(&mut conn, "b@x.io", "hash").await.unwrap();
        let created = create_user_item(&mut conn, user.id, &item("pan")).await.unwrap();
        assert_eq!(created.owner_id, user.id);

        let fetched = get_user(&mut conn, user.id).await.unwrap();
        assert_eq!(fetched.items, vec![created.clone()]);
        assert_eq!(list_items(&mut conn, Page::default()).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_item_for_missing_user() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let err = create_user_item(&mut conn, 99, &item("pan")).await.unwrap_err();
        assert!(matches!(err, TastyError::NotFound(msg) if msg == "User not found"));
        assert!(matches!(get_user(&mut conn, 99).await, Err(TastyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_paged() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        for i in 0..3 {
            create_user(&mut conn, &format!("u{}@x.io", i), "hash").await.unwrap();
        }
        let users = list_users(&mut conn, Page::new(1, 1)).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "u1@x.io");
    }
}
