//! Lookup tables: cuisine types, categories, regions, tags, social channels

use sqlx::SqliteConnection;
use tasty_core::{
    CategoryInput, CommonQuery, CuisineType, CuisineTypeInput, Region, RegionInput,
    RestaurantCategory, Result, SocialChannel, SocialChannelInput, Tag, TagInput, TastyError,
};

use super::db::{delete_row, ensure_exists, unique_conflict};

pub async fn list_cuisine_types(
    conn: &mut SqliteConnection,
    query: &CommonQuery,
) -> Result<Vec<CuisineType>> {
    let rows = sqlx::query_as::<_, CuisineType>(
        "SELECT id, name FROM cuisine_types WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\\') \
         ORDER BY id LIMIT ?2 OFFSET ?3",
    )
    .bind(query.like_pattern())
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn create_cuisine_type(
    conn: &mut SqliteConnection,
    input: &CuisineTypeInput,
) -> Result<CuisineType> {
    let id = sqlx::query("INSERT INTO cuisine_types (name) VALUES (?1)")
        .bind(&input.name)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    Ok(CuisineType {
        id,
        name: input.name.clone(),
    })
}

/// Categories of the cuisine type go with it
pub async fn delete_cuisine_type(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "cuisine_types", id, "Cuisine type").await
}

pub async fn list_categories(
    conn: &mut SqliteConnection,
    query: &CommonQuery,
) -> Result<Vec<RestaurantCategory>> {
    let rows = sqlx::query_as::<_, RestaurantCategory>(
        "SELECT id, name, cuisine_type_id FROM restaurant_categories \
         WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\\') ORDER BY id LIMIT ?2 OFFSET ?3",
    )
    .bind(query.like_pattern())
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn get_category(conn: &mut SqliteConnection, id: i64) -> Result<RestaurantCategory> {
    sqlx::query_as::<_, RestaurantCategory>(
        "SELECT id, name, cuisine_type_id FROM restaurant_categories WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| TastyError::not_found("Category not found"))
}

pub async fn create_category(
    conn: &mut SqliteConnection,
    input: &CategoryInput,
) -> Result<RestaurantCategory> {
    if let Some(cuisine_type_id) = input.cuisine_type_id {
        ensure_exists(conn, "cuisine_types", cuisine_type_id, "Cuisine type").await?;
    }

    let id =
        sqlx::query("INSERT INTO restaurant_categories (name, cuisine_type_id) VALUES (?1, ?2)")
            .bind(&input.name)
            .bind(input.cuisine_type_id)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();
    Ok(RestaurantCategory {
        id,
        name: input.name.clone(),
        cuisine_type_id: input.cuisine_type_id,
    })
}

/// Restaurants in the category keep existing with no category
pub async fn delete_category(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "restaurant_categories", id, "Category").await
}

pub async fn list_regions(conn: &mut SqliteConnection, query: &CommonQuery) -> Result<Vec<Region>> {
    let rows = sqlx::query_as::<_, Region>(
        "SELECT id, sido, sigungu, eupmyeondong FROM regions \
         WHERE (?1 IS NULL OR sido LIKE ?1 ESCAPE '\\' OR sigungu LIKE ?1 ESCAPE '\\' \
         OR eupmyeondong LIKE ?1 ESCAPE '\\') \
         ORDER BY id LIMIT ?2 OFFSET ?3",
    )
    .bind(query.like_pattern())
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn get_region(conn: &mut SqliteConnection, id: i64) -> Result<Region> {
    sqlx::query_as::<_, Region>("SELECT id, sido, sigungu, eupmyeondong FROM regions WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| TastyError::not_found("Region not found"))
}

pub async fn create_region(conn: &mut SqliteConnection, input: &RegionInput) -> Result<Region> {
    let id = sqlx::query(
        "INSERT INTO regions (sido, sigungu, eupmyeondong) VALUES (?1, ?2, ?3)",
    )
    .bind(&input.sido)
    .bind(&input.sigungu)
    .bind(&input.eupmyeondong)
    .execute(&mut *conn)
    .await
    .map_err(unique_conflict("Region already exists"))?
    .last_insert_rowid();

    Ok(Region {
        id,
        sido: input.sido.clone(),
        sigungu: input.sigungu.clone(),
        eupmyeondong: input.eupmyeondong.clone(),
    })
}

pub async fn delete_region(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "regions", id, "Region").await
}

pub async fn list_tags(conn: &mut SqliteConnection, query: &CommonQuery) -> Result<Vec<Tag>> {
    let rows = sqlx::query_as::<_, Tag>(
        "SELECT id, name FROM tags WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\\') \
         ORDER BY id LIMIT ?2 OFFSET ?3",
    )
    .bind(query.like_pattern())
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Tags with the given ids, ordered by id
pub async fn tags_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> Result<Vec<Tag>> {
    let mut tags = Vec::with_capacity(ids.len());
    for id in ids {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        tags.extend(tag);
    }
    tags.sort_by_key(|t| t.id);
    Ok(tags)
}

pub async fn create_tag(conn: &mut SqliteConnection, input: &TagInput) -> Result<Tag> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM tags WHERE name = ?1")
        .bind(&input.name)
        .fetch_optional(&mut *conn)
        .await?;
    if existing.is_some() {
        return Err(TastyError::conflict(tag_taken(&input.name)));
    }
    insert_tag(conn, &input.name).await
}

async fn insert_tag(conn: &mut SqliteConnection, name: &str) -> Result<Tag> {
    let id = sqlx::query("INSERT INTO tags (name) VALUES (?1)")
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(unique_conflict(tag_taken(name)))?
        .last_insert_rowid();
    Ok(Tag {
        id,
        name: name.to_string(),
    })
}

fn tag_taken(name: &str) -> String {
    format!("Tag '{}' already exists", name)
}

/// Removes the tag from every restaurant that carried it
pub async fn delete_tag(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "tags", id, "Tag").await
}

pub async fn list_social_channels(
    conn: &mut SqliteConnection,
    query: &CommonQuery,
) -> Result<Vec<SocialChannel>> {
    let rows = sqlx::query_as::<_, SocialChannel>(
        "SELECT id, name FROM social_channels WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\\') \
         ORDER BY id LIMIT ?2 OFFSET ?3",
    )
    .bind(query.like_pattern())
    .bind(query.page.sql_limit())
    .bind(query.page.sql_offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn create_social_channel(
    conn: &mut SqliteConnection,
    input: &SocialChannelInput,
) -> Result<SocialChannel> {
    let id = sqlx::query("INSERT INTO social_channels (name) VALUES (?1)")
        .bind(&input.name)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
    Ok(SocialChannel {
        id,
        name: input.name.clone(),
    })
}

/// Reviews from the channel keep existing with no channel
pub async fn delete_social_channel(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    delete_row(conn, "social_channels", id, "Social channel").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use tasty_core::pagination::CommonParams;

    fn query(q: Option<&str>) -> CommonQuery {
        CommonQuery::from_params(
            CommonParams {
                q: q.map(str::to_string),
                ..Default::default()
            },
            100,
        )
        .unwrap()
    }

    fn tag(name: &str) -> TagInput {
        TagInput {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_tag_names() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        create_tag(&mut conn, &tag("분식")).await.unwrap();
        let err = create_tag(&mut conn, &tag("분식")).await.unwrap_err();
        assert!(matches!(err, TastyError::Conflict(msg) if msg == "Tag '분식' already exists"));
    }

    #[tokio::test]
    async fn test_tag_index_reports_domain_conflict() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        insert_tag(&mut conn, "야식").await.unwrap();
        let err = insert_tag(&mut conn, "야식").await.unwrap_err();
        assert!(matches!(err, TastyError::Conflict(msg) if msg == "Tag '야식' already exists"));
    }

    #[tokio::test]
    async fn test_list_filters_by_substring() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        for name in ["가성비", "혼밥", "가성비맛집"] {
            create_tag(&mut conn, &tag(name)).await.unwrap();
        }
        let found = list_tags(&mut conn, &query(Some("가성비"))).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(list_tags(&mut conn, &query(None)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_wildcards_in_q_match_literally() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        for name in ["100%국산", "반값_할인", "혼밥"] {
            create_tag(&mut conn, &tag(name)).await.unwrap();
        }
        let percent = list_tags(&mut conn, &query(Some("%"))).await.unwrap();
        assert_eq!(percent.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["100%국산"]);

        let underscore = list_tags(&mut conn, &query(Some("_"))).await.unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "반값_할인");
    }

    #[tokio::test]
    async fn test_region_triple_is_unique() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let input = RegionInput {
            sido: "서울특별시".to_string(),
            sigungu: "강남구".to_string(),
            eupmyeondong: "역삼동".to_string(),
        };
        create_region(&mut conn, &input).await.unwrap();
        let err = create_region(&mut conn, &input).await.unwrap_err();
        assert!(matches!(err, TastyError::Conflict(msg) if msg == "Region already exists"));
    }

    #[tokio::test]
    async fn test_cuisine_delete_cascades_to_categories() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let cuisine = create_cuisine_type(&mut conn, &CuisineTypeInput { name: "한식".into() })
            .await
            .unwrap();
        let category = create_category(
            &mut conn,
            &CategoryInput {
                name: "분식".into(),
                cuisine_type_id: Some(cuisine.id),
            },
        )
        .await
        .unwrap();

        delete_cuisine_type(&mut conn, cuisine.id).await.unwrap();
        assert!(matches!(
            get_category(&mut conn, category.id).await,
            Err(TastyError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_category_requires_known_cuisine() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let err = create_category(
            &mut conn,
            &CategoryInput {
                name: "분식".into(),
                cuisine_type_id: Some(7),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TastyError::NotFound(msg) if msg == "Cuisine type not found"));
    }
}
