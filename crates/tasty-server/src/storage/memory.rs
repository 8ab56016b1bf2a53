//! In-memory stores owned by the application state
//!
//! Each store is created per `AppState`, so tests get isolated instances.

use async_trait::async_trait;
use chrono::NaiveTime;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use tasty_core::pagination::Page;
use tasty_core::ports::ItemRepository;
use tasty_core::{Item, RestaurantSummary, Result, StockItem, TastyError};
use tokio::sync::RwLock;

/// Positional item list behind `/items/`
pub struct MemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-based index for a 1-based position
fn index_of(position: i64, len: usize) -> Result<usize> {
    match usize::try_from(position) {
        Ok(p) if p >= 1 && p <= len => Ok(p - 1),
        _ => Err(TastyError::not_found("Item not found")),
    }
}

#[async_trait]
impl ItemRepository for MemoryItemStore {
    async fn list(&self, page: Page) -> Vec<Item> {
        let items = self.items.read().await;
        page.slice(&items).to_vec()
    }

    async fn create(&self, item: Item) -> Item {
        self.items.write().await.push(item.clone());
        item
    }

    async fn get(&self, position: i64) -> Result<Item> {
        let items = self.items.read().await;
        let index = index_of(position, items.len())?;
        Ok(items[index].clone())
    }

    async fn replace(&self, position: i64, item: Item) -> Result<Item> {
        let mut items = self.items.write().await;
        let index = index_of(position, items.len())?;
        items[index] = item.clone();
        Ok(item)
    }

    async fn remove(&self, position: i64) -> Result<Item> {
        let mut items = self.items.write().await;
        let index = index_of(position, items.len())?;
        Ok(items.remove(index))
    }

    async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

/// Outcome of an inventory upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Keyed inventory behind `/inventory/{item_id}`
pub struct Inventory {
    items: DashMap<String, StockItem>,
}

impl Inventory {
    pub fn seeded() -> Self {
        let items = DashMap::new();
        items.insert(
            "foo".to_string(),
            StockItem {
                name: "Fighters".to_string(),
                size: 6,
            },
        );
        Self { items }
    }

    pub fn get(&self, item_id: &str) -> Option<StockItem> {
        self.items.get(item_id).map(|entry| entry.value().clone())
    }

    pub fn upsert(&self, item_id: &str, item: StockItem) -> Upsert {
        match self.items.entry(item_id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(item);
                Upsert::Updated
            }
            Entry::Vacant(entry) => {
                entry.insert(item);
                Upsert::Created
            }
        }
    }
}

/// Read-only fruit descriptions behind `/fruits/{name}`
pub struct FruitShelf {
    fruits: HashMap<String, String>,
}

impl FruitShelf {
    pub fn seeded() -> Self {
        let fruits = [
            ("apple", "This is an apple"),
            ("banana", "This is a banana"),
            ("grape", "This is a grape"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { fruits }
    }

    pub fn describe(&self, name: &str) -> Option<&str> {
        self.fruits.get(name).map(String::as_str)
    }
}

/// Signed-up account
#[derive(Debug, Clone)]
pub struct Member {
    pub username: String,
    /// Argon2 PHC string. Sign-up only stores it; no route verifies passwords.
    #[allow(dead_code)]
    pub hashed_password: String,
}

/// Accounts created through `/signup`, keyed by username
pub struct MemberDirectory {
    members: DashMap<String, Member>,
}

impl MemberDirectory {
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.members.contains_key(username)
    }

    /// Insert unless the username is taken
    pub fn insert_new(&self, member: Member) -> Result<()> {
        match self.members.entry(member.username.clone()) {
            Entry::Occupied(_) => Err(TastyError::conflict("User already exists")),
            Entry::Vacant(entry) => {
                entry.insert(member);
                Ok(())
            }
        }
    }
}

impl Default for MemberDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Listing served by `/restaurants/`
pub fn seeded_restaurants() -> Vec<RestaurantSummary> {
    vec![
        RestaurantSummary {
            name: "김밥천국".to_string(),
            branch_name: "강남점".to_string(),
            description: "24시간 운영하는 분식 전문점".to_string(),
            address: "서울 강남구 테헤란로 123".to_string(),
            feature: "저렴한 가격, 빠른 제공".to_string(),
            is_closed: false,
            latitude: 37.501274,
            longitude: 127.039585,
            phone: "02-1234-5678".to_string(),
            rating: 4.2,
            rating_count: 120,
            start_time: hm(0, 0),
            end_time: hm(23, 59),
            last_order_time: hm(23, 30),
            category: 1,
            tags: vec!["분식".into(), "가성비".into(), "혼밥".into()],
        },
        RestaurantSummary {
            name: "한솥도시락".to_string(),
            branch_name: "역삼점".to_string(),
            description: "도시락 전문 프랜차이즈".to_string(),
            address: "서울 강남구 역삼로 45".to_string(),
            feature: "다양한 메뉴, 포장 전문".to_string(),
            is_closed: false,
            latitude: 37.499947,
            longitude: 127.036102,
            phone: "02-5678-1234".to_string(),
            rating: 4.0,
            rating_count: 98,
            start_time: hm(9, 0),
            end_time: hm(21, 0),
            last_order_time: hm(20, 45),
            category: 2,
            tags: vec!["도시락".into(), "배달".into(), "프랜차이즈".into()],
        },
        RestaurantSummary {
            name: "돈까스하우스".to_string(),
            branch_name: "선릉점".to_string(),
            description: "수제 돈까스를 판매하는 맛집".to_string(),
            address: "서울 강남구 선릉로 77".to_string(),
            feature: "바삭한 튀김, 일본식 정식".to_string(),
            is_closed: false,
            latitude: 37.504456,
            longitude: 127.048123,
            phone: "02-3333-4444".to_string(),
            rating: 4.7,
            rating_count: 250,
            start_time: hm(11, 0),
            end_time: hm(22, 0),
            last_order_time: hm(21, 30),
            category: 3,
            tags: vec!["돈까스".into(), "수제".into(), "일식".into()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            description: None,
            price: 1.5,
            tax: None,
        }
    }

    #[tokio::test]
    async fn test_positional_bounds() {
        let store = MemoryItemStore::new();
        store.create(item("a")).await;
        store.create(item("b")).await;

        assert_eq!(store.get(1).await.unwrap().name, "a");
        assert_eq!(store.get(2).await.unwrap().name, "b");
        assert!(matches!(store.get(0).await, Err(TastyError::NotFound(_))));
        assert!(matches!(store.get(3).await, Err(TastyError::NotFound(_))));
        assert!(matches!(store.get(-1).await, Err(TastyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_shifts_positions() {
        let store = MemoryItemStore::new();
        for name in ["a", "b", "c"] {
            store.create(item(name)).await;
        }

        let removed = store.remove(2).await.unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(2).await.unwrap().name, "c");
        assert!(store.get(3).await.is_err());
    }

    #[tokio::test]
    async fn test_replace_out_of_range_leaves_store() {
        let store = MemoryItemStore::new();
        store.create(item("a")).await;
        assert!(store.replace(2, item("z")).await.is_err());
        assert_eq!(store.list(Page::default()).await, vec![item("a")]);
    }

    #[test]
    fn test_inventory_upsert() {
        let inventory = Inventory::seeded();
        let item = StockItem {
            name: "Bar".to_string(),
            size: 3,
        };
        assert_eq!(inventory.upsert("foo", item.clone()), Upsert::Updated);
        assert_eq!(inventory.upsert("bar", item.clone()), Upsert::Created);
        assert_eq!(inventory.get("foo"), Some(item));
    }

    #[test]
    fn test_member_directory_rejects_duplicates() {
        let members = MemberDirectory::new();
        let member = Member {
            username: "kim".to_string(),
            hashed_password: "hash".to_string(),
        };
        members.insert_new(member.clone()).unwrap();
        assert!(matches!(
            members.insert_new(member),
            Err(TastyError::Conflict(_))
        ));
        assert!(members.contains("kim"));
    }
}
