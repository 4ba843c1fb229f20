//! In-memory implementation of the content store for testing and development

use async_trait::async_trait;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::entity::Content;
use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::query::SortDirection;
use crate::core::store::{ContentStore, Filter, OrderedStore, SortKey};

/// In-memory content store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// the IndexMap keeps iteration deterministic in insertion order.
#[derive(Clone)]
pub struct InMemoryStore<T: Content> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Content> InMemoryStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T: Content> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two entities by a chain of sort keys.
///
/// A field the entity does not expose sorts as null, using the same
/// nulls-first total order the filter comparisons use.
fn compare_by_keys<T: Content>(a: &T, b: &T, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let left = a.field_value(&key.field).unwrap_or(FieldValue::Null);
        let right = b.field_value(&key.field).unwrap_or(FieldValue::Null);

        let mut ord = left.total_order(&right);
        if key.direction == SortDirection::Desc {
            ord = ord.reverse();
        }
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl<T: Content> OrderedStore<T> for InMemoryStore<T> {
    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortKey],
        limit: usize,
    ) -> Result<Vec<T>, StorageError> {
        let records = self.records.read().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;

        let mut matched: Vec<T> = records
            .values()
            .filter(|record| filter.matches(*record))
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare_by_keys(a, b, sort));
        matched.truncate(limit);

        Ok(matched)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, StorageError> {
        let records = self.records.read().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;

        Ok(records
            .values()
            .find(|record| filter.matches(*record))
            .cloned())
    }
}

#[async_trait]
impl<T: Content> ContentStore<T> for InMemoryStore<T> {
    async fn insert(&self, entity: T) -> Result<T, StorageError> {
        let mut records = self.records.write().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;

        records.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StorageError> {
        let records = self.records.read().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;

        Ok(records.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T, StorageError> {
        let mut records = self.records.write().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;

        if !records.contains_key(id) {
            return Err(StorageError::QueryFailed {
                message: format!("no record with id {}", id),
            });
        }

        records.insert(*id, entity.clone());

        Ok(entity)
    }

    async fn soft_delete(&self, id: &Uuid) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;

        if let Some(record) = records.get_mut(id) {
            record.mark_deleted();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::store::CmpOp;
    use crate::entities::Category;

    async fn seeded() -> InMemoryStore<Category> {
        let store = InMemoryStore::new();
        for name in ["algebra", "biology", "chemistry"] {
            store
                .insert(Category::new(name.to_string(), None))
                .await
                .unwrap();
        }
        store
    }

    #[test]
    fn test_compare_by_keys_orders_and_reverses() {
        let a = Category::new("algebra".to_string(), None);
        let b = Category::new("biology".to_string(), None);

        let asc = vec![SortKey::new("name", SortDirection::Asc)];
        assert_eq!(compare_by_keys(&a, &b, &asc), Ordering::Less);

        let desc = vec![SortKey::new("name", SortDirection::Desc)];
        assert_eq!(compare_by_keys(&a, &b, &desc), Ordering::Greater);
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryStore::new();
        let category = Category::new("geometry".to_string(), None);

        store.insert(category.clone()).await.unwrap();

        let retrieved = store.get(&category.id).await.unwrap();
        assert_eq!(retrieved.unwrap().id, category.id);

        let missing = store.get(&Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_filters_sorts_and_limits() {
        let store = seeded().await;

        let all = store
            .find(
                &Filter::And(vec![]),
                &[SortKey::new("name", SortDirection::Asc)],
                10,
            )
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "algebra");
        assert_eq!(all[2].name, "chemistry");

        let bounded = store
            .find(
                &Filter::cmp("name", CmpOp::Gt, "algebra"),
                &[SortKey::new("name", SortDirection::Asc)],
                1,
            )
            .await
            .unwrap();
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].name, "biology");
    }

    #[tokio::test]
    async fn test_find_one() {
        let store = seeded().await;

        let hit = store
            .find_one(&Filter::eq("name", "biology"))
            .await
            .unwrap();
        assert!(hit.is_some());

        let miss = store.find_one(&Filter::eq("name", "geology")).await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_and_rejects_missing() {
        let store = InMemoryStore::new();
        let mut category = Category::new("geo".to_string(), None);
        store.insert(category.clone()).await.unwrap();

        category.name = "geography".to_string();
        category.touch();
        let updated = store.update(&category.id, category.clone()).await.unwrap();
        assert_eq!(updated.name, "geography");

        let missing = store.update(&Uuid::new_v4(), category).await;
        assert!(matches!(missing, Err(StorageError::QueryFailed { .. })));
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_record_but_marks_it() {
        let store = seeded().await;

        let target = store
            .find_one(&Filter::eq("name", "biology"))
            .await
            .unwrap()
            .unwrap();

        store.soft_delete(&target.id).await.unwrap();

        // Still fetchable by id, but stamped
        let record = store.get(&target.id).await.unwrap().unwrap();
        assert!(record.is_deleted());

        // And invisible to reads that exclude deleted rows
        let visible = store
            .find_one(&Filter::all(vec![
                Filter::eq("name", "biology"),
                Filter::is_null("deleted_at"),
            ]))
            .await
            .unwrap();
        assert!(visible.is_none());
    }
}
