use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{check_key, item_key, StudentStore, STUDENT_ID};
use crate::error::StoreError;
use crate::types::Item;

/// In-process student table with the same write semantics as DynamoDB:
/// puts overwrite, updates upsert, deletes are idempotent and empty keys are rejected.
///
/// Scans return records ordered by `studentid`.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.read().values().cloned().collect())
    }

    async fn get_item(&self, student_id: &str) -> Result<Option<Item>, StoreError> {
        check_key(student_id)?;
        Ok(self.items.read().get(student_id).cloned())
    }

    async fn put_item(&self, item: &Item) -> Result<(), StoreError> {
        let key = item_key(item)?.to_string();
        self.items.write().insert(key, item.clone());
        Ok(())
    }

    async fn update_attributes(&self, student_id: &str, attributes: &Item) -> Result<(), StoreError> {
        check_key(student_id)?;
        let mut items = self.items.write();
        let record = items.entry(student_id.to_string()).or_insert_with(|| {
            let mut fresh = Item::new();
            fresh.insert(STUDENT_ID.to_string(), student_id.into());
            fresh
        });

        for (name, value) in attributes {
            record.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete_item(&self, student_id: &str) -> Result<(), StoreError> {
        check_key(student_id)?;
        self.items.write().remove(student_id);
        Ok(())
    }
}
