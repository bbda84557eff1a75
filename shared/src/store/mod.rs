pub mod attributes;
pub mod dynamo;
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::Item;

pub use dynamo::DynamoStudentStore;
pub use memory::MemoryStudentStore;

/// Partition key of the student table
pub const STUDENT_ID: &str = "studentid";

/// Keyed record store behind the student endpoints
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Every record in the table
    async fn scan_all(&self) -> Result<Vec<Item>, StoreError>;

    async fn get_item(&self, student_id: &str) -> Result<Option<Item>, StoreError>;

    /// Insert or overwrite by `studentid`
    async fn put_item(&self, item: &Item) -> Result<(), StoreError>;

    /// Set `attributes` on the record with this id, creating it if absent
    async fn update_attributes(&self, student_id: &str, attributes: &Item) -> Result<(), StoreError>;

    /// Deleting an id that does not exist is not an error
    async fn delete_item(&self, student_id: &str) -> Result<(), StoreError>;
}

/// DynamoDB rejects an empty string as a key value
pub(crate) fn check_key(student_id: &str) -> Result<(), StoreError> {
    if student_id.is_empty() {
        return Err(StoreError::InvalidKey(format!("{} must not be empty", STUDENT_ID)));
    }
    Ok(())
}

/// The string `studentid` of an item about to be written
pub(crate) fn item_key(item: &Item) -> Result<&str, StoreError> {
    match item.get(STUDENT_ID) {
        Some(serde_json::Value::String(id)) => {
            check_key(id)?;
            Ok(id)
        }
        Some(other) => Err(StoreError::InvalidKey(format!(
            "{} must be a string, got {}",
            STUDENT_ID, other
        ))),
        None => Err(StoreError::InvalidKey(format!("{} is missing", STUDENT_ID))),
    }
}
