use serde_json::Value;

use crate::error::ApiError;
use crate::store::{StudentStore, STUDENT_ID};
use crate::types::{Item, RequestDescriptor, StudentCreated, StudentDeleted, StudentUpdated};

/// Checked in this order on create; the first one missing is reported
pub const CREATE_REQUIRED_FIELDS: [&str; 5] = [STUDENT_ID, "fname", "lname", "contact", "email"];

/// Checked in this order on update; the id comes from the query string instead
pub const UPDATE_REQUIRED_FIELDS: [&str; 4] = ["fname", "lname", "contact", "email"];

/// List every student in the table
pub async fn list_students(store: &dyn StudentStore) -> Result<Value, ApiError> {
    let students = store.scan_all().await?;
    Ok(Value::Array(students.into_iter().map(Value::Object).collect()))
}

/// Get one student by id
pub async fn get_student(store: &dyn StudentStore, student_id: &str) -> Result<Value, ApiError> {
    match store.get_item(student_id).await? {
        Some(student) => Ok(Value::Object(student)),
        None => Err(ApiError::NotFound("Student not found".to_string())),
    }
}

/// Create a student from the request body.
/// An existing record with the same `studentid` is replaced.
pub async fn create_student(
    store: &dyn StudentStore,
    request: &RequestDescriptor,
) -> Result<Value, ApiError> {
    let data = request.json_body()?;
    require_fields(&data, &CREATE_REQUIRED_FIELDS)?;

    store.put_item(&data).await?;
    tracing::info!("Student created: {}", data[STUDENT_ID]);

    Ok(serde_json::to_value(StudentCreated {
        message: "Student field created successfully",
        student: &data,
    })?)
}

/// Overwrite the four profile fields of the student named by `?studentid=`
pub async fn update_student(
    store: &dyn StudentStore,
    request: &RequestDescriptor,
) -> Result<Value, ApiError> {
    let student_id = request.query_param(STUDENT_ID)?;
    let data = request.json_body()?;
    require_fields(&data, &UPDATE_REQUIRED_FIELDS)?;

    let attributes: Item = UPDATE_REQUIRED_FIELDS
        .iter()
        .map(|field| (field.to_string(), data[*field].clone()))
        .collect();
    store.update_attributes(student_id, &attributes).await?;
    tracing::info!("Student updated: {}", student_id);

    Ok(serde_json::to_value(StudentUpdated {
        message: "Student updated successfully",
        studentid: student_id,
        updated_fields: &data,
    })?)
}

/// Delete the student named by `?studentid=`
pub async fn delete_student(
    store: &dyn StudentStore,
    request: &RequestDescriptor,
) -> Result<Value, ApiError> {
    let student_id = request.query_param(STUDENT_ID)?;

    store.delete_item(student_id).await?;
    tracing::info!("Student deleted: {}", student_id);

    Ok(serde_json::to_value(StudentDeleted {
        message: "Student deleted successfully",
        studentid: student_id,
    })?)
}

// Presence only: a field holding null still counts
fn require_fields(data: &Item, fields: &[&str]) -> Result<(), ApiError> {
    match fields.iter().find(|field| !data.contains_key(**field)) {
        Some(field) => Err(ApiError::BadRequest(format!(
            "Missing required field: {}",
            field
        ))),
        None => Ok(()),
    }
}
