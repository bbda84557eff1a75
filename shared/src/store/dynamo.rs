use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoClient};

use super::attributes::{from_attribute_map, to_attribute, to_attribute_map};
use super::{check_key, item_key, StudentStore, STUDENT_ID};
use crate::error::StoreError;
use crate::types::Item;

/// Student table in DynamoDB, keyed by the string partition key `studentid`
pub struct DynamoStudentStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoStudentStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl StudentStore for DynamoStudentStore {
    async fn scan_all(&self) -> Result<Vec<Item>, StoreError> {
        let mut pages = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send();

        let mut items = Vec::new();
        while let Some(item) = pages.try_next().await? {
            items.push(from_attribute_map(&item)?);
        }

        tracing::debug!("Scanned {} students from {}", items.len(), self.table_name);
        Ok(items)
    }

    async fn get_item(&self, student_id: &str) -> Result<Option<Item>, StoreError> {
        check_key(student_id)?;
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(STUDENT_ID, AttributeValue::S(student_id.to_string()))
            .send()
            .await?;

        result.item().map(from_attribute_map).transpose()
    }

    async fn put_item(&self, item: &Item) -> Result<(), StoreError> {
        item_key(item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_attribute_map(item)))
            .send()
            .await?;

        Ok(())
    }

    async fn update_attributes(&self, student_id: &str, attributes: &Item) -> Result<(), StoreError> {
        check_key(student_id)?;
        let update = UpdateExpression::set(attributes);
        if update.is_empty() {
            return Ok(());
        }

        let mut builder = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(STUDENT_ID, AttributeValue::S(student_id.to_string()))
            .update_expression(update.expression);

        for (k, v) in update.names {
            builder = builder.expression_attribute_names(k, v);
        }

        for (k, v) in update.values {
            builder = builder.expression_attribute_values(k, v);
        }

        builder.send().await?;
        Ok(())
    }

    async fn delete_item(&self, student_id: &str) -> Result<(), StoreError> {
        check_key(student_id)?;
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(STUDENT_ID, AttributeValue::S(student_id.to_string()))
            .send()
            .await?;

        Ok(())
    }
}

/// `SET` expression with placeholder names and values for each attribute
#[derive(Debug)]
struct UpdateExpression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    fn set(attributes: &Item) -> Self {
        let mut clauses = vec![];
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        for (i, (name, value)) in attributes.iter().enumerate() {
            let name_ref = format!("#a{}", i);
            let value_ref = format!(":v{}", i);
            clauses.push(format!("{} = {}", name_ref, value_ref));
            names.insert(name_ref, name.clone());
            values.insert(value_ref, to_attribute(value));
        }

        let expression = if clauses.is_empty() {
            String::new()
        } else {
            format!("SET {}", clauses.join(", "))
        };

        Self {
            expression,
            names,
            values,
        }
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
