use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue as DynamoValue, Client};

use super::{CarStore, StoreError};
use crate::constants::{API_NAME, KEY_ATTRIBUTE};
use crate::models::{AttributeValue, Item};

#[derive(Clone)]
pub struct DynamoCarStore {
    client: Client,
    table_name: String,
}

impl DynamoCarStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl CarStore for DynamoCarStore {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(backend_error)?;

        // Single page only; follow-up pages are never requested.
        if output.last_evaluated_key.is_some() {
            tracing::warn!(
                "{} Scan of table '{}' was truncated by the backend page limit",
                API_NAME,
                self.table_name
            );
        }

        output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_from_dynamo)
            .collect()
    }

    async fn put(&self, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_dynamo(item)))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn update(&self, id: &str, attributes: Item) -> Result<(), StoreError> {
        let mut assignments = Vec::with_capacity(attributes.len());
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, DynamoValue::S(id.to_string()));

        for (index, (name, value)) in attributes
            .into_iter()
            .filter(|(name, _)| name != KEY_ATTRIBUTE)
            .enumerate()
        {
            let name_ref = format!("#a{}", index);
            let value_ref = format!(":v{}", index);
            assignments.push(format!("{} = {}", name_ref, value_ref));
            request = request
                .expression_attribute_names(name_ref, name)
                .expression_attribute_values(value_ref, to_dynamo(value));
        }

        if assignments.is_empty() {
            return Err(StoreError::Malformed(format!(
                "update of '{}' has no attributes to set",
                id
            )));
        }

        request
            .update_expression(format!("SET {}", assignments.join(", ")))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn delete_existing(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, DynamoValue::S(id.to_string()))
            .condition_expression(format!("attribute_exists({})", KEY_ATTRIBUTE))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Err(StoreError::condition_failed(id))
            }
            Err(err) => Err(backend_error(err)),
        }
    }
}

fn backend_error(err: impl std::error::Error) -> StoreError {
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

fn item_to_dynamo(item: Item) -> HashMap<String, DynamoValue> {
    item.into_iter().map(|(k, v)| (k, to_dynamo(v))).collect()
}

fn item_from_dynamo(item: HashMap<String, DynamoValue>) -> Result<Item, StoreError> {
    item.into_iter()
        .map(|(k, v)| from_dynamo(&k, v).map(|v| (k, v)))
        .collect()
}

fn to_dynamo(value: AttributeValue) -> DynamoValue {
    match value {
        AttributeValue::S(s) => DynamoValue::S(s),
        AttributeValue::N(n) => DynamoValue::N(n),
        AttributeValue::Bool(b) => DynamoValue::Bool(b),
        AttributeValue::Null => DynamoValue::Null(true),
        AttributeValue::L(items) => DynamoValue::L(items.into_iter().map(to_dynamo).collect()),
        AttributeValue::M(map) => {
            DynamoValue::M(map.into_iter().map(|(k, v)| (k, to_dynamo(v))).collect())
        }
    }
}

fn from_dynamo(name: &str, value: DynamoValue) -> Result<AttributeValue, StoreError> {
    match value {
        DynamoValue::S(s) => Ok(AttributeValue::S(s)),
        DynamoValue::N(n) => Ok(AttributeValue::N(n)),
        DynamoValue::Bool(b) => Ok(AttributeValue::Bool(b)),
        DynamoValue::Null(_) => Ok(AttributeValue::Null),
        DynamoValue::Ns(numbers) => Ok(AttributeValue::L(
            numbers.into_iter().map(AttributeValue::N).collect(),
        )),
        DynamoValue::Ss(strings) => Ok(AttributeValue::L(
            strings.into_iter().map(AttributeValue::S).collect(),
        )),
        DynamoValue::L(items) => items
            .into_iter()
            .map(|v| from_dynamo(name, v))
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::L),
        DynamoValue::M(map) => map
            .into_iter()
            .map(|(k, v)| from_dynamo(&k, v).map(|v| (k, v)))
            .collect::<Result<_, _>>()
            .map(AttributeValue::M),
        other => Err(StoreError::Malformed(format!(
            "attribute '{}' has unsupported type {:?}",
            name, other
        ))),
    }
}
