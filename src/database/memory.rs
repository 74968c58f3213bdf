use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, DatabaseResult, DeleteResult, DocumentStore, InsertOneResult, UpdateResult};
use crate::filter::{Filter, JsonDocument, ID_FIELD};

/// In-memory store with MongoDB semantics, for tests and database-less runs.
///
/// Documents keep insertion order, which is what "unordered" listings return.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<JsonDocument>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> DatabaseResult<Vec<JsonDocument>> {
        let collections = self.collections.read().await;
        let documents = collections.get(&collection).map(Vec::as_slice).unwrap_or_default();
        Ok(filter.apply(documents)?)
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> DatabaseResult<Option<JsonDocument>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(&collection) else {
            return Ok(None);
        };

        for document in documents {
            if filter.matches(document)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn insert_one(&self, collection: Collection, mut document: JsonDocument) -> DatabaseResult<InsertOneResult> {
        let id = ObjectId::new().to_hex();

        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(&self, collection: Collection, filter: &Filter, fields: JsonDocument) -> DatabaseResult<UpdateResult> {
        let mut collections = self.collections.write().await;
        let mut result = UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        };

        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(result);
        };

        let mut target = None;
        for (index, document) in documents.iter().enumerate() {
            if filter.matches(document)? {
                target = Some(index);
                break;
            }
        }
        let Some(index) = target else {
            return Ok(result);
        };

        result.matched_count = 1;
        let document = &mut documents[index];
        for (key, value) in fields {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                result.modified_count = 1;
            }
        }

        Ok(result)
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> DatabaseResult<DeleteResult> {
        let mut collections = self.collections.write().await;
        let mut deleted_count = 0;

        if let Some(documents) = collections.get_mut(&collection) {
            let mut position = None;
            for (index, document) in documents.iter().enumerate() {
                if filter.matches(document)? {
                    position = Some(index);
                    break;
                }
            }
            if let Some(index) = position {
                documents.remove(index);
                deleted_count = 1;
            }
        }

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        Ok(())
    }
}
