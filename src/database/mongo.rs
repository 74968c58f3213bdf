use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Client, Database,
};
use serde_json::Value;
use tracing::{debug, info};

use super::{
    Collection, DatabaseError, DatabaseResult, DeleteResult, DocumentStore, InsertOneResult, UpdateResult,
};
use crate::config::DatabaseConfig;
use crate::filter::{Filter, JsonDocument, ID_FIELD};

/// MongoDB-backed store; one client shared for the whole process.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let uri = config
            .connection_uri()
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;

        let client = Client::with_uri_str(&uri).await?;
        info!("Connected MongoDB client for database: {}", config.name);

        Ok(Self::new(client, &config.name))
    }

    pub fn new(client: Client, database_name: &str) -> Self {
        Self {
            db: client.database(database_name),
            client,
        }
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> DatabaseResult<Vec<JsonDocument>> {
        let query = filter.to_document();
        debug!("find {} {:?}", collection, query);

        let target = self.collection(collection);
        let mut action = target.find(query);
        if let Some(sort) = filter.sort_document() {
            action = action.sort(sort);
        }
        if let Some(limit) = filter.limit_value() {
            action = action.limit(limit);
        }

        let documents: Vec<Document> = action.await?.try_collect().await?;
        Ok(documents.into_iter().map(to_json_document).collect())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> DatabaseResult<Option<JsonDocument>> {
        let document = self.collection(collection).find_one(filter.to_document()).await?;
        Ok(document.map(to_json_document))
    }

    async fn insert_one(&self, collection: Collection, mut document: JsonDocument) -> DatabaseResult<InsertOneResult> {
        // Identifiers are always assigned by the server
        document.remove(ID_FIELD);

        let result = self.collection(collection).insert_one(to_bson_document(&document)?).await?;
        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id_to_string(result.inserted_id),
        })
    }

    async fn update_one(&self, collection: Collection, filter: &Filter, fields: JsonDocument) -> DatabaseResult<UpdateResult> {
        let update = doc! { "$set": to_bson_document(&fields)? };
        let result = self.collection(collection).update_one(filter.to_document(), update).await?;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(id_to_string),
            upserted_count: 0,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> DatabaseResult<DeleteResult> {
        let result = self.collection(collection).delete_one(filter.to_document()).await?;
        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> DatabaseResult<()> {
        self.client.clone().shutdown().await;
        info!("Closed MongoDB client");
        Ok(())
    }
}

fn to_bson_document(document: &JsonDocument) -> DatabaseResult<Document> {
    bson::to_document(document).map_err(|e| DatabaseError::Serialization(e.to_string()))
}

fn to_json_document(document: Document) -> JsonDocument {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Relaxed extended JSON, except ObjectIds render as plain hex strings.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => Value::Object(to_json_document(document)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn object_ids_render_as_hex_strings() {
        let oid = ObjectId::new();
        let nested = ObjectId::new();
        let document = doc! {
            "_id": oid,
            "name": "Foo Car",
            "price": 12.5,
            "quantity": 3_i64,
            "customer": { "ref": nested },
            "tags": ["a", "b"],
        };

        let json = Value::Object(to_json_document(document));
        assert_eq!(
            json,
            json!({
                "_id": oid.to_hex(),
                "name": "Foo Car",
                "price": 12.5,
                "quantity": 3,
                "customer": { "ref": nested.to_hex() },
                "tags": ["a", "b"],
            })
        );
    }

    #[test]
    fn json_documents_convert_to_bson() {
        let document = json!({ "name": "Bear", "price": 9.99, "quantity": 4, "customer": { "name": "Ann" } });
        let bson = to_bson_document(document.as_object().unwrap()).unwrap();

        assert_eq!(bson.get_str("name").unwrap(), "Bear");
        assert_eq!(bson.get_f64("price").unwrap(), 9.99);
        assert_eq!(bson.get_i64("quantity").unwrap(), 4);
        assert_eq!(bson.get_document("customer").unwrap().get_str("name").unwrap(), "Ann");
    }

    #[test]
    fn inserted_ids_stringify() {
        let oid = ObjectId::new();
        assert_eq!(id_to_string(Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_to_string(Bson::String("abc".into())), "abc");
    }
}
