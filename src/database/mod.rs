pub mod memory;
pub mod models;
pub mod mongo;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::filter::{Filter, FilterError, JsonDocument};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(#[from] FilterError),

    #[error("Document is not representable in storage: {0}")]
    Serialization(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// The four named collections the API reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Orders,
    Wishlist,
    Blog,
}

impl Collection {
    pub const ALL: [Collection; 4] = [Collection::Products, Collection::Orders, Collection::Wishlist, Collection::Blog];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Wishlist => "wishlist",
            Collection::Blog => "blog",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Single-operation access to the document collections.
///
/// Each method is one round trip to storage. Identifiers are generated by
/// the store; documents come back with `_id` as a hex string.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: Collection, filter: &Filter) -> DatabaseResult<Vec<JsonDocument>>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> DatabaseResult<Option<JsonDocument>>;

    async fn insert_one(&self, collection: Collection, document: JsonDocument) -> DatabaseResult<InsertOneResult>;

    /// `$set` the given fields on the first matching document.
    async fn update_one(&self, collection: Collection, filter: &Filter, fields: JsonDocument) -> DatabaseResult<UpdateResult>;

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> DatabaseResult<DeleteResult>;

    async fn health_check(&self) -> DatabaseResult<()>;

    /// Release connections. Called once after the server stops accepting requests.
    async fn close(&self) -> DatabaseResult<()> {
        Ok(())
    }
}
