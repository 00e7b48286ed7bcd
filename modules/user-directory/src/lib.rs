//! Connect, read one collection in full, always disconnect.

pub mod error;
pub mod memory;
pub mod mongo;

pub use error::{DirectoryError, Result};
pub use memory::InMemoryConnector;
pub use mongo::{MongoConnector, MongoStore};

use std::fmt;

use async_trait::async_trait;
use handoff_common::{DirectoryConfig, Messages, Notifier, Outcome, Submitter};
use serde_json::Value;
use tracing::info;

/// A named collection inside a named database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    pub database: String,
    pub collection: String,
}

impl CollectionRef {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(&config.database, &config.collection)
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// An open connection to the document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, no filter, in store order.
    async fn find_all(&self, target: &CollectionRef) -> Result<Vec<Value>>;

    async fn list_databases(&self) -> Result<Vec<String>>;

    /// Release the connection. Called exactly once per successful connect.
    async fn close(&self);
}

#[async_trait]
pub trait Connector: Send + Sync {
    type Store: DocumentStore;

    async fn connect(&self) -> Result<Self::Store>;
}

/// Connect, read every document of `target`, close. The connection is
/// released whether or not the read succeeded.
pub async fn read_collection<C: Connector>(connector: &C, target: &CollectionRef) -> Result<Vec<Value>> {
    info!("Connecting");
    let store = connector.connect().await?;
    info!("Connected");

    let result = store.find_all(target).await;
    store.close().await;

    if let Ok(docs) = &result {
        info!(collection = %target, count = docs.len(), "Read collection");
    }
    result
}

/// Connect, list database names, close.
pub async fn list_databases<C: Connector>(connector: &C) -> Result<Vec<String>> {
    let store = connector.connect().await?;
    let result = store.list_databases().await;
    store.close().await;
    result
}

pub const SUCCESS_MESSAGE: &str = "Retrieved users.";
pub const FAILURE_MESSAGE: &str = "Failed to retrieve users.";

/// The read-only submit-and-confirm action: a static query, one exchange.
pub struct DirectoryLookup<C, N> {
    connector: C,
    target: CollectionRef,
    submitter: Submitter<N>,
}

impl<C: Connector, N: Notifier> DirectoryLookup<C, N> {
    pub fn new(connector: C, target: CollectionRef, notifier: N) -> Self {
        Self {
            connector,
            target,
            submitter: Submitter::new(notifier, Messages::new(SUCCESS_MESSAGE, FAILURE_MESSAGE)),
        }
    }

    pub fn submitter(&self) -> &Submitter<N> {
        &self.submitter
    }

    pub async fn run(&mut self) -> Outcome<Vec<Value>> {
        self.submitter
            .submit("retrieve_users", read_collection(&self.connector, &self.target))
            .await
    }
}
