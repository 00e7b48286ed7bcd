use async_trait::async_trait;
use futures::TryStreamExt;
use handoff_common::DirectoryConfig;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{DirectoryError, Result};
use crate::{CollectionRef, Connector, DocumentStore};

/// Connects with a connection string. The string may carry credentials and
/// is never logged.
pub struct MongoConnector {
    uri: String,
}

impl MongoConnector {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
        Ok(Self::new(config.connection_string()?))
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Store = MongoStore;

    async fn connect(&self) -> Result<MongoStore> {
        let client = Client::with_uri_str(&self.uri).await?;

        // The driver connects lazily; ping so an unreachable server fails here.
        if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(DirectoryError::Connection(e.to_string()));
        }

        Ok(MongoStore { client })
    }
}

pub struct MongoStore {
    client: Client,
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(&self, target: &CollectionRef) -> Result<Vec<Value>> {
        let collection = self
            .client
            .database(&target.database)
            .collection::<Document>(&target.collection);

        let docs: Vec<Document> = collection.find(doc! {}).await?.try_collect().await?;
        debug!(collection = %target, count = docs.len(), "Cursor drained");

        Ok(docs
            .into_iter()
            .map(|d| Bson::Document(d).into_relaxed_extjson())
            .collect())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        Ok(self.client.list_database_names().await?)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        debug!("Directory connection closed");
    }
}
