use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DirectoryError, Result};
use crate::{CollectionRef, Connector, DocumentStore};

type Databases = BTreeMap<String, BTreeMap<String, Vec<Value>>>;

/// In-process stand-in for a document database. Counts connects and closes.
#[derive(Default, Clone)]
pub struct InMemoryConnector {
    databases: Arc<Databases>,
    refuse_connections: bool,
    fail_reads: bool,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, target: &CollectionRef, docs: Vec<Value>) -> Self {
        Arc::make_mut(&mut self.databases)
            .entry(target.database.clone())
            .or_default()
            .insert(target.collection.clone(), docs);
        self
    }

    pub fn refusing_connections(mut self) -> Self {
        self.refuse_connections = true;
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for InMemoryConnector {
    type Store = InMemoryStore;

    async fn connect(&self) -> Result<InMemoryStore> {
        if self.refuse_connections {
            return Err(DirectoryError::Connection("connection refused".into()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryStore {
            databases: self.databases.clone(),
            fail_reads: self.fail_reads,
            closed: self.closed.clone(),
        })
    }
}

pub struct InMemoryStore {
    databases: Arc<Databases>,
    fail_reads: bool,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_all(&self, target: &CollectionRef) -> Result<Vec<Value>> {
        if self.fail_reads {
            return Err(DirectoryError::Driver("read failed".into()));
        }
        // Like a real store, an unknown collection reads as empty.
        Ok(self
            .databases
            .get(&target.database)
            .and_then(|db| db.get(&target.collection))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        Ok(self.databases.keys().cloned().collect())
    }

    async fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
