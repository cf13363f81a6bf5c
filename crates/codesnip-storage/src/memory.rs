use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::model::CodeSnippetModel;
use crate::store::{SnippetFilter, SnippetPatch, SnippetStore, UpdateCounts};

/// In-process [`SnippetStore`]. Keeps documents in insertion order and
/// mirrors the MongoDB counting rules for update and delete.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<CodeSnippetModel>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.lock().await.is_empty()
    }
}

#[async_trait]
impl SnippetStore for MemoryStore {
    async fn insert_one(&self, doc: CodeSnippetModel) -> Result<ObjectId, StorageError> {
        let mut docs = self.docs.lock().await;
        if docs.iter().any(|d| d.id == doc.id) {
            return Err(StorageError::Insert(format!(
                "duplicate key: _id {}",
                doc.id.to_hex()
            )));
        }
        let id = doc.id;
        docs.push(doc);
        Ok(id)
    }

    async fn find_one(
        &self,
        filter: &SnippetFilter,
    ) -> Result<Option<CodeSnippetModel>, StorageError> {
        let docs = self.docs.lock().await;
        Ok(docs.iter().find(|d| filter.matches(d)).cloned())
    }

    async fn find_many(
        &self,
        filter: &SnippetFilter,
    ) -> Result<Vec<CodeSnippetModel>, StorageError> {
        let docs = self.docs.lock().await;
        Ok(docs.iter().filter(|d| filter.matches(d)).cloned().collect())
    }

    async fn update_one(
        &self,
        filter: &SnippetFilter,
        patch: &SnippetPatch,
    ) -> Result<UpdateCounts, StorageError> {
        let mut docs = self.docs.lock().await;
        let Some(doc) = docs.iter_mut().find(|d| filter.matches(d)) else {
            return Ok(UpdateCounts::default());
        };

        // Writing identical values is a match without a modification.
        let modified = doc.name != patch.name || doc.code != patch.code;
        doc.name.clone_from(&patch.name);
        doc.code.clone_from(&patch.code);

        Ok(UpdateCounts {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, filter: &SnippetFilter) -> Result<u64, StorageError> {
        let mut docs = self.docs.lock().await;
        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
