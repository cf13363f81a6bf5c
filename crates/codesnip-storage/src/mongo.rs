use async_trait::async_trait;
use codesnip_core::collection;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};

use crate::error::StorageError;
use crate::model::CodeSnippetModel;
use crate::store::{SnippetFilter, SnippetPatch, SnippetStore, UpdateCounts};

/// [`SnippetStore`] backed by a MongoDB collection.
///
/// The driver client pools connections internally, so one `MongoStore` is
/// shared across all requests.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
    snippets: Collection<CodeSnippetModel>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::Connect(e.to_string()))?;
        let database = client.database(database);
        let snippets = database.collection::<CodeSnippetModel>(collection::SNIPPETS);

        tracing::info!(
            database = database.name(),
            collection = collection::SNIPPETS,
            "document store client ready"
        );

        Ok(Self {
            client,
            database,
            snippets,
        })
    }
}

fn filter_document(filter: &SnippetFilter) -> Document {
    let mut query = Document::new();
    match filter {
        SnippetFilter::All => {}
        SnippetFilter::ById(id) => {
            query.insert(collection::FIELD_ID, *id);
        }
        SnippetFilter::ByName(name) => {
            query.insert(collection::FIELD_NAME, name.as_str());
        }
    }
    query
}

fn update_document(patch: &SnippetPatch) -> Document {
    let mut fields = Document::new();
    fields.insert(collection::FIELD_NAME, patch.name.as_str());
    fields.insert(collection::FIELD_CODE, patch.code.as_str());
    doc! { "$set": fields }
}

#[async_trait]
impl SnippetStore for MongoStore {
    async fn insert_one(&self, doc: CodeSnippetModel) -> Result<ObjectId, StorageError> {
        let result = self
            .snippets
            .insert_one(&doc)
            .await
            .map_err(|e| StorageError::Insert(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StorageError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn find_one(
        &self,
        filter: &SnippetFilter,
    ) -> Result<Option<CodeSnippetModel>, StorageError> {
        self.snippets
            .find_one(filter_document(filter))
            .await
            .map_err(|e| StorageError::Find(e.to_string()))
    }

    async fn find_many(
        &self,
        filter: &SnippetFilter,
    ) -> Result<Vec<CodeSnippetModel>, StorageError> {
        let cursor = self
            .snippets
            .find(filter_document(filter))
            .await
            .map_err(|e| StorageError::Find(e.to_string()))?;

        cursor
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| StorageError::Find(e.to_string()))
    }

    async fn update_one(
        &self,
        filter: &SnippetFilter,
        patch: &SnippetPatch,
    ) -> Result<UpdateCounts, StorageError> {
        let result = self
            .snippets
            .update_one(filter_document(filter), update_document(patch))
            .await
            .map_err(|e| StorageError::Update(e.to_string()))?;

        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: &SnippetFilter) -> Result<u64, StorageError> {
        let result = self
            .snippets
            .delete_one(filter_document(filter))
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StorageError::Ping(e.to_string()))?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StorageError> {
        self.client.clone().shutdown().await;
        tracing::info!("document store client shut down");
        Ok(())
    }
}
