use std::sync::Arc;

use codesnip_core::models::snippet::{CodeSnippet, SnippetInput};
use mongodb::bson::oid::ObjectId;

use crate::error::SnippetError;
use crate::model::CodeSnippetModel;
use crate::store::{SnippetFilter, SnippetPatch, SnippetStore, UpdateCounts};

/// Snippet operations in wire terms, on top of a [`SnippetStore`].
///
/// Cheap to clone; every clone shares the same store.
#[derive(Clone)]
pub struct SnippetRepository {
    store: Arc<dyn SnippetStore>,
}

/// Parse a path identifier. Surrounding whitespace is ignored.
pub fn parse_id(raw: &str) -> Result<ObjectId, SnippetError> {
    let trimmed = raw.trim();
    ObjectId::parse_str(trimmed).map_err(|_| SnippetError::InvalidIdentifier(trimmed.to_string()))
}

impl SnippetRepository {
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn SnippetStore {
        self.store.as_ref()
    }

    /// Persist a new snippet stamped with the current time.
    pub async fn create(&self, input: &SnippetInput) -> Result<ObjectId, SnippetError> {
        input.validate()?;

        let doc = CodeSnippetModel::new(input, jiff::Timestamp::now());
        let id = self.store.insert_one(doc).await?;
        tracing::info!(snippet_id = %id, "snippet created");
        Ok(id)
    }

    /// Exact match on name. Names are not unique; the first stored match wins.
    pub async fn get_by_name(&self, name: &str) -> Result<CodeSnippet, SnippetError> {
        let found = self
            .store
            .find_one(&SnippetFilter::ByName(name.to_string()))
            .await?
            .ok_or_else(|| SnippetError::NotFound(name.to_string()))?;

        Ok(found.into_wire()?)
    }

    pub async fn get_all(&self) -> Result<Vec<CodeSnippet>, SnippetError> {
        let docs = self.store.find_many(&SnippetFilter::All).await?;

        let mut snippets = Vec::with_capacity(docs.len());
        for doc in docs {
            snippets.push(doc.into_wire()?);
        }
        Ok(snippets)
    }

    /// Replace name and code. The id is checked before the store is touched.
    pub async fn update_by_id(
        &self,
        id: &str,
        input: &SnippetInput,
    ) -> Result<UpdateCounts, SnippetError> {
        let id = parse_id(id)?;
        input.validate()?;

        let patch = SnippetPatch {
            name: input.name.clone(),
            code: input.code.clone(),
        };
        let counts = self
            .store
            .update_one(&SnippetFilter::ById(id), &patch)
            .await?;

        tracing::info!(
            snippet_id = %id,
            matched = counts.matched,
            modified = counts.modified,
            "snippet update applied"
        );
        Ok(counts)
    }

    /// Returns the number of documents removed (0 or 1).
    pub async fn delete_by_id(&self, id: &str) -> Result<u64, SnippetError> {
        let id = parse_id(id)?;

        let deleted = self.store.delete_one(&SnippetFilter::ById(id)).await?;
        tracing::info!(snippet_id = %id, deleted, "snippet delete applied");
        Ok(deleted)
    }
}
