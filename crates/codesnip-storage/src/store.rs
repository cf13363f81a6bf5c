use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StorageError;
use crate::model::CodeSnippetModel;

/// Which documents an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetFilter {
    All,
    ById(ObjectId),
    ByName(String),
}

impl SnippetFilter {
    pub fn matches(&self, doc: &CodeSnippetModel) -> bool {
        match self {
            SnippetFilter::All => true,
            SnippetFilter::ById(id) => doc.id == *id,
            SnippetFilter::ByName(name) => doc.name == *name,
        }
    }
}

/// Replacement values for the mutable fields of a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetPatch {
    pub name: String,
    pub code: String,
}

/// Outcome of an update. `matched == 0` means no document had the id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// Interface for snippet persistence, scoped to the snippets collection.
///
/// Every call is a single round trip to the store. Failures are returned
/// as-is; nothing is retried.
///
/// # Implementations
///
/// - [`MongoStore`](crate::mongo::MongoStore): MongoDB
/// - [`MemoryStore`](crate::memory::MemoryStore): in-process, for tests
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Persist a new document. Returns the identifier the store recorded.
    async fn insert_one(&self, doc: CodeSnippetModel) -> Result<ObjectId, StorageError>;

    /// First document matching `filter`, or `None`.
    async fn find_one(&self, filter: &SnippetFilter)
    -> Result<Option<CodeSnippetModel>, StorageError>;

    /// Every document matching `filter`, in store order.
    async fn find_many(&self, filter: &SnippetFilter)
    -> Result<Vec<CodeSnippetModel>, StorageError>;

    /// Overwrite name and code of the first document matching `filter`.
    async fn update_one(
        &self,
        filter: &SnippetFilter,
        patch: &SnippetPatch,
    ) -> Result<UpdateCounts, StorageError>;

    /// Remove the first document matching `filter`. Returns the deleted count.
    async fn delete_one(&self, filter: &SnippetFilter) -> Result<u64, StorageError>;

    /// Round trip to check the store is reachable.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Release the connection. Further calls are not expected to succeed.
    async fn disconnect(&self) -> Result<(), StorageError>;
}
