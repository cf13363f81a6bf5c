use codesnip_core::models::snippet::{CodeSnippet, SnippetInput};
use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// A snippet as persisted in the `code-snippets` collection.
///
/// Field names match [`codesnip_core::collection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSnippetModel {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "createAt")]
    pub created_at: DateTime,
    #[serde(rename = "snippetname")]
    pub name: String,
    pub code: String,
}

impl CodeSnippetModel {
    /// Build a fresh document with a new identifier.
    pub fn new(input: &SnippetInput, now: jiff::Timestamp) -> Self {
        Self {
            id: ObjectId::new(),
            created_at: DateTime::from_millis(now.as_millisecond()),
            name: input.name.clone(),
            code: input.code.clone(),
        }
    }

    pub fn into_wire(self) -> Result<CodeSnippet, StorageError> {
        let millis = self.created_at.timestamp_millis();
        let created_at = jiff::Timestamp::from_millisecond(millis)
            .map_err(|e| StorageError::Timestamp(format!("{millis}ms: {e}")))?;

        Ok(CodeSnippet {
            id: self.id.to_hex(),
            name: self.name,
            code: self.code,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_copies_input_and_time() {
        let now: jiff::Timestamp = "2024-05-06T07:08:09.123Z".parse().unwrap();
        let model = CodeSnippetModel::new(&SnippetInput::new("hello", "print(1)"), now);

        assert_eq!(model.name, "hello");
        assert_eq!(model.code, "print(1)");
        assert_eq!(model.created_at.timestamp_millis(), now.as_millisecond());
    }

    #[test]
    fn each_document_gets_its_own_id() {
        let now = jiff::Timestamp::now();
        let input = SnippetInput::new("a", "b");
        assert_ne!(
            CodeSnippetModel::new(&input, now).id,
            CodeSnippetModel::new(&input, now).id
        );
    }

    #[test]
    fn wire_conversion_keeps_every_field() {
        let now: jiff::Timestamp = "2024-05-06T07:08:09.123Z".parse().unwrap();
        let model = CodeSnippetModel::new(&SnippetInput::new("hello", "print(1)"), now);
        let id = model.id;

        let wire = model.into_wire().unwrap();
        assert_eq!(wire.id, id.to_hex());
        assert_eq!(wire.name, "hello");
        assert_eq!(wire.code, "print(1)");
        assert_eq!(wire.created_at, now);
    }

    #[test]
    fn out_of_range_timestamp_is_an_error() {
        let model = CodeSnippetModel {
            id: ObjectId::new(),
            created_at: DateTime::MAX,
            name: String::new(),
            code: String::new(),
        };
        assert!(matches!(model.into_wire(), Err(StorageError::Timestamp(_))));
    }
}
