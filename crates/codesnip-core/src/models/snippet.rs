use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A code snippet as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    /// Hex form of the storage identifier.
    pub id: String,
    #[serde(rename = "snippetname")]
    pub name: String,
    pub code: String,
    pub created_at: jiff::Timestamp,
}

/// Request body for create and update. Absent fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetInput {
    #[serde(rename = "snippetname", default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl SnippetInput {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// At least one of `name` or `code` must carry content.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() && self.code.is_empty() {
            return Err(CoreError::EmptySnippet);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_empty_is_rejected() {
        assert_eq!(
            SnippetInput::default().validate(),
            Err(CoreError::EmptySnippet)
        );
    }

    #[test]
    fn one_non_empty_field_is_enough() {
        assert!(SnippetInput::new("hello", "").validate().is_ok());
        assert!(SnippetInput::new("", "print(1)").validate().is_ok());
    }

    #[test]
    fn whitespace_counts_as_content() {
        assert!(SnippetInput::new(" ", "").validate().is_ok());
    }

    #[test]
    fn input_decodes_with_missing_fields() {
        let input: SnippetInput = serde_json::from_str(r#"{"code":"x"}"#).unwrap();
        assert_eq!(input, SnippetInput::new("", "x"));
    }

    #[test]
    fn snippet_serializes_wire_field_names() {
        let snippet = CodeSnippet {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: "hello".to_string(),
            code: "print(1)".to_string(),
            created_at: "2024-01-02T03:04:05Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&snippet).unwrap();
        assert_eq!(json["id"], "65a1b2c3d4e5f60718293a4b");
        assert_eq!(json["snippetname"], "hello");
        assert_eq!(json["code"], "print(1)");
        assert_eq!(json["created_at"], "2024-01-02T03:04:05Z");
    }
}
