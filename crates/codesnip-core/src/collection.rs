//! Document store naming conventions.
//!
//! Plain constants, no driver dependency. These define where snippets live
//! and what their stored fields are called.

pub const DEFAULT_DATABASE: &str = "Code-Snippet-Manager";

pub const SNIPPETS: &str = "code-snippets";

pub const FIELD_ID: &str = "_id";

pub const FIELD_NAME: &str = "snippetname";

pub const FIELD_CODE: &str = "code";

/// Stored creation time. The historical field name is kept so existing
/// collections stay readable.
pub const FIELD_CREATED_AT: &str = "createAt";
