//! codesnip-storage
//!
//! Document store access for snippets. A small trait over the collection
//! operations, a MongoDB backend, an in-memory backend, and the repository
//! that converts between stored documents and wire types.

pub mod error;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod repository;
pub mod store;

pub use mongodb::bson::oid::ObjectId;
