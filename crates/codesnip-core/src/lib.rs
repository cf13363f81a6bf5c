//! codesnip-core
//!
//! Wire types, validation rules, and collection conventions.
//! No database dependency. This is the shared vocabulary of the codesnip service.

pub mod collection;
pub mod error;
pub mod models;
