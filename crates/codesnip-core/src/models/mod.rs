pub mod envelope;
pub mod snippet;
