//! Rivulet Schema Registry
//!
//! An embeddable, in-process schema registry: maps subjects to versioned
//! schema documents with dense per-subject version numbers and globally
//! unique schema ids. Useful as a testing double for a remote registry or
//! as an embedded registry in a single process.

pub mod errors;
pub use errors::SchemaRegistryError;

mod schema_types;
pub use schema_types::{SchemaRecord, SchemaType};

mod registry;
pub use registry::SchemaRegistry;
