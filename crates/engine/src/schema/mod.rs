//! Schema provider contract and bundled implementations.
//!
//! Modules:
//! - `static_provider`: In-memory provider backed by a schema document
//! - `null`: Provider returning no fields, for tests and disabled scenarios

mod null;
mod static_provider;

use anyhow::Result;
use async_trait::async_trait;
use fieldpath_types::RawField;

pub use null::NullSchemaProvider;
pub use static_provider::StaticSchemaProvider;

/// Source of field metadata for an object.
///
/// A failed fetch is returned as an error; the controller reports it and
/// leaves retrying to the caller.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn get_fields(&self, object_api_name: &str) -> Result<Vec<RawField>>;
}
