use anyhow::Result;
use async_trait::async_trait;
use fieldpath_types::RawField;

use super::SchemaProvider;

pub struct NullSchemaProvider;

#[async_trait]
impl SchemaProvider for NullSchemaProvider {
    async fn get_fields(&self, _object_api_name: &str) -> Result<Vec<RawField>> {
        Ok(Vec::new())
    }
}
