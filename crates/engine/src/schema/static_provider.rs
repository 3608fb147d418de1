use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use fieldpath_types::RawField;
use indexmap::IndexMap;
use tracing::debug;

use super::SchemaProvider;

/// Provider serving a fixed schema document.
///
/// The document maps object API names to their field lists:
///
/// ```yaml
/// Account:
///   - { apiName: Name, label: Account Name, type: STRING }
///   - { apiName: OwnerId, label: Owner ID, type: REFERENCE, referenceTo: User, relationshipName: Owner }
/// ```
///
/// JSON documents are accepted as well.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaProvider {
    objects: IndexMap<String, Vec<RawField>>,
}

impl StaticSchemaProvider {
    pub fn new(objects: IndexMap<String, Vec<RawField>>) -> Self {
        Self { objects }
    }

    pub fn from_document(content: &str) -> Result<Self> {
        let objects: IndexMap<String, Vec<RawField>> =
            serde_yaml::from_str(content).context("schema document must map object names to field lists")?;
        Ok(Self::new(objects))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read schema file: {}", path.display()))?;
        Self::from_document(&content)
    }

    pub fn with_object(mut self, object_api_name: impl Into<String>, fields: Vec<RawField>) -> Self {
        self.objects.insert(object_api_name.into(), fields);
        self
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}

#[async_trait]
impl SchemaProvider for StaticSchemaProvider {
    async fn get_fields(&self, object_api_name: &str) -> Result<Vec<RawField>> {
        let fields = self
            .objects
            .get(object_api_name)
            .cloned()
            .ok_or_else(|| anyhow!("object '{}' is not described by the schema", object_api_name))?;
        debug!(object_api_name, field_count = fields.len(), "static schema lookup");
        Ok(fields)
    }
}
