use crate::domain::model::{ObjectDescription, ObjectSummary};
use crate::domain::ports::{MetadataSource, Storage};
use crate::utils::error::{CodegenError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Describe results saved to disk, so generation can run without an org.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub sobjects: Vec<ObjectDescription>,
}

pub struct SnapshotMetadataSource {
    snapshot: MetadataSnapshot,
}

impl SnapshotMetadataSource {
    pub fn new(snapshot: MetadataSnapshot) -> Self {
        Self { snapshot }
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        let snapshot: MetadataSnapshot = serde_json::from_slice(&data)?;
        tracing::debug!(
            "Loaded metadata snapshot {} with {} objects",
            path,
            snapshot.sobjects.len()
        );
        Ok(Self::new(snapshot))
    }
}

#[async_trait]
impl MetadataSource for SnapshotMetadataSource {
    async fn describe_global(&self) -> Result<Vec<ObjectSummary>> {
        Ok(self.snapshot.sobjects.iter().map(|o| o.summary()).collect())
    }

    async fn describe_object(&self, name: &str) -> Result<ObjectDescription> {
        self.snapshot
            .sobjects
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| CodegenError::ObjectNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetadataSnapshot {
        serde_json::from_value(serde_json::json!({
            "sobjects": [
                {"name": "Account", "label": "Account", "fields": [{"name": "Id", "type": "id"}]},
                {"name": "Widget__c", "label": "Widget", "custom": true, "fields": []}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_describe_is_case_insensitive() {
        let source = SnapshotMetadataSource::new(snapshot());
        let widget = source.describe_object("widget__C").await.unwrap();
        assert_eq!(widget.name, "Widget__c");
        assert!(widget.custom);
    }

    #[tokio::test]
    async fn test_describe_global_lists_all_objects() {
        let source = SnapshotMetadataSource::new(snapshot());
        let global = source.describe_global().await.unwrap();
        let names: Vec<&str> = global.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Account", "Widget__c"]);
        assert!(global.iter().all(|s| s.queryable));
    }

    #[test]
    fn test_missing_object() {
        let source = SnapshotMetadataSource::new(snapshot());
        let result = tokio_test::block_on(source.describe_object("Contact"));
        assert!(matches!(result, Err(CodegenError::ObjectNotFound { .. })));
    }
}
