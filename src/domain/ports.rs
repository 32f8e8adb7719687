use crate::domain::model::{GenerationReport, ObjectDescription, ObjectSummary, RenderResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn package_name(&self) -> &str;
    fn output_path(&self) -> &str;
    fn include_references(&self) -> bool;
    fn archive(&self) -> bool;
    fn dry_run(&self) -> bool;
}

/// Source of object metadata: the live REST API or a saved snapshot.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn describe_global(&self) -> Result<Vec<ObjectSummary>>;
    async fn describe_object(&self, name: &str) -> Result<ObjectDescription>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Checks that must pass before any remote call or file write.
    fn preflight(&self) -> Result<()>;
    async fn extract(&self, object_names: &[String]) -> Result<Vec<ObjectDescription>>;
    async fn transform(&self, objects: Vec<ObjectDescription>) -> Result<RenderResult>;
    async fn load(&self, result: RenderResult) -> Result<GenerationReport>;
}
