use crate::core::engine::run_pipeline;
use crate::core::package_name::PackageName;
use crate::core::naming::assign_class_names;
use crate::core::renderer::render_object;
use crate::core::selection::resolve_objects;
use crate::core::{
    ConfigProvider, GenerationReport, MetadataSource, ObjectDescription, Pipeline, RenderResult,
    Storage,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_package_name, validate_path};
use chrono::Utc;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "generated-sources.zip";

/// Generates JPA entity classes for remote objects.
pub struct JpaClassGenerator<S: Storage, M: MetadataSource, C: ConfigProvider> {
    storage: S,
    metadata: M,
    config: C,
}

impl<S: Storage, M: MetadataSource, C: ConfigProvider> JpaClassGenerator<S, M, C> {
    pub fn new(storage: S, metadata: M, config: C) -> Self {
        Self {
            storage,
            metadata,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Generates one class per named object (`*` for all objects).
    ///
    /// Fails with `InvalidPackageName` before touching the metadata source or
    /// the output directory when the configured package name is not valid.
    pub async fn generate_jpa_classes(&self, object_names: &[String]) -> Result<GenerationReport> {
        run_pipeline(self, object_names).await
    }

    fn report(&self, classes: Vec<String>, files_written: usize, output_path: String) -> GenerationReport {
        GenerationReport {
            package_name: self.config.package_name().to_string(),
            output_path,
            classes,
            files_written,
            generated_at: Utc::now(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, M: MetadataSource, C: ConfigProvider> Pipeline for JpaClassGenerator<S, M, C> {
    fn preflight(&self) -> Result<()> {
        validate_package_name(self.config.package_name())?;
        validate_path("output_path", self.config.output_path())?;
        Ok(())
    }

    async fn extract(&self, object_names: &[String]) -> Result<Vec<ObjectDescription>> {
        tracing::debug!("Resolving objects: {:?}", object_names);
        resolve_objects(
            &self.metadata,
            object_names,
            self.config.include_references(),
        )
        .await
    }

    async fn transform(&self, objects: Vec<ObjectDescription>) -> Result<RenderResult> {
        let package = PackageName::parse(self.config.package_name())?;
        let object_names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        let generated = assign_class_names(&object_names);

        let mut result = RenderResult::default();
        for object in &objects {
            let rendered = render_object(&package, object, &generated);
            tracing::debug!(
                "Rendered {} as {} ({} fields skipped)",
                object.name,
                rendered.source.class_name,
                rendered.skipped.len()
            );
            result.skipped_fields.extend(rendered.skipped);
            result.sources.push(rendered.source);
        }

        Ok(result)
    }

    async fn load(&self, result: RenderResult) -> Result<GenerationReport> {
        let classes: Vec<String> = result
            .sources
            .iter()
            .map(|s| s.class_name.clone())
            .collect();
        let base = self.config.output_path().trim_end_matches('/');

        if self.config.dry_run() {
            for source in &result.sources {
                tracing::info!("[dry run] would write {}/{}", base, source.relative_path);
            }
            return Ok(self.report(classes, 0, base.to_string()));
        }

        if result.sources.is_empty() {
            tracing::warn!("No objects selected, nothing to write");
            return Ok(self.report(classes, 0, base.to_string()));
        }

        if self.config.archive() {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for source in &result.sources {
                    zip.start_file::<_, ()>(source.relative_path.as_str(), FileOptions::default())?;
                    zip.write_all(source.contents.as_bytes())?;
                }
                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing archive ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;
            return Ok(self.report(classes, 1, format!("{}/{}", base, ARCHIVE_NAME)));
        }

        for source in &result.sources {
            tracing::debug!("Writing {}", source.relative_path);
            self.storage
                .write_file(&source.relative_path, source.contents.as_bytes())
                .await?;
        }

        let written = result.sources.len();
        Ok(self.report(classes, written, base.to_string()))
    }
}
