use crate::core::{GenerationReport, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

/// Runs the stages of `pipeline` in order. The preflight guard runs first, so
/// a rejected run has no side effects.
pub async fn run_pipeline<P: Pipeline + ?Sized>(
    pipeline: &P,
    object_names: &[String],
) -> Result<GenerationReport> {
    pipeline.preflight()?;

    let started = Instant::now();

    tracing::info!("Describing objects...");
    let objects = pipeline.extract(object_names).await?;
    tracing::info!("Described {} objects", objects.len());

    tracing::info!("Rendering classes...");
    let rendered = pipeline.transform(objects).await?;
    tracing::info!(
        "Rendered {} classes ({} fields skipped)",
        rendered.sources.len(),
        rendered.skipped_fields.len()
    );

    tracing::info!("Writing sources...");
    let report = pipeline.load(rendered).await?;
    tracing::info!(
        "Wrote {} files to {} in {:?}",
        report.files_written,
        report.output_path,
        started.elapsed()
    );

    Ok(report)
}

pub struct CodegenEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CodegenEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self, object_names: &[String]) -> Result<GenerationReport> {
        tracing::info!("Starting code generation");
        run_pipeline(&self.pipeline, object_names).await
    }
}
