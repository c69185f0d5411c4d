use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub accepted: usize,
    pub rejected: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting employee import...");

        // Extract
        tracing::info!("Extracting lines...");
        let lines = self.pipeline.extract().await?;
        tracing::info!("Extracted {} lines", lines.len());

        // Transform
        tracing::info!("Validating lines...");
        let outcome = self.pipeline.transform(lines).await?;
        tracing::info!(
            "Accepted {} records, rejected {} lines",
            outcome.accepted_count(),
            outcome.rejected_count()
        );

        // Load
        tracing::info!("Writing outputs...");
        let output_path = self.pipeline.load(&outcome).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            accepted: outcome.accepted_count(),
            rejected: outcome.rejected_count(),
        })
    }
}
