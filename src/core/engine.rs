use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct DashboardEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DashboardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting dashboard projection...");

        // Extract
        let state = self.pipeline.extract().await?;
        tracing::info!("Loaded {} course cards", state.app.course_data.len());

        // Transform
        let report = self.pipeline.transform(state).await?;
        tracing::info!(
            "Projected {} visible cards across {} page(s)",
            report.cards.len(),
            report.num_pages
        );

        // Load
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(output_path)
    }
}
