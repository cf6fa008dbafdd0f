//! Plot Analysis Command Handler

use std::sync::Arc;

use crate::application::commands::AnalyzePlot;
use crate::application::error::ApplicationError;
use crate::application::ports::TextGeneratorPort;
use crate::domain::analysis::PlotAnalysis;
use crate::domain::parser::parse_plot_analysis;
use crate::domain::prompt::plot_analysis_prompt;

/// AnalyzePlot Handler
pub struct AnalyzePlotHandler {
    generator: Arc<dyn TextGeneratorPort>,
}

impl AnalyzePlotHandler {
    pub fn new(generator: Arc<dyn TextGeneratorPort>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, command: AnalyzePlot) -> Result<PlotAnalysis, ApplicationError> {
        if command.story.trim().is_empty() {
            return Err(ApplicationError::validation("Story text must not be empty"));
        }

        let raw = self.generator.generate(&plot_analysis_prompt(&command.story)).await?;
        let parsed = parse_plot_analysis(&raw);

        tracing::info!(
            story_len = command.story.len(),
            tier = parsed.tier(),
            "Plot analysis completed"
        );

        Ok(parsed.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FakeTextGenerator;

    #[tokio::test]
    async fn test_malformed_model_output_yields_defaults() {
        let handler = AnalyzePlotHandler::new(Arc::new(FakeTextGenerator::fixed("lorem ipsum")));
        let analysis = handler
            .handle(AnalyzePlot {
                story: "Once upon a time.".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(analysis, PlotAnalysis::default());
    }

    #[tokio::test]
    async fn test_empty_story_is_rejected() {
        let generator = Arc::new(FakeTextGenerator::fixed("unused"));
        let handler = AnalyzePlotHandler::new(generator.clone());
        let err = handler
            .handle(AnalyzePlot {
                story: " \n ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(generator.prompts().await.is_empty());
    }
}
