//! Generate command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::error::AppError;
use crate::services::generator::Generator;
use crate::services::resolver::parse_keywords;

use super::App;

impl App {
    /// Generate the guide for the supplied keywords.
    pub async fn run_generate(&self) -> Result<()> {
        let keywords = self
            .keywords
            .as_deref()
            .map(parse_keywords)
            .unwrap_or_default();
        if keywords.iter().all(|k| k.is_empty()) {
            return Err(AppError::Usage.into());
        }

        let config = Config::load().map_err(AppError::from)?;
        tracing::debug!(?config, "Loaded configuration");

        let generator = Generator::from_config(&config);
        let report = generator.generate(&keywords).await?;

        println!("Generated {}", report.output_path.display());
        println!("Matched rules: {}", report.titles.join(", "));

        Ok(())
    }
}
