//! `mdsite build` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_site::{clean_output, copy_static, SiteGenerator};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static asset directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// HTML page template (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir.clone(),
            static_dir: self.static_dir.clone(),
            output_dir: self.output_dir.clone(),
            template: self.template.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;

        output.info(&format!("Content: {}", site.content_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let generator = SiteGenerator::from_template_file(&site.template)?;

        clean_output(&site.output_dir)?;
        let assets = copy_static(&site.static_dir, &site.output_dir)?;
        let pages = generator.generate_site(&site.content_dir, &site.output_dir)?;

        output.success(&format!(
            "Generated {pages} page(s) and copied {assets} asset(s) to {}",
            site.output_dir.display()
        ));
        Ok(())
    }
}
