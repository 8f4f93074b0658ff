use crate::report;
use application::pipeline;
use clap::Parser;
use colored::Colorize;
use infrastructure::config::Config;
use shared::types::Result;
use shared::utils::truncate_chars;
use std::path::Path;

/// Preview length for the vision description printed after a run.
const PREVIEW_CHARS: usize = 350;

#[derive(Parser)]
#[command(name = "scansage")]
#[command(about = "Retrieval-augmented analysis of medical brain images")]
pub struct Cli {
    /// Enter the interactive analysis loop
    #[arg(long)]
    pub interactive: bool,

    /// Image path to analyze
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new() -> Self {
        Self {
            config: Config::load(),
        }
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        let args_str = cli.args.join(" ");
        if cli.interactive {
            self.handle_interactive().await
        } else if args_str.trim().is_empty() {
            println!(
                "{}",
                "Usage: scansage <image_path>  (or scansage --interactive)".yellow()
            );
            Ok(())
        } else {
            self.handle_analyze(args_str.trim()).await
        }
    }

    async fn handle_interactive(&self) -> Result<()> {
        use dialoguer::{theme::ColorfulTheme, Input};
        println!(
            "{}",
            "Medical image analysis. Commands: analyze <image_path>, exit".green()
        );
        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Command")
                .interact_text()?;
            let trimmed = input.trim();
            let lowered = trimmed.to_lowercase();
            if lowered == "exit" || lowered == "quit" {
                break;
            }
            if let Some(path) = trimmed.strip_prefix("analyze ") {
                self.handle_analyze(path.trim()).await?;
            } else {
                println!(
                    "{}",
                    "Unknown command. Use: analyze <image_path>, or exit".yellow()
                );
            }
        }
        Ok(())
    }

    async fn handle_analyze(&self, image_path: &str) -> Result<()> {
        let pipeline = pipeline::from_config(&self.config)?;
        let path = Path::new(image_path);
        println!("\n{} {}", "Analyzing".green(), image_path);

        match pipeline.analyze(path).await {
            Ok(analysis) => {
                let out_path = report::write_report(&self.config.report_dir, path, &analysis)?;
                println!("\n{}", "Analysis complete.".green().bold());
                println!("\n{}", "Visual features (preview):".green());
                println!("{}...", truncate_chars(&analysis.vision_analysis, PREVIEW_CHARS));
                println!(
                    "\n{} {} passages retrieved",
                    "Medical sources:".green(),
                    analysis.sources
                );
                println!("{} {}", "Report saved to:".green(), out_path.display());
            }
            Err(err) => {
                println!("{}", format!("Analysis failed: {}", err).red());
            }
        }
        Ok(())
    }
}
