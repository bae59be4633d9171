//! CLI module for setup-guide.
//!
//! A single positional argument: comma-separated keywords, e.g.
//! `setup-guide python,conda,pytest`.

mod generate;

use clap::Parser;

/// setup-guide - compose a project setup guide from rule templates
#[derive(Parser)]
#[command(name = "setup-guide")]
#[command(about = "Generate setup-guide.md from keyword-selected rule templates")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long)]
    pub verbose: bool,

    /// Comma-separated keywords (e.g. python,conda,pytest)
    pub keywords: Option<String>,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        self.run_generate().await
    }
}
