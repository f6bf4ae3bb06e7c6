//! Jobscout CLI - job posting search digest pipeline.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobscout::digest::{DigestGenerator, EmailSender};
use jobscout::pipeline::{Pipeline, SearchCycleResult};
use jobscout::search::GoogleSearchClient;
use jobscout::Settings;

/// Jobscout CLI - Search the web for fresh job postings and email a digest.
#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Job posting search digest pipeline")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single search cycle and email the digest (for CronJob use)
    Run,

    /// Run a search cycle and print the digest without sending email
    Preview {
        /// Write the digest to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Emit the result list as JSON instead of rendered HTML
        #[arg(long)]
        json: bool,
    },

    /// Send a test email to verify SMTP configuration
    TestEmail,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("jobscout=debug,info")
    } else {
        EnvFilter::new("jobscout=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run => {
            tracing::info!("Starting digest run");
            run_digest().await
        }
        Commands::Preview { output, json } => {
            tracing::info!(json, "Starting preview run");
            run_preview(output, json).await
        }
        Commands::TestEmail => run_test_email().await,
    }
}

async fn run_digest() -> Result<()> {
    let settings = Settings::from_env()?;
    let client = Arc::new(GoogleSearchClient::new()?);

    let pipeline = Pipeline::new(settings.clone(), client);
    let cycle = pipeline.search_cycle().await;

    let generated_at = Utc::now();
    let html = DigestGenerator::generate_html(&cycle.results, &settings, generated_at);
    let text = DigestGenerator::generate_text(&cycle.results, &settings, generated_at);
    let subject = format!("Daily Job Digest - {}", generated_at.format("%Y-%m-%d"));

    let sender = EmailSender::new(settings.smtp.clone());
    sender.send(&subject, &html, &text).await?;

    print_summary(&cycle);
    println!(
        "{}",
        format!("✅ Digest emailed to {}", settings.smtp.recipient).green()
    );

    Ok(())
}

async fn run_preview(output: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = Settings::from_env()?;
    let client = Arc::new(GoogleSearchClient::new()?);

    let pipeline = Pipeline::new(settings.clone(), client);
    let cycle = pipeline.search_cycle().await;

    let body = if json {
        serde_json::to_string_pretty(&cycle.results)?
    } else {
        DigestGenerator::generate_html(&cycle.results, &settings, Utc::now())
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &body)?;
            println!("✅ Digest written to {}", path.display());
        }
        None => println!("{body}"),
    }

    print_summary(&cycle);
    Ok(())
}

async fn run_test_email() -> Result<()> {
    let sender = EmailSender::from_env()?;
    sender.send_test().await?;

    println!("{}", "✅ Test email sent".green());
    Ok(())
}

fn print_summary(cycle: &SearchCycleResult) {
    println!("\n📊 Search Cycle Summary");
    println!("   Fetched: {}", cycle.fetched);
    println!("   Kept: {}", cycle.results.len());
    println!("   Duplicates removed: {}", cycle.duplicates);
    println!("   Dropped by cap: {}", cycle.truncated);

    if !cycle.errors.is_empty() {
        println!("   Errors: {}", cycle.errors.len().to_string().red());
        for err in &cycle.errors {
            eprintln!("     - {err}");
        }
    }
}
