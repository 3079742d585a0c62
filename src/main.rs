use std::sync::Arc;

use candidate_runner::agent::create_processor;
use candidate_runner::config::{FailurePolicy, RunnerConfig};
use candidate_runner::runner::RunLoop;
use candidate_runner::source::PicaSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = RunnerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  Required: PICA_SECRET_KEY, GMAIL_CONNECTION_KEY,");
        eprintln!("            AIRTABLE_BASE_ID, AIRTABLE_TABLE_ID,");
        eprintln!("            OPENAI_API_KEY (or ANTHROPIC_API_KEY)");
        std::process::exit(1);
    });

    eprintln!("📋 Candidate Runner v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   API base: {}", config.api_base);
    eprintln!(
        "   Failure policy: {}",
        match config.failure_policy {
            FailurePolicy::Advance => "advance (count and move on)",
            FailurePolicy::Halt => "halt (stop at first unconfirmed item)",
        }
    );
    eprintln!("   Query: {}\n", config.query);

    let source = Arc::new(PicaSource::new(&config));
    let processor = create_processor(&config)?;

    let mut run = RunLoop::new(source, processor, config.failure_policy);
    let report = run.run().await?;

    eprintln!(
        "\n✅ Processed {}/{} item(s) across {} page(s) in {}s",
        report.processed,
        report.total,
        report.pages_fetched,
        (report.finished_at - report.started_at).num_seconds()
    );
    if !report.failed_items.is_empty() {
        eprintln!(
            "⚠️  {} item(s) did not confirm completion: {}",
            report.failed_items.len(),
            report.failed_items.join(", ")
        );
    }

    Ok(())
}
