use fax_router::config::RouterConfig;
use fax_router::llm::{LlmConfig, create_provider};
use fax_router::pipeline::FaxProcessor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file fills in whatever the process environment leaves unset
    let dotenv_path = dotenvy::dotenv().ok();

    // All operator-facing output goes to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    if let Some(path) = &dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = RouterConfig::from_env();
    let llm_config = LlmConfig::from_env();

    tracing::info!(
        emails = %config.emails_dir.display(),
        faxes = %config.faxes_dir.display(),
        output = %config.output_dir.display(),
        "Fax router v{}",
        env!("CARGO_PKG_VERSION")
    );

    let llm = create_provider(&llm_config)?;
    let processor = FaxProcessor::new(&config, llm);

    // Per-record failures never surface here; only setup errors do.
    processor.run().await?;

    Ok(())
}
