use project_calendar::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting project calendar");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the console
    startup::run(config).await
}
