use crate::commands::{run_console, spawn_stdin_reader, CommandContext};
use crate::components::{calendar::MonthCalendar, schedule::Schedule, ComponentManager};
use crate::config::Config;
use crate::error::other_error;
use crate::shutdown;
use crate::source;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Register every enabled component
pub async fn build_components(config: Arc<RwLock<Config>>) -> ComponentManager {
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    let config_read = config.read().await;

    if config_read.is_component_enabled("calendar") {
        component_manager.register(MonthCalendar::new());
    } else {
        warn!("Calendar component disabled");
    }

    if config_read.is_component_enabled("schedule") {
        component_manager.register(Schedule::new());
    } else {
        warn!("Schedule component disabled");
    }

    component_manager
}

/// Initialize the components and run the console until quit or a signal
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Set locale from config
    let source = {
        let config_read = config.read().await;
        rust_i18n::set_locale(&config_read.locale);
        info!("Setting locale to {}", config_read.locale);

        source::from_config(&config_read)?
    };

    // Initialize components
    let component_manager = Arc::new(build_components(Arc::clone(&config)).await);
    component_manager.init_all(source).await?;

    let context = CommandContext::from_components(&component_manager).await;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let signal_task = tokio::spawn(shutdown::handle_signals(shutdown_send));

    // Wait for either the console to end or a shutdown signal
    let result = tokio::select! {
        result = run_console(context, spawn_stdin_reader(), tokio::io::stdout()) => {
            info!("Console closed");
            result
        }
        Ok(()) = shutdown_recv => {
            info!("Received shutdown signal, shutting down...");
            Ok(())
        }
    };

    signal_task.abort();
    shutdown::shutdown_components(&component_manager).await;

    result.map_err(Into::into)
}
