use crate::config::Config;
use crate::error::ScheduleResult;
use crate::source::ScheduleSource;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

// Export components
pub mod calendar;
pub mod schedule;

// Re-export calendar handle
pub use calendar::CalendarHandle;
// Re-export schedule handle
pub use schedule::ScheduleHandle;

/// Component trait that all components must implement
#[async_trait]
pub trait Component: Send + Sync + Any {
    /// Get the name of the component
    fn name(&self) -> &'static str;

    /// Initialize the component
    async fn init(
        &self,
        config: Arc<RwLock<Config>>,
        source: Arc<dyn ScheduleSource>,
    ) -> ScheduleResult<()>;

    /// Shutdown the component
    async fn shutdown(&self) -> ScheduleResult<()>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Manager for all components
pub struct ComponentManager {
    components: Vec<Box<dyn Component>>,
    config: Arc<RwLock<Config>>,
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("component_count", &self.components.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ComponentManager {
    /// Create a new component manager
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            components: Vec::new(),
            config,
        }
    }

    /// Get the configuration
    pub fn get_config(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.config)
    }

    /// Register a component
    pub fn register<T: Component + 'static>(&mut self, component: T) {
        info!("Registering component: {}", component.name());
        self.components.push(Box::new(component));
    }

    /// Names of the registered components, in registration order
    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Initialize all registered components
    pub async fn init_all(&self, source: Arc<dyn ScheduleSource>) -> ScheduleResult<()> {
        for component in &self.components {
            info!("Initializing component: {}", component.name());

            if let Err(e) = component
                .init(Arc::clone(&self.config), Arc::clone(&source))
                .await
            {
                // Log error but continue with other components
                tracing::error!("Error initializing component {}: {:?}", component.name(), e);
            }
        }

        Ok(())
    }

    /// Shutdown all components
    pub async fn shutdown_all(&self) -> ScheduleResult<()> {
        info!("Shutting down all components");

        for component in &self.components {
            info!("Shutting down component: {}", component.name());

            if let Err(e) = component.shutdown().await {
                // Log error but continue with other components
                tracing::error!(
                    "Error shutting down component {}: {:?}",
                    component.name(),
                    e
                );
            }
        }

        Ok(())
    }

    /// Get a component by name
    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Handle of the calendar component, if registered and initialized
    pub async fn calendar_handle(&self) -> Option<CalendarHandle> {
        let component = self.get_component_by_name("calendar")?;
        let calendar = component.as_any().downcast_ref::<calendar::MonthCalendar>()?;
        calendar.get_handle().await
    }

    /// Handle of the schedule component, if registered and initialized
    pub async fn schedule_handle(&self) -> Option<ScheduleHandle> {
        let component = self.get_component_by_name("schedule")?;
        let schedule = component.as_any().downcast_ref::<schedule::Schedule>()?;
        schedule.get_handle().await
    }
}
