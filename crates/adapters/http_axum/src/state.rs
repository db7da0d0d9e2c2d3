//! Shared application state for axum handlers.

use std::sync::Arc;

use homedash_app::event_bus::InProcessEventBus;
use homedash_app::ports::CommandPublisher;
use homedash_app::services::dashboard_service::DashboardService;

/// Dashboard service wired to the in-process event bus.
pub type SharedDashboard<P> = DashboardService<P, Arc<InProcessEventBus>>;

/// Default auto-refresh interval of the status page, in seconds.
pub const DEFAULT_REFRESH_SECONDS: u32 = 5;

/// Application state shared across all axum handlers.
///
/// Generic over the command publisher to avoid dynamic dispatch.
/// `Clone` is implemented manually so `P` itself does not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<P> {
    /// The dashboard use-cases.
    pub dashboard: Arc<SharedDashboard<P>>,
    /// Event bus the SSE stream subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
    /// `<meta http-equiv="refresh">` interval of the status page.
    pub refresh_seconds: u32,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            event_bus: Arc::clone(&self.event_bus),
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<P> AppState<P>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// The service is taken as an `Arc` because the transport shares it as
    /// its [`TransportContext`](homedash_app::ports::TransportContext).
    pub fn new(dashboard: Arc<SharedDashboard<P>>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self {
            dashboard,
            event_bus,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
        }
    }

    /// Override the status page refresh interval (at least one second).
    #[must_use]
    pub fn with_refresh_seconds(mut self, seconds: u32) -> Self {
        self.refresh_seconds = seconds.max(1);
        self
    }
}
