//! One driver session shared by the components and pages of a test.

use crate::config::RunnerConfig;
use crate::driver::PageDriver;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Default implicit wait for element lookups (5 seconds)
pub const DEFAULT_WAIT_MS: u64 = 5000;

/// A driver plus the state needed to use it safely from many page objects.
///
/// The implicit wait is session-wide on the driver side, so the session owns
/// the lock that serializes [`crate::wait::WaitWindow`]s.
#[derive(Debug)]
pub struct Session<D: PageDriver> {
    id: Uuid,
    driver: Arc<D>,
    default_wait: Duration,
    pub(crate) wait_lock: Arc<Mutex<()>>,
}

impl<D: PageDriver> Session<D> {
    /// Wrap a driver with the default wait of [`DEFAULT_WAIT_MS`]
    #[must_use]
    pub fn new(driver: D) -> Arc<Self> {
        Self::with_default_wait(driver, Duration::from_millis(DEFAULT_WAIT_MS))
    }

    /// Wrap a driver with a custom default wait
    #[must_use]
    pub fn with_default_wait(driver: D, default_wait: Duration) -> Arc<Self> {
        Self::from_shared(Arc::new(driver), default_wait)
    }

    /// Wrap an already shared driver
    #[must_use]
    pub fn from_shared(driver: Arc<D>, default_wait: Duration) -> Arc<Self> {
        let session = Self {
            id: Uuid::new_v4(),
            driver,
            default_wait,
            wait_lock: Arc::new(Mutex::new(())),
        };
        tracing::debug!(
            session = %session.id,
            default_wait_ms = session.default_wait.as_millis() as u64,
            "session created"
        );
        Arc::new(session)
    }

    /// Wrap a driver using the runner configuration's default wait
    #[must_use]
    pub fn from_config(driver: D, config: &RunnerConfig) -> Arc<Self> {
        Self::with_default_wait(driver, config.default_wait())
    }

    /// Session identifier used in logs
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Shared handle to the underlying driver
    #[must_use]
    pub fn shared_driver(&self) -> Arc<D> {
        Arc::clone(&self.driver)
    }

    /// Wait used when a caller does not name one
    #[must_use]
    pub const fn default_wait(&self) -> Duration {
        self.default_wait
    }
}
