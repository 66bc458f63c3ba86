//! Test runner configuration
//!
//! Settings shared by every session of a test run: where the driver lives,
//! which browser to ask for, how suites are sharded, and the defaults the
//! page objects fall back to.
//!
//! ```yaml
//! driver_address: http://localhost:4444/wd/hub
//! specs: ["./tests/**/*.spec.rs"]
//! capabilities:
//!   browser_name: chrome
//!   shard_test_files: true
//!   max_instances: 5
//! window:
//!   width: 1024
//!   height: 768
//! ```

use crate::driver::PageDriver;
use crate::result::{PageError, PageResult};
use crate::session::{Session, DEFAULT_WAIT_MS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default remote driver endpoint
pub const DEFAULT_DRIVER_ADDRESS: &str = "http://localhost:4444/wd/hub";

/// Browser capabilities requested from the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Browser to launch
    pub browser_name: String,
    /// Run each spec file in its own browser instance
    pub shard_test_files: bool,
    /// Upper bound on concurrently running instances
    pub max_instances: usize,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            browser_name: "chrome".to_string(),
            shard_test_files: true,
            max_instances: 5,
        }
    }
}

/// Browser window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Remote driver endpoint
    pub driver_address: String,
    /// Test framework label, informational
    pub framework: String,
    /// Spec file globs
    pub specs: Vec<String>,
    /// Browser capabilities
    pub capabilities: Capabilities,
    /// Window size applied by [`RunnerConfig::prepare`]
    pub window: WindowSize,
    /// Default implicit wait for page objects (ms)
    pub default_wait_ms: u64,
    /// Tests slower than this are reported as slow (ms)
    pub slow_ms: u64,
    /// Directory for saved screenshots
    pub screenshot_dir: PathBuf,
    /// Free-form parameters for test code
    pub params: BTreeMap<String, serde_json::Value>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            driver_address: DEFAULT_DRIVER_ADDRESS.to_string(),
            framework: "mocha".to_string(),
            specs: vec!["./tests/**/*.spec.rs".to_string()],
            capabilities: Capabilities::default(),
            window: WindowSize::default(),
            default_wait_ms: DEFAULT_WAIT_MS,
            slow_ms: 5000,
            screenshot_dir: PathBuf::from(crate::screenshot::DEFAULT_SCREENSHOT_DIR),
            params: BTreeMap::new(),
        }
    }
}

impl RunnerConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> PageResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading runner config");
        Self::from_yaml_str(&contents)
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> PageResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> PageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings no run can use
    pub fn validate(&self) -> PageResult<()> {
        if self.driver_address.trim().is_empty() {
            return Err(PageError::config("driver_address must not be empty"));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(PageError::config(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        if self.capabilities.max_instances == 0 {
            return Err(PageError::config("capabilities.max_instances must be at least 1"));
        }
        if self.specs.is_empty() {
            return Err(PageError::config("at least one spec glob is required"));
        }
        Ok(())
    }

    /// Set the driver address
    #[must_use]
    pub fn with_driver_address(mut self, address: impl Into<String>) -> Self {
        self.driver_address = address.into();
        self
    }

    /// Set the window size
    #[must_use]
    pub const fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window = WindowSize { width, height };
        self
    }

    /// Set the default implicit wait
    #[must_use]
    pub const fn with_default_wait_ms(mut self, ms: u64) -> Self {
        self.default_wait_ms = ms;
        self
    }

    /// Set the screenshot directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Default implicit wait as a `Duration`
    #[must_use]
    pub const fn default_wait(&self) -> Duration {
        Duration::from_millis(self.default_wait_ms)
    }

    /// Screenshot store rooted at `screenshot_dir`
    #[must_use]
    pub fn screenshot_store(&self) -> crate::screenshot::ScreenshotStore {
        crate::screenshot::ScreenshotStore::new(self.screenshot_dir.clone())
    }

    /// Per-session setup run before any test touches the browser.
    pub async fn prepare<D: PageDriver>(&self, session: &Session<D>) -> PageResult<()> {
        tracing::debug!(
            session = %session.id(),
            width = self.window.width,
            height = self.window.height,
            "preparing session"
        );
        session
            .driver()
            .set_window_size(self.window.width, self.window.height)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = RunnerConfig::default();
            assert_eq!(config.driver_address, "http://localhost:4444/wd/hub");
            assert_eq!(config.capabilities.browser_name, "chrome");
            assert!(config.capabilities.shard_test_files);
            assert_eq!(config.capabilities.max_instances, 5);
            assert_eq!(config.window, WindowSize { width: 1024, height: 768 });
            assert_eq!(config.default_wait(), Duration::from_millis(5000));
            assert_eq!(config.slow_ms, 5000);
            assert_eq!(config.screenshot_dir, PathBuf::from("screenshots"));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_builder() {
            let config = RunnerConfig::new()
                .with_driver_address("http://grid:4444")
                .with_window(1280, 720)
                .with_default_wait_ms(250)
                .with_screenshot_dir("out/shots");
            assert_eq!(config.driver_address, "http://grid:4444");
            assert_eq!(config.window.width, 1280);
            assert_eq!(config.default_wait_ms, 250);
            assert_eq!(config.screenshot_store().dir(), Path::new("out/shots"));
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_fills_defaults() {
            let config = RunnerConfig::from_yaml_str(
                "capabilities:\n  browser_name: firefox\nwindow:\n  width: 800\n",
            )
            .unwrap();
            assert_eq!(config.capabilities.browser_name, "firefox");
            assert_eq!(config.capabilities.max_instances, 5);
            assert_eq!(config.window.width, 800);
            assert_eq!(config.window.height, 768);
            assert_eq!(config.driver_address, DEFAULT_DRIVER_ADDRESS);
        }

        #[test]
        fn test_yaml_round_trip() {
            let mut config = RunnerConfig::default().with_window(640, 480);
            let _ = config
                .params
                .insert("login".to_string(), serde_json::json!({"user": "demo"}));
            let yaml = config.to_yaml().unwrap();
            assert_eq!(RunnerConfig::from_yaml_str(&yaml).unwrap(), config);
        }

        #[test]
        fn test_json_output() {
            let json = RunnerConfig::default().to_json().unwrap();
            assert!(json.contains("\"driver_address\""));
        }

        #[test]
        fn test_invalid_yaml() {
            let err = RunnerConfig::from_yaml_str("window: [1, 2").unwrap_err();
            assert!(matches!(err, PageError::Yaml(_)));
        }

        #[test]
        fn test_load_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("pagekit.yaml");
            std::fs::write(&path, "default_wait_ms: 1000\n").unwrap();
            let config = RunnerConfig::load(&path).unwrap();
            assert_eq!(config.default_wait_ms, 1000);
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_rejects_zero_window() {
            let err = RunnerConfig::default().with_window(0, 768).validate().unwrap_err();
            assert!(err.to_string().contains("window size"));
        }

        #[test]
        fn test_rejects_zero_instances() {
            let mut config = RunnerConfig::default();
            config.capabilities.max_instances = 0;
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_rejects_empty_address() {
            let config = RunnerConfig::default().with_driver_address("  ");
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_rejects_empty_specs() {
            let err = RunnerConfig::from_yaml_str("specs: []\n").unwrap_err();
            assert!(matches!(err, PageError::Config { .. }));
        }
    }

    #[tokio::test]
    async fn test_prepare_sets_window_size() {
        let config = RunnerConfig::default();
        let session = Session::new(MockDriver::new());
        config.prepare(&session).await.unwrap();
        assert_eq!(session.driver().window_size(), Some((1024, 768)));
    }
}
