//! PageDriver - the browser driver boundary
//!
//! Page objects never talk to a browser directly. Everything they need goes
//! through [`PageDriver`], so a WebDriver client, a CDP client or the
//! in-crate [`MockDriver`] can sit underneath.
//!
//! The implicit wait is session state on the driver side: once set, every
//! element lookup polls up to that long before failing. [`crate::wait`]
//! owns the only code path that changes it.

use crate::result::{PageError, PageResult};
use async_trait::async_trait;
use base64::Engine;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Abstract driver trait for browser automation
///
/// Implementations take `&self` everywhere: one driver session is shared by
/// every component and page of a test, and the visibility checks of
/// [`crate::visibility`] run concurrently against it.
#[async_trait]
pub trait PageDriver: Send + Sync + 'static {
    /// Driver-side element handle
    type Element: Clone + Send + Sync + std::fmt::Debug;

    /// Locate the first element matching a CSS selector
    async fn find_element(&self, selector: &str) -> PageResult<Self::Element>;

    /// Locate every element matching a CSS selector (may be empty)
    async fn find_elements(&self, selector: &str) -> PageResult<Vec<Self::Element>>;

    /// Whether the element is currently displayed
    async fn is_displayed(&self, element: &Self::Element) -> PageResult<bool>;

    /// Current implicit wait of the session
    async fn implicit_wait(&self) -> PageResult<Duration>;

    /// Set the implicit wait of the session
    async fn set_implicit_wait(&self, timeout: Duration) -> PageResult<()>;

    /// Navigate to URL
    async fn navigate(&self, url: &str) -> PageResult<()>;

    /// Capture the viewport as a base64-encoded PNG
    async fn screenshot(&self) -> PageResult<String>;

    /// Resize the browser window
    async fn set_window_size(&self, width: u32, height: u32) -> PageResult<()>;

    /// Type a key sequence into an element
    async fn send_keys(&self, element: &Self::Element, keys: &str) -> PageResult<()>;
}

/// Element handle returned by [`MockDriver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Element id as registered on the mock
    pub id: String,
    /// Selector the element was found through
    pub selector: String,
}

/// Scripted behavior of one mock element
#[derive(Debug, Clone)]
pub struct MockElementSpec {
    /// Element id
    pub id: String,
    /// Outcome of the displayed check; `Err` makes the check fail
    pub displayed: Result<bool, String>,
    /// Number of scheduler yields before the displayed check settles
    pub settle_after: u32,
    /// How long after the query starts the element shows up in the DOM
    pub appears_after: Duration,
}

impl MockElementSpec {
    /// A displayed element
    #[must_use]
    pub fn visible(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            displayed: Ok(true),
            settle_after: 0,
            appears_after: Duration::ZERO,
        }
    }

    /// An element that is present but not displayed
    #[must_use]
    pub fn hidden(id: impl Into<String>) -> Self {
        Self {
            displayed: Ok(false),
            ..Self::visible(id)
        }
    }

    /// An element whose displayed check fails
    #[must_use]
    pub fn failing(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            displayed: Err(message.into()),
            ..Self::visible(id)
        }
    }

    /// Delay the displayed check by `yields` scheduler yields
    #[must_use]
    pub const fn settle_after(mut self, yields: u32) -> Self {
        self.settle_after = yields;
        self
    }

    /// Make the element appear only after `delay`
    #[must_use]
    pub const fn appearing_after(mut self, delay: Duration) -> Self {
        self.appears_after = delay;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<String, Vec<MockElementSpec>>,
    implicit_wait: Duration,
    observed_waits: Vec<Duration>,
    current_url: String,
    window_size: Option<(u32, u32)>,
    typed: Vec<(String, String)>,
    call_history: Vec<String>,
    screenshot_png: Option<Vec<u8>>,
    navigation_failure: Option<String>,
    query_failure: Option<String>,
    fail_wait_reset: bool,
}

/// Mock driver for unit testing
///
/// Elements are registered per selector. Lookups honor the implicit wait:
/// an element registered with [`MockElementSpec::appearing_after`] is only
/// found when the current implicit wait covers its delay.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
    query_yields: u32,
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the elements returned for `selector`
    #[must_use]
    pub fn with_elements(self, selector: impl Into<String>, elements: Vec<MockElementSpec>) -> Self {
        self.add_elements(selector, elements);
        self
    }

    /// Yield `yields` times inside every element query
    #[must_use]
    pub const fn with_query_yields(mut self, yields: u32) -> Self {
        self.query_yields = yields;
        self
    }

    /// Set the PNG bytes returned by `screenshot`
    #[must_use]
    pub fn with_screenshot(self, png: Vec<u8>) -> Self {
        lock(&self.state).screenshot_png = Some(png);
        self
    }

    /// Register the elements returned for `selector`
    pub fn add_elements(&self, selector: impl Into<String>, elements: Vec<MockElementSpec>) {
        let _ = lock(&self.state).elements.insert(selector.into(), elements);
    }

    /// Make every navigation fail with `message`
    pub fn fail_navigation(&self, message: impl Into<String>) {
        lock(&self.state).navigation_failure = Some(message.into());
    }

    /// Make every element query fail with `message`
    pub fn fail_queries(&self, message: impl Into<String>) {
        lock(&self.state).query_failure = Some(message.into());
    }

    /// Make resetting the implicit wait to zero fail
    pub fn fail_wait_reset(&self) {
        lock(&self.state).fail_wait_reset = true;
    }

    /// Implicit wait currently set on the mock session
    #[must_use]
    pub fn current_implicit_wait(&self) -> Duration {
        lock(&self.state).implicit_wait
    }

    /// Implicit wait seen by each element query, in call order
    #[must_use]
    pub fn observed_waits(&self) -> Vec<Duration> {
        lock(&self.state).observed_waits.clone()
    }

    /// Last URL navigated to
    #[must_use]
    pub fn current_url(&self) -> String {
        lock(&self.state).current_url.clone()
    }

    /// Last window size set
    #[must_use]
    pub fn window_size(&self) -> Option<(u32, u32)> {
        lock(&self.state).window_size
    }

    /// Key sequences typed so far, as `(element id, keys)`
    #[must_use]
    pub fn typed(&self) -> Vec<(String, String)> {
        lock(&self.state).typed.clone()
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        lock(&self.state).call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        lock(&self.state)
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    fn record(&self, call: String) {
        lock(&self.state).call_history.push(call);
    }

    async fn yield_times(times: u32) {
        for _ in 0..times {
            tokio::task::yield_now().await;
        }
    }

    /// Elements for `selector` that exist within the current implicit wait
    async fn query(&self, selector: &str) -> PageResult<Vec<MockElement>> {
        let wait = {
            let mut state = lock(&self.state);
            state.call_history.push(format!("query:{selector}"));
            let wait = state.implicit_wait;
            state.observed_waits.push(wait);
            if let Some(message) = &state.query_failure {
                return Err(PageError::driver(message.clone()));
            }
            wait
        };

        Self::yield_times(self.query_yields).await;

        let state = lock(&self.state);
        Ok(state
            .elements
            .get(selector)
            .map(|specs| {
                specs
                    .iter()
                    .filter(|spec| spec.appears_after <= wait)
                    .map(|spec| MockElement {
                        id: spec.id.clone(),
                        selector: selector.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn element_spec(&self, element: &MockElement) -> PageResult<MockElementSpec> {
        lock(&self.state)
            .elements
            .get(&element.selector)
            .and_then(|specs| specs.iter().find(|s| s.id == element.id))
            .cloned()
            .ok_or_else(|| PageError::driver(format!("stale element reference: {}", element.id)))
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    type Element = MockElement;

    async fn find_element(&self, selector: &str) -> PageResult<MockElement> {
        self.query(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::element_not_found(selector))
    }

    async fn find_elements(&self, selector: &str) -> PageResult<Vec<MockElement>> {
        self.query(selector).await
    }

    async fn is_displayed(&self, element: &MockElement) -> PageResult<bool> {
        let spec = self.element_spec(element)?;
        Self::yield_times(spec.settle_after).await;
        self.record(format!("is_displayed:{}", element.id));
        spec.displayed.map_err(PageError::driver)
    }

    async fn implicit_wait(&self) -> PageResult<Duration> {
        Ok(self.current_implicit_wait())
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> PageResult<()> {
        let mut state = lock(&self.state);
        state
            .call_history
            .push(format!("set_implicit_wait:{}", timeout.as_millis()));
        if timeout.is_zero() && state.fail_wait_reset {
            return Err(PageError::driver("cannot reset implicit wait"));
        }
        state.implicit_wait = timeout;
        Ok(())
    }

    async fn navigate(&self, url: &str) -> PageResult<()> {
        let mut state = lock(&self.state);
        state.call_history.push(format!("navigate:{url}"));
        if let Some(message) = &state.navigation_failure {
            return Err(PageError::driver(message.clone()));
        }
        state.current_url = url.to_string();
        Ok(())
    }

    async fn screenshot(&self) -> PageResult<String> {
        self.record("screenshot".to_string());
        lock(&self.state)
            .screenshot_png
            .as_ref()
            .map(|png| base64::engine::general_purpose::STANDARD.encode(png))
            .ok_or_else(|| PageError::screenshot("No mock screenshot set"))
    }

    async fn set_window_size(&self, width: u32, height: u32) -> PageResult<()> {
        let mut state = lock(&self.state);
        state
            .call_history
            .push(format!("set_window_size:{width}x{height}"));
        state.window_size = Some((width, height));
        Ok(())
    }

    async fn send_keys(&self, element: &MockElement, keys: &str) -> PageResult<()> {
        let _ = self.element_spec(element)?;
        let mut state = lock(&self.state);
        state.call_history.push(format!("send_keys:{}", element.id));
        state.typed.push((element.id.clone(), keys.to_string()));
        Ok(())
    }
}
