//! Components: a selector spec bound to a driver session.
//!
//! A component wraps one region of the UI. Its selectors are resolved
//! relative to the component's base selector, and every query goes through
//! the shared [`Session`].

use crate::driver::PageDriver;
use crate::keys;
use crate::result::PageResult;
use crate::screenshot::ScreenshotStore;
use crate::selector::SelectorSpec;
use crate::session::Session;
use crate::visibility;
use crate::wait::with_wait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default pause for [`Component::flaky_timing`] (500ms)
pub const DEFAULT_FLAKY_SLEEP_MS: u64 = 500;

/// A UI region: selectors plus a handle to the driver session.
#[derive(Debug)]
pub struct Component<D: PageDriver> {
    session: Arc<Session<D>>,
    selectors: SelectorSpec,
}

impl<D: PageDriver> Clone for Component<D> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            selectors: self.selectors.clone(),
        }
    }
}

impl<D: PageDriver> Component<D> {
    /// Bind `selectors` to `session`
    #[must_use]
    pub fn new(session: Arc<Session<D>>, selectors: SelectorSpec) -> Self {
        Self { session, selectors }
    }

    /// Component with no base and no named selectors
    #[must_use]
    pub fn bare(session: Arc<Session<D>>) -> Self {
        Self::new(session, SelectorSpec::default())
    }

    /// The shared session
    #[must_use]
    pub fn session(&self) -> &Arc<Session<D>> {
        &self.session
    }

    /// The session's driver
    #[must_use]
    pub fn driver(&self) -> &D {
        self.session.driver()
    }

    /// The component's selector spec
    #[must_use]
    pub const fn selectors(&self) -> &SelectorSpec {
        &self.selectors
    }

    /// See [`SelectorSpec::resolve`]
    #[must_use]
    pub fn resolve(&self, name: Option<&str>, include_base: bool) -> String {
        self.selectors.resolve(name, include_base)
    }

    /// Selector for `name` under the component's base
    #[must_use]
    pub fn selector(&self, name: &str) -> String {
        self.selectors.selector(name)
    }

    /// Selector for `name` without the component's base
    #[must_use]
    pub fn selector_without_base(&self, name: &str) -> String {
        self.selectors.selector_without_base(name)
    }

    /// Wait up to the session's default wait for `selector` to match.
    pub async fn wait_for_element(&self, selector: &str) -> PageResult<D::Element> {
        self.wait_for_element_within(selector, self.session.default_wait())
            .await
    }

    /// Wait up to `timeout` for `selector` to match.
    pub async fn wait_for_element_within(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> PageResult<D::Element> {
        let selector = selector.to_string();
        with_wait(&self.session, timeout, move |driver| async move {
            driver.find_element(&selector).await
        })
        .await
    }

    /// Wait for the named selector (scoped under the base) to match.
    pub async fn wait_for(&self, name: &str) -> PageResult<D::Element> {
        self.wait_for_element(&self.selector(name)).await
    }

    /// Number of displayed elements matching `selector`
    pub async fn count_visible(&self, selector: &str) -> PageResult<usize> {
        visibility::count_visible(self.driver(), selector).await
    }

    /// Number of displayed elements matching the named selector
    pub async fn count_visible_named(&self, name: &str) -> PageResult<usize> {
        self.count_visible(&self.selector(name)).await
    }

    /// Type `keys` into the first element matching `selector`
    pub async fn send_keys(&self, selector: &str, keys: &str) -> PageResult<()> {
        let element = self.driver().find_element(selector).await?;
        self.driver().send_keys(&element, keys).await
    }

    /// `keys` repeated `count` times
    #[must_use]
    pub fn repeat(keys: &str, count: usize) -> String {
        keys::repeat(keys, count)
    }

    /// Sleep to paper over a timing race. Defaults to 500ms.
    ///
    /// Meant to be easy to grep for: every call marks a test that still
    /// needs a real synchronization point.
    pub async fn flaky_timing(&self, pause: Option<Duration>) {
        let pause = pause.unwrap_or(Duration::from_millis(DEFAULT_FLAKY_SLEEP_MS));
        tracing::debug!(
            session = %self.session.id(),
            pause_ms = pause.as_millis() as u64,
            "flaky timing pause"
        );
        tokio::time::sleep(pause).await;
    }

    /// Capture the viewport and write it through `store`
    pub async fn capture_screenshot(
        &self,
        store: &ScreenshotStore,
        name: &str,
    ) -> PageResult<PathBuf> {
        let encoded = self.driver().screenshot().await?;
        store.save(name, &encoded).await
    }

    /// Resize the browser window
    pub async fn set_window_size(&self, width: u32, height: u32) -> PageResult<()> {
        self.driver().set_window_size(width, height).await
    }
}
