//! Pages: components that know their URL.

use crate::component::Component;
use crate::driver::PageDriver;
use crate::result::{PageError, PageResult};
use crate::selector::SelectorSpec;
use crate::session::Session;
use std::sync::Arc;
use std::time::Duration;

/// Attach `append` to `base` as a query fragment.
///
/// Uses `&` when `base` already carries a query string, `?` otherwise. An
/// empty `append` leaves `base` untouched.
#[must_use]
pub fn compose_url(base: &str, append: &str) -> String {
    if append.is_empty() {
        return base.to_string();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{append}")
}

/// Options for [`Page::open_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Pause after navigation so the application can finish bootstrapping
    pub settle: Option<Duration>,
}

impl OpenOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause for `settle` after navigating
    #[must_use]
    pub const fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = Some(settle);
        self
    }
}

/// A component rooted at a base URL.
#[derive(Debug)]
pub struct Page<D: PageDriver> {
    component: Component<D>,
    base_url: String,
}

impl<D: PageDriver> Clone for Page<D> {
    fn clone(&self) -> Self {
        Self {
            component: self.component.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<D: PageDriver> Page<D> {
    /// Page at `base_url` with `selectors`
    #[must_use]
    pub fn new(session: Arc<Session<D>>, base_url: impl Into<String>, selectors: SelectorSpec) -> Self {
        Self::from_component(Component::new(session, selectors), base_url)
    }

    /// Page at `base_url` with no selectors
    #[must_use]
    pub fn at(session: Arc<Session<D>>, base_url: impl Into<String>) -> Self {
        Self::new(session, base_url, SelectorSpec::default())
    }

    /// Give an existing component a URL
    #[must_use]
    pub fn from_component(component: Component<D>, base_url: impl Into<String>) -> Self {
        Self {
            component,
            base_url: base_url.into(),
        }
    }

    /// Base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying component
    #[must_use]
    pub const fn component(&self) -> &Component<D> {
        &self.component
    }

    /// URL [`Page::open`] would navigate to
    #[must_use]
    pub fn url_for(&self, append: &str) -> String {
        compose_url(&self.base_url, append)
    }

    /// Navigate to the base URL, with `append` as extra query parameters.
    pub async fn open(&self, append: &str) -> PageResult<()> {
        self.open_with(append, &OpenOptions::default()).await
    }

    /// [`Page::open`] with options.
    pub async fn open_with(&self, append: &str, options: &OpenOptions) -> PageResult<()> {
        let url = self.url_for(append);
        tracing::debug!(session = %self.component.session().id(), %url, "opening page");

        self.component
            .driver()
            .navigate(&url)
            .await
            .map_err(|err| match err {
                PageError::Navigation { .. } => err,
                other => PageError::navigation(&url, other.to_string()),
            })?;

        if let Some(settle) = options.settle {
            tokio::time::sleep(settle).await;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    mod compose_url_tests {
        use super::*;

        #[test]
        fn test_empty_append() {
            assert_eq!(compose_url("http://x/y", ""), "http://x/y");
        }

        #[test]
        fn test_first_parameter() {
            assert_eq!(compose_url("http://x/y", "a=1"), "http://x/y?a=1");
        }

        #[test]
        fn test_existing_query() {
            assert_eq!(compose_url("http://x/y?b=2", "a=1"), "http://x/y?b=2&a=1");
        }

        #[test]
        fn test_trailing_question_mark() {
            assert_eq!(compose_url("http://x/y?", "a=1"), "http://x/y?&a=1");
        }
    }

    mod open_tests {
        use super::*;

        fn page(base: &str) -> Page<MockDriver> {
            Page::at(Session::new(MockDriver::new()), base)
        }

        #[tokio::test]
        async fn test_open_base() {
            let page = page("http://x/y");
            page.open("").await.unwrap();
            assert_eq!(page.component().driver().current_url(), "http://x/y");
        }

        #[tokio::test]
        async fn test_open_with_query() {
            let page = page("http://x/y");
            page.open("a=1").await.unwrap();
            assert_eq!(page.component().driver().current_url(), "http://x/y?a=1");
        }

        #[tokio::test]
        async fn test_open_appends_to_existing_query() {
            let page = page("http://x/y?b=2");
            page.open("a=1").await.unwrap();
            assert_eq!(
                page.component().driver().current_url(),
                "http://x/y?b=2&a=1"
            );
        }

        #[tokio::test]
        async fn test_open_does_not_change_page() {
            let page = page("http://x/y");
            page.open("a=1").await.unwrap();
            page.open("c=3").await.unwrap();
            assert_eq!(page.base_url(), "http://x/y");
            assert_eq!(page.component().driver().current_url(), "http://x/y?c=3");
        }

        #[tokio::test]
        async fn test_navigation_failure_carries_url() {
            let page = page("http://x/y");
            page.component()
                .driver()
                .fail_navigation("net::ERR_CONNECTION_REFUSED");

            let err = page.open("a=1").await.unwrap_err();
            match err {
                PageError::Navigation { url, message } => {
                    assert_eq!(url, "http://x/y?a=1");
                    assert!(message.contains("ERR_CONNECTION_REFUSED"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_open_with_settle() {
            let page = page("http://x/y");
            let options = OpenOptions::new().with_settle(Duration::from_millis(5));
            let start = std::time::Instant::now();
            page.open_with("", &options).await.unwrap();
            assert!(start.elapsed() >= Duration::from_millis(5));
        }
    }

    #[test]
    fn test_page_shares_component_behavior() {
        let spec = SelectorSpec::builder()
            .with_base("form#signup")
            .with_selector("email", "input[type=email]")
            .build()
            .unwrap();
        let page = Page::new(Session::new(MockDriver::new()), "http://app/signup", spec);
        assert_eq!(page.component().selector("email"), "form#signup input[type=email]");
        assert_eq!(page.url_for("ref=ad"), "http://app/signup?ref=ad");
    }
}
