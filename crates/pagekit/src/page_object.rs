//! Page Object Model support
//!
//! Test suites define one type per page or widget and expose the wrapped
//! [`Component`] through [`PageObject`]. Selector resolution then comes for
//! free, and page-specific actions are written as ordinary async methods.
//!
//! # Example
//!
//! ```ignore
//! struct LoginPage<D: PageDriver> {
//!     page: Page<D>,
//! }
//!
//! impl<D: PageDriver> PageObject<D> for LoginPage<D> {
//!     fn component(&self) -> &Component<D> {
//!         self.page.component()
//!     }
//! }
//!
//! impl<D: PageDriver> LoginPage<D> {
//!     pub async fn login(&self, username: &str, password: &str) -> PageResult<()> {
//!         let c = self.component();
//!         c.send_keys(&self.selector("username"), username).await?;
//!         c.send_keys(&self.selector("password"), password).await?;
//!         c.send_keys(&self.selector("password"), Key::Enter.as_str()).await
//!     }
//! }
//! ```

use crate::component::Component;
use crate::driver::PageDriver;
use crate::page::Page;

/// Trait for page objects representing a page or component in the UI.
pub trait PageObject<D: PageDriver> {
    /// The component backing this page object
    fn component(&self) -> &Component<D>;

    /// Selector for `name` under the component's base
    fn selector(&self, name: &str) -> String {
        self.component().selector(name)
    }

    /// Selector for `name` without the component's base
    fn selector_without_base(&self, name: &str) -> String {
        self.component().selector_without_base(name)
    }

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<D: PageDriver> PageObject<D> for Component<D> {
    fn component(&self) -> &Component<D> {
        self
    }
}

impl<D: PageDriver> PageObject<D> for Page<D> {
    fn component(&self) -> &Component<D> {
        Page::component(self)
    }
}
