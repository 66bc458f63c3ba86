//! pagekit: page objects for browser-driven end-to-end tests
//!
//! Tests describe UI regions as [`Component`]s (a [`SelectorSpec`] bound to
//! a driver [`Session`]) and pages as [`Page`]s (a component with a base
//! URL). The driver itself sits behind the [`PageDriver`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  test ──► Page ──► Component ──► SelectorSpec::resolve (pure)      │
//! │                        │                                         │
//! │                        ├──► WaitWindow ──► PageDriver::find_*     │
//! │                        │    (session lock, wait reset to 0)      │
//! │                        │                                         │
//! │                        └──► count_visible ──► is_displayed × N    │
//! │                             (fan-out, countdown join)            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

mod component;
mod config;
mod driver;
mod keys;
mod page;
mod page_object;
mod result;
mod screenshot;
mod selector;
mod session;

/// Visible-element counting
pub mod visibility;
/// Scoped implicit wait
pub mod wait;

pub use component::{Component, DEFAULT_FLAKY_SLEEP_MS};
pub use config::{Capabilities, RunnerConfig, WindowSize, DEFAULT_DRIVER_ADDRESS};
pub use driver::{MockDriver, MockElement, MockElementSpec, PageDriver};
pub use keys::{repeat, Key};
pub use page::{compose_url, OpenOptions, Page};
pub use page_object::PageObject;
pub use result::{PageError, PageResult};
pub use screenshot::{ScreenshotStore, DEFAULT_SCREENSHOT_DIR};
pub use selector::{SelectorSpec, SelectorSpecBuilder, BASE_SEPARATOR};
pub use session::{Session, DEFAULT_WAIT_MS};
pub use visibility::{count_displayed, count_visible};
pub use wait::{with_default_wait, with_wait, WaitWindow};

/// Everything a page-object test module usually needs
pub mod prelude {
    pub use super::component::*;
    pub use super::driver::*;
    pub use super::keys::*;
    pub use super::page::*;
    pub use super::page_object::*;
    pub use super::result::*;
    pub use super::screenshot::*;
    pub use super::selector::*;
    pub use super::session::*;
}
