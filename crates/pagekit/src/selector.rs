//! Selector composition.
//!
//! A [`SelectorSpec`] maps logical names to CSS selectors and carries an
//! optional base selector for the component root. Resolution is pure string
//! composition and never fails.
//!
//! ```
//! use pagekit::SelectorSpec;
//!
//! let spec = SelectorSpec::builder()
//!     .with_base("#login")
//!     .with_selector("submit", "button[type='submit']")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(spec.selector("submit"), "#login button[type='submit']");
//! assert_eq!(spec.selector_without_base("submit"), "button[type='submit']");
//! ```

use crate::result::{PageError, PageResult};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Separator placed between the base selector and the named part
pub const BASE_SEPARATOR: &str = " ";

/// Immutable mapping from logical selector names to CSS selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelectorSpec")]
pub struct SelectorSpec {
    /// Root selector prepended by [`SelectorSpec::selector`]; may be empty
    #[serde(default)]
    base: String,
    /// Named selectors
    #[serde(default)]
    selectors: BTreeMap<String, String>,
}

impl SelectorSpec {
    /// Spec with a base selector and no named selectors
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            selectors: BTreeMap::new(),
        }
    }

    /// Start building a spec
    #[must_use]
    pub fn builder() -> SelectorSpecBuilder {
        SelectorSpecBuilder::new()
    }

    /// Parse a spec from YAML (`base:` and `selectors:` keys).
    ///
    /// A name listed twice under `selectors:` is a [`PageError::Config`].
    pub fn from_yaml_str(yaml: &str) -> PageResult<Self> {
        let raw: RawSelectorSpec = serde_yaml_ng::from_str(yaml)?;
        raw.build()
    }

    /// Load a spec from a YAML file
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// The base selector
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Raw selector registered under `name`, without the base
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.selectors.get(name).map(String::as_str)
    }

    /// Registered selector names in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.selectors.keys().map(String::as_str).collect()
    }

    /// Number of named selectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// True when no named selectors are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Resolve `name` to a concrete selector.
    ///
    /// An absent or unknown name contributes an empty part. With
    /// `include_base` and a non-empty base the result is always
    /// `base + " " + part`, so an unknown name yields `"base "`.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>, include_base: bool) -> String {
        let part = match name.and_then(|n| self.lookup(n)) {
            Some(selector) => selector,
            None => {
                if let Some(n) = name {
                    tracing::debug!(name = n, base = %self.base, "selector name not registered");
                }
                ""
            }
        };

        if include_base && !self.base.is_empty() {
            let mut resolved = String::with_capacity(self.base.len() + 1 + part.len());
            resolved.push_str(&self.base);
            resolved.push_str(BASE_SEPARATOR);
            resolved.push_str(part);
            resolved
        } else {
            part.to_string()
        }
    }

    /// Selector for `name` scoped under the base selector
    #[must_use]
    pub fn selector(&self, name: &str) -> String {
        self.resolve(Some(name), true)
    }

    /// Selector for `name` ignoring the base selector
    #[must_use]
    pub fn selector_without_base(&self, name: &str) -> String {
        self.resolve(Some(name), false)
    }
}

/// Selector spec as written, with entries in document order and duplicates kept
#[derive(Debug, Deserialize)]
struct RawSelectorSpec {
    #[serde(default)]
    base: String,
    #[serde(default, deserialize_with = "entries_in_order")]
    selectors: Vec<(String, String)>,
}

impl RawSelectorSpec {
    fn build(self) -> PageResult<SelectorSpec> {
        self.selectors
            .into_iter()
            .fold(SelectorSpec::builder().with_base(self.base), |builder, (name, selector)| {
                builder.with_selector(name, selector)
            })
            .build()
    }
}

impl TryFrom<RawSelectorSpec> for SelectorSpec {
    type Error = PageError;

    fn try_from(raw: RawSelectorSpec) -> PageResult<Self> {
        raw.build()
    }
}

fn entries_in_order<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of selector names to CSS selectors")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Builder for [`SelectorSpec`]; rejects duplicate names at `build`.
#[derive(Debug, Clone, Default)]
pub struct SelectorSpecBuilder {
    base: String,
    entries: Vec<(String, String)>,
}

impl SelectorSpecBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base selector
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Register a named selector
    #[must_use]
    pub fn with_selector(mut self, name: impl Into<String>, selector: impl Into<String>) -> Self {
        self.entries.push((name.into(), selector.into()));
        self
    }

    /// Build the spec, failing if a name was registered twice
    pub fn build(self) -> PageResult<SelectorSpec> {
        let mut selectors = BTreeMap::new();
        for (name, selector) in self.entries {
            if selectors.contains_key(&name) {
                return Err(PageError::config(format!(
                    "selector `{name}` is registered more than once"
                )));
            }
            let _ = selectors.insert(name, selector);
        }
        Ok(SelectorSpec {
            base: self.base,
            selectors,
        })
    }
}
