//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an immutable selector template, defined statically per
//! page object, optionally parameterized by a runtime value via simple
//! `{}` substitution. Locators compile to JavaScript query expressions so
//! a session can resolve them inside the live document.

use serde::{Deserialize, Serialize};

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., `button.primary`)
    Css(String),
    /// XPath selector (e.g., `//button[@id='login']`)
    XPath(String),
}

impl Selector {
    /// The raw selector string
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

/// A locator for finding elements.
///
/// Holds a selector template; [`Locator::bind`] substitutes a runtime value
/// into the first `{}` placeholder, leaving the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
}

impl Locator {
    /// Create a locator from a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
        }
    }

    /// Create a locator from an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::XPath(selector.into()),
        }
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self { selector }
    }

    /// Substitute a runtime value into the template's `{}` placeholder.
    ///
    /// Templates carry at most one placeholder; only the first occurrence
    /// is replaced.
    #[must_use]
    pub fn bind(&self, value: &str) -> Self {
        let substituted = |s: &String| s.replacen("{}", value, 1);
        let selector = match &self.selector {
            Selector::Css(s) => Selector::Css(substituted(s)),
            Selector::XPath(s) => Selector::XPath(substituted(s)),
        };
        Self { selector }
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// JavaScript expression resolving to the first matching element (or null)
    #[must_use]
    pub fn to_query(&self) -> String {
        match &self.selector {
            Selector::Css(s) => format!("document.querySelector({s:?})"),
            Selector::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
        }
    }

    /// JavaScript expression resolving to the number of matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match &self.selector {
            Selector::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Selector::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength")
            }
        }
    }

    /// JavaScript expression resolving to a `{present, visible, enabled}`
    /// state object for the first matching element
    #[must_use]
    pub fn to_state_query(&self) -> String {
        format!(
            "(() => {{ \
                const el = {query}; \
                if (!el) return {{present: false, visible: false, enabled: false}}; \
                const style = window.getComputedStyle(el); \
                const visible = style.visibility !== 'hidden' \
                    && style.display !== 'none' \
                    && el.getClientRects().length > 0; \
                return {{present: true, visible, enabled: !el.disabled}}; \
            }})()",
            query = self.to_query()
        )
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selector.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_as_str() {
            let sel = Selector::Css("button.primary".into());
            assert_eq!(sel.as_str(), "button.primary");
        }

        #[test]
        fn test_xpath_as_str() {
            let sel = Selector::XPath("//div[@id='x']".into());
            assert_eq!(sel.as_str(), "//div[@id='x']");
        }
    }

    mod bind_tests {
        use super::*;

        #[test]
        fn test_bind_substitutes_placeholder() {
            let template = Locator::xpath("//a[text()='{}']");
            let bound = template.bind("Products");
            assert_eq!(bound.to_string(), "//a[text()='Products']");
        }

        #[test]
        fn test_bind_leaves_template_untouched() {
            let template = Locator::xpath("//a[text()='{}']");
            let _ = template.bind("Products");
            assert_eq!(template.to_string(), "//a[text()='{}']");
        }

        #[test]
        fn test_bind_replaces_first_occurrence_only() {
            let template = Locator::css("[data-row='{}'] [data-col='{}']");
            let bound = template.bind("3");
            assert_eq!(bound.to_string(), "[data-row='3'] [data-col='{}']");
        }

        #[test]
        fn test_bind_without_placeholder_is_identity() {
            let locator = Locator::css("#login");
            assert_eq!(locator.bind("x"), locator);
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let locator = Locator::css("#user");
            assert_eq!(locator.to_query(), "document.querySelector(\"#user\")");
        }

        #[test]
        fn test_xpath_query_uses_evaluate() {
            let locator = Locator::xpath("//input[@name='usr']");
            let query = locator.to_query();
            assert!(query.starts_with("document.evaluate("));
            assert!(query.contains("FIRST_ORDERED_NODE_TYPE"));
        }

        #[test]
        fn test_css_count_query() {
            let locator = Locator::css("li.item");
            assert_eq!(
                locator.to_count_query(),
                "document.querySelectorAll(\"li.item\").length"
            );
        }

        #[test]
        fn test_xpath_count_query_uses_snapshot() {
            let locator = Locator::xpath("//li");
            assert!(locator.to_count_query().contains("snapshotLength"));
        }

        #[test]
        fn test_state_query_embeds_element_query() {
            let locator = Locator::css("#go");
            let state = locator.to_state_query();
            assert!(state.contains(&locator.to_query()));
            assert!(state.contains("visible"));
            assert!(state.contains("enabled"));
        }
    }
}
