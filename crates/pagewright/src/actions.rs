//! Element Action Helper.
//!
//! Thin action methods over a [`Session`], each resolving a locator to
//! exactly one live element (first match) and performing one imperative
//! operation. The wait policy is explicit per method and part of the public
//! contract:
//!
//! - [`click`](Actions::click) and [`fill`](Actions::fill) wait for the
//!   element to be clickable first, bounded by the configured timeout;
//! - every other element action acts immediately and fails with
//!   [`ElementNotFound`](crate::PagewrightError::ElementNotFound) when the
//!   locator matches nothing;
//! - [`count`](Actions::count) and [`is_present`](Actions::is_present) are
//!   total — zero matches is a value, not an error.
//!
//! `clear_cache` and `zoom` are whole-session side effects, not
//! element-scoped.

use crate::locator::Locator;
use crate::result::{PagewrightError, PagewrightResult};
use crate::session::{ElementHandle, Key, SelectBy, Session};
use crate::wait::{WaitOptions, Waiter};

/// Default document zoom (percent)
pub const DEFAULT_ZOOM_PERCENT: u32 = 100;

/// Action methods over one session.
///
/// Stateless beyond the borrowed session and the wait configuration; page
/// objects compose these into business flows.
#[derive(Debug)]
pub struct Actions<'s, S: Session> {
    session: &'s S,
    waiter: Waiter,
}

impl<'s, S: Session> Actions<'s, S> {
    /// Create with the default wait configuration
    #[must_use]
    pub fn new(session: &'s S) -> Self {
        Self {
            session,
            waiter: Waiter::new(),
        }
    }

    /// Create with custom wait options
    #[must_use]
    pub fn with_options(session: &'s S, options: WaitOptions) -> Self {
        Self {
            session,
            waiter: Waiter::with_options(options),
        }
    }

    /// The underlying session
    #[must_use]
    pub const fn session(&self) -> &'s S {
        self.session
    }

    /// The configured waiter
    #[must_use]
    pub const fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    // -------------------------------------------------------------------------
    // Waiting (delegates to the readiness helper)
    // -------------------------------------------------------------------------

    /// Wait for the element to be clickable, returning its handle
    pub fn wait_clickable(&self, locator: &Locator) -> PagewrightResult<ElementHandle> {
        self.waiter.wait_clickable(self.session, locator)
    }

    /// Wait for the element to be visible, returning its handle
    pub fn wait_visible(&self, locator: &Locator) -> PagewrightResult<ElementHandle> {
        self.waiter.wait_visible(self.session, locator)
    }

    /// Wait for the element to be hidden or absent
    pub fn wait_hidden(&self, locator: &Locator) -> PagewrightResult<()> {
        self.waiter.wait_hidden(self.session, locator)
    }

    /// Wait for the document to settle (ready state, body, no pending requests)
    pub fn wait_document_ready(&self) -> PagewrightResult<()> {
        self.waiter.wait_document_ready(self.session)
    }

    // -------------------------------------------------------------------------
    // Element actions — auto-wait policy
    // -------------------------------------------------------------------------

    /// Click the element. Waits for clickability first.
    pub fn click(&self, locator: &Locator) -> PagewrightResult<()> {
        let element = self.wait_clickable(locator)?;
        tracing::debug!(locator = %locator, "click");
        self.session.click(&element)
    }

    /// Clear the element and type text into it. Waits for clickability first.
    pub fn fill(&self, locator: &Locator, text: &str) -> PagewrightResult<()> {
        let element = self.wait_clickable(locator)?;
        tracing::debug!(locator = %locator, "fill");
        self.session.clear(&element)?;
        self.session.type_text(&element, text)
    }

    // -------------------------------------------------------------------------
    // Element actions — immediate, loud on zero matches
    // -------------------------------------------------------------------------

    /// Clear the element's value. No implicit wait.
    pub fn clear(&self, locator: &Locator) -> PagewrightResult<()> {
        let element = self.session.find(locator)?;
        self.session.clear(&element)
    }

    /// Send Enter to the element. No implicit wait.
    pub fn press_enter(&self, locator: &Locator) -> PagewrightResult<()> {
        let element = self.session.find(locator)?;
        self.session.send_key(&element, Key::Enter)
    }

    /// Send Tab to the element. No implicit wait.
    pub fn press_tab(&self, locator: &Locator) -> PagewrightResult<()> {
        let element = self.session.find(locator)?;
        self.session.send_key(&element, Key::Tab)
    }

    /// Scroll the element into view. No implicit wait.
    pub fn scroll_into_view(&self, locator: &Locator) -> PagewrightResult<()> {
        let _ = self.session.find(locator)?;
        let script = format!("{}.scrollIntoView(true);", locator.to_query());
        self.session.execute_script(&script).map(|_| ())
    }

    /// Choose a `<select>` option by its rendered text. No implicit wait.
    pub fn select_by_text(&self, locator: &Locator, text: &str) -> PagewrightResult<()> {
        let element = self.session.find(locator)?;
        self.session
            .select_option(&element, &SelectBy::VisibleText(text.to_string()))
    }

    /// Choose a `<select>` option by its `value` attribute. No implicit wait.
    pub fn select_by_value(&self, locator: &Locator, value: &str) -> PagewrightResult<()> {
        let element = self.session.find(locator)?;
        self.session
            .select_option(&element, &SelectBy::Value(value.to_string()))
    }

    /// Choose a `<select>` option by index. No implicit wait.
    pub fn select_by_index(&self, locator: &Locator, index: usize) -> PagewrightResult<()> {
        let element = self.session.find(locator)?;
        self.session.select_option(&element, &SelectBy::Index(index))
    }

    /// Rendered text of the element. No implicit wait.
    pub fn text(&self, locator: &Locator) -> PagewrightResult<String> {
        let element = self.session.find(locator)?;
        self.session.text_of(&element)
    }

    /// Attribute value of the element. No implicit wait.
    pub fn attribute(&self, locator: &Locator, name: &str) -> PagewrightResult<Option<String>> {
        let element = self.session.find(locator)?;
        self.session.attribute_of(&element, name)
    }

    /// Whether the first match is enabled. No implicit wait, loud on miss.
    pub fn is_enabled(&self, locator: &Locator) -> PagewrightResult<bool> {
        let state = self.session.state(locator)?;
        if !state.present {
            return Err(PagewrightError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        Ok(state.enabled)
    }

    /// Whether the first match is disabled. No implicit wait, loud on miss.
    pub fn is_disabled(&self, locator: &Locator) -> PagewrightResult<bool> {
        self.is_enabled(locator).map(|enabled| !enabled)
    }

    // -------------------------------------------------------------------------
    // Element queries — total
    // -------------------------------------------------------------------------

    /// Number of live matches. Zero is a value, not an error.
    pub fn count(&self, locator: &Locator) -> PagewrightResult<usize> {
        self.session.count(locator)
    }

    /// Whether at least one element matches. Never errs on zero matches.
    pub fn is_present(&self, locator: &Locator) -> PagewrightResult<bool> {
        Ok(self.session.count(locator)? > 0)
    }

    // -------------------------------------------------------------------------
    // Session-wide operations
    // -------------------------------------------------------------------------

    /// Navigate to a URL
    pub fn navigate_to(&self, url: &str) -> PagewrightResult<()> {
        tracing::debug!(url, "navigate");
        self.session.navigate_to(url)
    }

    /// Reload the current document
    pub fn refresh(&self) -> PagewrightResult<()> {
        self.session.refresh()
    }

    /// Current document URL
    pub fn current_url(&self) -> PagewrightResult<String> {
        self.session.current_url()
    }

    /// Current document title
    pub fn title(&self) -> PagewrightResult<String> {
        self.session.title()
    }

    /// Serialized source of the current document
    pub fn page_source(&self) -> PagewrightResult<String> {
        self.session.page_source()
    }

    /// Scroll the window to the document bottom
    pub fn scroll_to_bottom(&self) -> PagewrightResult<()> {
        self.session
            .execute_script("window.scrollTo(0, document.body.scrollHeight);")
            .map(|_| ())
    }

    /// Delete cookies and clear local/session storage
    pub fn clear_cache(&self) -> PagewrightResult<()> {
        self.session.delete_cookies()?;
        self.session
            .execute_script("window.localStorage.clear();")?;
        self.session
            .execute_script("window.sessionStorage.clear();")
            .map(|_| ())
    }

    /// Set the document zoom level (percent)
    pub fn zoom(&self, percent: u32) -> PagewrightResult<()> {
        self.session
            .execute_script(&format!("document.body.style.zoom='{percent}%'"))?;
        self.session
            .execute_script("document.body.style.overflow='auto';")
            .map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::{ActionRecord, MockElement, MockSession};
    use std::time::{Duration, Instant};

    fn fast_actions(session: &MockSession) -> Actions<'_, MockSession> {
        Actions::with_options(
            session,
            WaitOptions::new().with_timeout(150).with_poll_interval(5),
        )
    }

    mod auto_wait_tests {
        use super::*;

        #[test]
        fn test_click_waits_for_late_element() {
            let session = MockSession::new();
            let locator = Locator::css("#go");
            session.reveal_after(&locator, MockElement::new("button"), Duration::from_millis(30));

            let start = Instant::now();
            fast_actions(&session).click(&locator).unwrap();
            assert!(start.elapsed() >= Duration::from_millis(30));
            assert_eq!(session.journal(), vec![ActionRecord::Click("#go".into())]);
        }

        #[test]
        fn test_click_on_missing_element_times_out() {
            let session = MockSession::new();
            let err = fast_actions(&session)
                .click(&Locator::css("#missing"))
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(session.journal().is_empty());
        }

        #[test]
        fn test_fill_clears_then_types() {
            let session = MockSession::new();
            let locator = Locator::css("#user");
            session.insert(&locator, MockElement::new("input").with_value("stale"));

            fast_actions(&session).fill(&locator, "alice").unwrap();
            assert_eq!(session.value_of(&locator).as_deref(), Some("alice"));
        }

        #[test]
        fn test_fill_waits_for_enabled() {
            let session = MockSession::new();
            let locator = Locator::css("#user");
            session.insert(&locator, MockElement::new("input").disabled());

            let err = fast_actions(&session).fill(&locator, "x").unwrap_err();
            assert!(err.is_timeout());
        }
    }

    mod immediate_action_tests {
        use super::*;

        #[test]
        fn test_clear_fails_immediately_on_miss() {
            let session = MockSession::new();
            let start = Instant::now();
            let err = fast_actions(&session)
                .clear(&Locator::css("#missing"))
                .unwrap_err();
            assert!(matches!(err, PagewrightError::ElementNotFound { .. }));
            assert!(start.elapsed() < Duration::from_millis(100));
        }

        #[test]
        fn test_press_enter_and_tab() {
            let session = MockSession::new();
            let locator = Locator::css("#search");
            session.insert(&locator, MockElement::new("input"));

            let actions = fast_actions(&session);
            actions.press_enter(&locator).unwrap();
            actions.press_tab(&locator).unwrap();

            assert_eq!(
                session.journal(),
                vec![
                    ActionRecord::Key {
                        locator: "#search".into(),
                        key: Key::Enter,
                    },
                    ActionRecord::Key {
                        locator: "#search".into(),
                        key: Key::Tab,
                    },
                ]
            );
        }

        #[test]
        fn test_scroll_into_view_compiles_query() {
            let session = MockSession::new();
            let locator = Locator::css("#footer");
            session.insert(&locator, MockElement::new("div"));

            fast_actions(&session).scroll_into_view(&locator).unwrap();
            match &session.journal()[0] {
                ActionRecord::Script(script) => {
                    assert!(script.contains("scrollIntoView"));
                    assert!(script.contains("#footer"));
                }
                other => panic!("expected script record, got {other:?}"),
            }
        }

        #[test]
        fn test_select_strategies() {
            let session = MockSession::new();
            let locator = Locator::css("select#lang");
            session.insert(
                &locator,
                MockElement::new("select")
                    .with_option("English", Some("en"))
                    .with_option("Deutsch", Some("de")),
            );

            let actions = fast_actions(&session);
            actions.select_by_text(&locator, "Deutsch").unwrap();
            assert_eq!(session.selected_index(&locator), Some(1));
            actions.select_by_value(&locator, "en").unwrap();
            assert_eq!(session.selected_index(&locator), Some(0));
            actions.select_by_index(&locator, 1).unwrap();
            assert_eq!(session.selected_index(&locator), Some(1));
        }

        #[test]
        fn test_text_and_attribute() {
            let session = MockSession::new();
            let locator = Locator::xpath("//h1");
            session.insert(
                &locator,
                MockElement::new("h1")
                    .with_text("Dashboard")
                    .with_attribute("class", "title"),
            );

            let actions = fast_actions(&session);
            assert_eq!(actions.text(&locator).unwrap(), "Dashboard");
            assert_eq!(
                actions.attribute(&locator, "class").unwrap().as_deref(),
                Some("title")
            );
            assert!(actions.attribute(&locator, "id").unwrap().is_none());
        }

        #[test]
        fn test_enabled_checks_are_loud_on_miss() {
            let session = MockSession::new();
            let actions = fast_actions(&session);
            assert!(matches!(
                actions.is_enabled(&Locator::css("#missing")).unwrap_err(),
                PagewrightError::ElementNotFound { .. }
            ));

            let locator = Locator::css("#go");
            session.insert(&locator, MockElement::new("button").disabled());
            assert!(!actions.is_enabled(&locator).unwrap());
            assert!(actions.is_disabled(&locator).unwrap());
        }
    }

    mod total_query_tests {
        use super::*;

        #[test]
        fn test_count_and_presence_never_err() {
            let session = MockSession::new();
            let actions = fast_actions(&session);
            assert_eq!(actions.count(&Locator::css("li")).unwrap(), 0);
            assert!(!actions.is_present(&Locator::css("li")).unwrap());

            let locator = Locator::css("li.row");
            session.insert(&locator, MockElement::new("li").with_match_count(3));
            assert_eq!(actions.count(&locator).unwrap(), 3);
            assert!(actions.is_present(&locator).unwrap());
        }
    }

    mod session_wide_tests {
        use super::*;

        #[test]
        fn test_clear_cache_clears_cookies_and_storage() {
            let session = MockSession::new();
            fast_actions(&session).clear_cache().unwrap();

            let journal = session.journal();
            assert_eq!(journal[0], ActionRecord::DeleteCookies);
            assert_eq!(
                journal[1],
                ActionRecord::Script("window.localStorage.clear();".into())
            );
            assert_eq!(
                journal[2],
                ActionRecord::Script("window.sessionStorage.clear();".into())
            );
        }

        #[test]
        fn test_zoom_sets_document_style() {
            let session = MockSession::new();
            fast_actions(&session).zoom(150).unwrap();
            match &session.journal()[0] {
                ActionRecord::Script(script) => assert!(script.contains("zoom='150%'")),
                other => panic!("expected script record, got {other:?}"),
            }
        }

        #[test]
        fn test_navigation_roundtrip() {
            let session = MockSession::new();
            let actions = fast_actions(&session);
            actions.navigate_to("https://example.test/login").unwrap();
            assert_eq!(
                actions.current_url().unwrap(),
                "https://example.test/login"
            );
        }

        #[test]
        fn test_scroll_to_bottom_script() {
            let session = MockSession::new();
            fast_actions(&session).scroll_to_bottom().unwrap();
            assert_eq!(
                session.journal(),
                vec![ActionRecord::Script(
                    "window.scrollTo(0, document.body.scrollHeight);".into()
                )]
            );
        }
    }
}
