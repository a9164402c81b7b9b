//! In-memory [`Session`] implementation.
//!
//! Backs the default (no-browser) build and the unit tests: an element store
//! with scripted state transitions, readiness knobs, and a journal of every
//! imperative action, so waits and page flows are fully testable without a
//! browser.

use crate::locator::Locator;
use crate::result::{PagewrightError, PagewrightResult};
use crate::session::{ElementHandle, ElementState, Key, ReadyProbe, SelectBy, Session};
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One `<option>` of a mock `<select>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockOption {
    /// Rendered option text
    pub text: String,
    /// Literal `value` attribute, when present
    pub value: Option<String>,
}

/// A scripted element in the mock document
#[derive(Debug, Clone)]
pub struct MockElement {
    tag_name: String,
    text: String,
    value: String,
    visible: bool,
    enabled: bool,
    match_count: usize,
    attributes: HashMap<String, String>,
    options: Vec<MockOption>,
    selected: Option<usize>,
}

impl MockElement {
    /// Create a visible, enabled element
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: String::new(),
            value: String::new(),
            visible: true,
            enabled: true,
            match_count: 1,
            attributes: HashMap::new(),
            options: Vec::new(),
            selected: None,
        }
    }

    /// Set the rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the current value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark the element hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the element disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Report this many matches for the locator (first match is this element)
    #[must_use]
    pub const fn with_match_count(mut self, count: usize) -> Self {
        self.match_count = count;
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a `<select>` option
    #[must_use]
    pub fn with_option(mut self, text: impl Into<String>, value: Option<&str>) -> Self {
        self.options.push(MockOption {
            text: text.into(),
            value: value.map(str::to_string),
        });
        self
    }

    fn state(&self) -> ElementState {
        ElementState {
            present: true,
            visible: self.visible,
            enabled: self.enabled,
        }
    }
}

/// Journal entry for one imperative operation
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRecord {
    /// Element clicked
    Click(String),
    /// Element value cleared
    Clear(String),
    /// Text typed into an element
    Type {
        /// Locator string
        locator: String,
        /// Typed text
        text: String,
    },
    /// Non-text key sent to an element
    Key {
        /// Locator string
        locator: String,
        /// Key sent
        key: Key,
    },
    /// Option chosen in a `<select>`
    Select {
        /// Locator string
        locator: String,
        /// Selection strategy
        by: SelectBy,
    },
    /// Script evaluated
    Script(String),
    /// Navigation performed
    Navigate(String),
    /// Document reloaded
    Refresh,
    /// Cookies deleted
    DeleteCookies,
}

#[derive(Debug, Default)]
struct Inner {
    elements: HashMap<String, MockElement>,
    scheduled: Vec<(String, MockElement, Instant)>,
    url: String,
    title: String,
    page_source: String,
    ready: ReadyProbe,
    network_settles_at: Option<Instant>,
    journal: Vec<ActionRecord>,
}

/// In-memory session with scripted state transitions.
///
/// Single-threaded by design, matching the session model: interior
/// mutability via `RefCell`, no locking.
#[derive(Debug, Default)]
pub struct MockSession {
    inner: RefCell<Inner>,
}

impl MockSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an element into the document
    pub fn insert(&self, locator: &Locator, element: MockElement) {
        let _ = self
            .inner
            .borrow_mut()
            .elements
            .insert(locator.to_string(), element);
    }

    /// Remove an element from the document
    pub fn remove(&self, locator: &Locator) {
        let _ = self.inner.borrow_mut().elements.remove(&locator.to_string());
    }

    /// Script an element to appear after a delay
    pub fn reveal_after(&self, locator: &Locator, element: MockElement, delay: Duration) {
        self.inner.borrow_mut().scheduled.push((
            locator.to_string(),
            element,
            Instant::now() + delay,
        ));
    }

    /// Set the readiness probe the session reports
    pub fn set_ready(&self, probe: ReadyProbe) {
        self.inner.borrow_mut().ready = probe;
    }

    /// Script in-flight requests to drain after a delay
    pub fn settle_network_after(&self, delay: Duration) {
        self.inner.borrow_mut().network_settles_at = Some(Instant::now() + delay);
    }

    /// Set the reported document title
    pub fn set_title(&self, title: impl Into<String>) {
        self.inner.borrow_mut().title = title.into();
    }

    /// Set the reported document source
    pub fn set_page_source(&self, source: impl Into<String>) {
        self.inner.borrow_mut().page_source = source.into();
    }

    /// Snapshot of the action journal
    #[must_use]
    pub fn journal(&self) -> Vec<ActionRecord> {
        self.inner.borrow().journal.clone()
    }

    /// Current value of an element, if present
    #[must_use]
    pub fn value_of(&self, locator: &Locator) -> Option<String> {
        self.inner
            .borrow()
            .elements
            .get(&locator.to_string())
            .map(|el| el.value.clone())
    }

    /// Selected option index of a `<select>`, if any
    #[must_use]
    pub fn selected_index(&self, locator: &Locator) -> Option<usize> {
        self.inner
            .borrow()
            .elements
            .get(&locator.to_string())
            .and_then(|el| el.selected)
    }

    fn apply_scheduled(&self) {
        let mut inner = self.inner.borrow_mut();
        let now = Instant::now();
        let due: Vec<usize> = inner
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, (_, _, at))| *at <= now)
            .map(|(i, _)| i)
            .collect();
        for i in due.into_iter().rev() {
            let (key, element, _) = inner.scheduled.remove(i);
            let _ = inner.elements.insert(key, element);
        }
    }

    fn record(&self, entry: ActionRecord) {
        self.inner.borrow_mut().journal.push(entry);
    }

    fn with_element<T>(
        &self,
        locator: &Locator,
        f: impl FnOnce(&mut MockElement) -> PagewrightResult<T>,
    ) -> PagewrightResult<T> {
        self.apply_scheduled();
        let mut inner = self.inner.borrow_mut();
        match inner.elements.get_mut(&locator.to_string()) {
            Some(element) => f(element),
            None => Err(PagewrightError::ElementNotFound {
                locator: locator.to_string(),
            }),
        }
    }
}

impl Session for MockSession {
    fn find(&self, locator: &Locator) -> PagewrightResult<ElementHandle> {
        self.apply_scheduled();
        let inner = self.inner.borrow();
        inner
            .elements
            .get(&locator.to_string())
            .map(|el| ElementHandle::new(locator.clone()).with_tag_name(el.tag_name.clone()))
            .ok_or_else(|| PagewrightError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    fn count(&self, locator: &Locator) -> PagewrightResult<usize> {
        self.apply_scheduled();
        let inner = self.inner.borrow();
        Ok(inner
            .elements
            .get(&locator.to_string())
            .map_or(0, |el| el.match_count))
    }

    fn state(&self, locator: &Locator) -> PagewrightResult<ElementState> {
        self.apply_scheduled();
        let inner = self.inner.borrow();
        Ok(inner
            .elements
            .get(&locator.to_string())
            .map_or(ElementState::absent(), MockElement::state))
    }

    fn click(&self, element: &ElementHandle) -> PagewrightResult<()> {
        self.with_element(&element.locator, |_| Ok(()))?;
        self.record(ActionRecord::Click(element.locator.to_string()));
        Ok(())
    }

    fn clear(&self, element: &ElementHandle) -> PagewrightResult<()> {
        self.with_element(&element.locator, |el| {
            el.value.clear();
            Ok(())
        })?;
        self.record(ActionRecord::Clear(element.locator.to_string()));
        Ok(())
    }

    fn type_text(&self, element: &ElementHandle, text: &str) -> PagewrightResult<()> {
        self.with_element(&element.locator, |el| {
            el.value.push_str(text);
            Ok(())
        })?;
        self.record(ActionRecord::Type {
            locator: element.locator.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn send_key(&self, element: &ElementHandle, key: Key) -> PagewrightResult<()> {
        self.with_element(&element.locator, |_| Ok(()))?;
        self.record(ActionRecord::Key {
            locator: element.locator.to_string(),
            key,
        });
        Ok(())
    }

    fn select_option(&self, element: &ElementHandle, by: &SelectBy) -> PagewrightResult<()> {
        self.with_element(&element.locator, |el| {
            let index = match by {
                SelectBy::VisibleText(text) => {
                    el.options.iter().position(|o| o.text == *text)
                }
                SelectBy::Value(value) => el
                    .options
                    .iter()
                    .position(|o| o.value.as_deref() == Some(value.as_str())),
                SelectBy::Index(index) => (*index < el.options.len()).then_some(*index),
            };
            match index {
                Some(index) => {
                    el.selected = Some(index);
                    el.value = el.options[index].value.clone().unwrap_or_default();
                    Ok(())
                }
                None => Err(PagewrightError::InputError {
                    message: format!("no option matched {by:?}"),
                }),
            }
        })?;
        self.record(ActionRecord::Select {
            locator: element.locator.to_string(),
            by: by.clone(),
        });
        Ok(())
    }

    fn text_of(&self, element: &ElementHandle) -> PagewrightResult<String> {
        self.with_element(&element.locator, |el| Ok(el.text.clone()))
    }

    fn attribute_of(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> PagewrightResult<Option<String>> {
        self.with_element(&element.locator, |el| Ok(el.attributes.get(name).cloned()))
    }

    fn execute_script(&self, script: &str) -> PagewrightResult<serde_json::Value> {
        self.record(ActionRecord::Script(script.to_string()));
        Ok(serde_json::Value::Null)
    }

    fn navigate_to(&self, url: &str) -> PagewrightResult<()> {
        self.inner.borrow_mut().url = url.to_string();
        self.record(ActionRecord::Navigate(url.to_string()));
        Ok(())
    }

    fn refresh(&self) -> PagewrightResult<()> {
        self.record(ActionRecord::Refresh);
        Ok(())
    }

    fn current_url(&self) -> PagewrightResult<String> {
        Ok(self.inner.borrow().url.clone())
    }

    fn title(&self) -> PagewrightResult<String> {
        Ok(self.inner.borrow().title.clone())
    }

    fn page_source(&self) -> PagewrightResult<String> {
        Ok(self.inner.borrow().page_source.clone())
    }

    fn delete_cookies(&self) -> PagewrightResult<()> {
        self.record(ActionRecord::DeleteCookies);
        Ok(())
    }

    fn document_ready(&self) -> PagewrightResult<ReadyProbe> {
        let mut inner = self.inner.borrow_mut();
        if let Some(at) = inner.network_settles_at {
            if at <= Instant::now() {
                inner.ready.pending_requests = 0;
                inner.network_settles_at = None;
            }
        }
        Ok(inner.ready)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_find_missing_element_fails() {
        let session = MockSession::new();
        let err = session.find(&Locator::css("#nope")).unwrap_err();
        assert!(matches!(err, PagewrightError::ElementNotFound { .. }));
    }

    #[test]
    fn test_type_appends_and_clear_empties() {
        let session = MockSession::new();
        let locator = Locator::css("#user");
        session.insert(&locator, MockElement::new("input").with_value("ali"));

        let handle = session.find(&locator).unwrap();
        session.type_text(&handle, "ce").unwrap();
        assert_eq!(session.value_of(&locator).as_deref(), Some("alice"));

        session.clear(&handle).unwrap();
        assert_eq!(session.value_of(&locator).as_deref(), Some(""));
    }

    #[test]
    fn test_select_by_each_strategy() {
        let session = MockSession::new();
        let locator = Locator::css("select#lang");
        session.insert(
            &locator,
            MockElement::new("select")
                .with_option("English", Some("en"))
                .with_option("Deutsch", Some("de")),
        );
        let handle = session.find(&locator).unwrap();

        session
            .select_option(&handle, &SelectBy::VisibleText("Deutsch".into()))
            .unwrap();
        assert_eq!(session.selected_index(&locator), Some(1));

        session
            .select_option(&handle, &SelectBy::Value("en".into()))
            .unwrap();
        assert_eq!(session.selected_index(&locator), Some(0));

        session.select_option(&handle, &SelectBy::Index(1)).unwrap();
        assert_eq!(session.value_of(&locator).as_deref(), Some("de"));

        let err = session
            .select_option(&handle, &SelectBy::Index(9))
            .unwrap_err();
        assert!(matches!(err, PagewrightError::InputError { .. }));
    }

    #[test]
    fn test_journal_records_in_order() {
        let session = MockSession::new();
        let locator = Locator::css("#go");
        session.insert(&locator, MockElement::new("button"));
        let handle = session.find(&locator).unwrap();

        session.click(&handle).unwrap();
        session.navigate_to("https://example.test/").unwrap();
        session.delete_cookies().unwrap();

        assert_eq!(
            session.journal(),
            vec![
                ActionRecord::Click("#go".into()),
                ActionRecord::Navigate("https://example.test/".into()),
                ActionRecord::DeleteCookies,
            ]
        );
    }

    #[test]
    fn test_reveal_after_delays_presence() {
        let session = MockSession::new();
        let locator = Locator::css("#late");
        session.reveal_after(&locator, MockElement::new("div"), Duration::from_millis(30));

        assert_eq!(session.state(&locator).unwrap(), ElementState::absent());
        std::thread::sleep(Duration::from_millis(40));
        assert!(session.state(&locator).unwrap().present);
    }

    #[test]
    fn test_match_count() {
        let session = MockSession::new();
        let locator = Locator::css("li.row");
        session.insert(&locator, MockElement::new("li").with_match_count(4));
        assert_eq!(session.count(&locator).unwrap(), 4);
        assert_eq!(session.count(&Locator::css("li.none")).unwrap(), 0);
    }
}
