//! Session abstraction over one live browser instance.
//!
//! A [`Session`] owns cookies, storage, and navigation state for exactly one
//! browser. One session is created at suite start and dropped at suite end;
//! all cases share it sequentially. Every call blocks the calling thread
//! until the browser responds — the model is single-threaded, synchronous,
//! exclusive single-writer access with no internal locking.
//!
//! Implementations: the CDP-backed session in [`crate::browser`] (behind the
//! `browser` feature) and the in-memory [`crate::mock::MockSession`].

use crate::locator::Locator;
use crate::result::PagewrightResult;
use serde::{Deserialize, Serialize};

/// Handle to one resolved live element.
///
/// The handle pins the locator it was resolved from; imperative operations
/// re-run that query against the live document, always addressing the first
/// match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Locator the element was resolved from
    pub locator: Locator,
    /// Element tag name, when the session reports it
    pub tag_name: Option<String>,
}

impl ElementHandle {
    /// Create a handle for a resolved locator
    #[must_use]
    pub fn new(locator: Locator) -> Self {
        Self {
            locator,
            tag_name: None,
        }
    }

    /// Attach the reported tag name
    #[must_use]
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }
}

/// Snapshot of one element's interactability state.
///
/// Total over the document: an absent element reports all fields `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementState {
    /// At least one element matches the locator
    pub present: bool,
    /// The first match is rendered (not `display:none`/`visibility:hidden`)
    pub visible: bool,
    /// The first match is not disabled
    pub enabled: bool,
}

impl ElementState {
    /// State reported for an absent element
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            present: false,
            visible: false,
            enabled: false,
        }
    }

    /// Present, visible, and enabled
    #[must_use]
    pub const fn is_clickable(&self) -> bool {
        self.present && self.visible && self.enabled
    }

    /// Present and visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.present && self.visible
    }

    /// Hidden or absent
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        !self.is_visible()
    }
}

/// Document readiness probe, assembled in one pass per poll tick.
///
/// The pending-request count reads the performance resource entries of type
/// xhr/fetch; requests issued after the probe but before it returns are
/// missed. Accepted approximation, not a settledness guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadyProbe {
    /// `document.readyState == "complete"`
    pub ready_state_complete: bool,
    /// A `body` element is present
    pub body_present: bool,
    /// In-flight xhr/fetch resource entries
    pub pending_requests: usize,
}

impl ReadyProbe {
    /// All three readiness conditions hold
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.ready_state_complete && self.body_present && self.pending_requests == 0
    }
}

/// Non-text key inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Tab
    Tab,
}

impl Key {
    /// WebDriver key codepoint for this key
    #[must_use]
    pub const fn codepoint(&self) -> char {
        match self {
            Self::Enter => '\u{e007}',
            Self::Tab => '\u{e004}',
        }
    }

    /// DOM `KeyboardEvent.key` name
    #[must_use]
    pub const fn dom_key(&self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Tab => "Tab",
        }
    }
}

/// Strategy for choosing a `<select>` option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectBy {
    /// Match the option's rendered text exactly
    VisibleText(String),
    /// Match the option's `value` attribute exactly
    Value(String),
    /// Zero-based option index
    Index(usize),
}

/// Synchronous, blocking operations over one live browser instance.
///
/// Element resolution is strict about misses: `find` and the per-element
/// operations fail with [`ElementNotFound`](crate::PagewrightError::ElementNotFound)
/// when the locator matches nothing. `count` and `state` are total — zero
/// matches is a value, not an error.
pub trait Session {
    /// Resolve a locator to its first live match
    fn find(&self, locator: &Locator) -> PagewrightResult<ElementHandle>;

    /// Number of live matches for a locator
    fn count(&self, locator: &Locator) -> PagewrightResult<usize>;

    /// Interactability snapshot for the first match (absent ⇒ all false)
    fn state(&self, locator: &Locator) -> PagewrightResult<ElementState>;

    /// Click the element
    fn click(&self, element: &ElementHandle) -> PagewrightResult<()>;

    /// Clear the element's value
    fn clear(&self, element: &ElementHandle) -> PagewrightResult<()>;

    /// Type text into the element
    fn type_text(&self, element: &ElementHandle, text: &str) -> PagewrightResult<()>;

    /// Send a non-text key to the element
    fn send_key(&self, element: &ElementHandle, key: Key) -> PagewrightResult<()>;

    /// Choose an option in a `<select>` element
    fn select_option(&self, element: &ElementHandle, by: &SelectBy) -> PagewrightResult<()>;

    /// Rendered text of the element
    fn text_of(&self, element: &ElementHandle) -> PagewrightResult<String>;

    /// Attribute value of the element (`None` when the attribute is absent)
    fn attribute_of(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> PagewrightResult<Option<String>>;

    /// Evaluate a JavaScript expression in the document
    fn execute_script(&self, script: &str) -> PagewrightResult<serde_json::Value>;

    /// Navigate to a URL
    fn navigate_to(&self, url: &str) -> PagewrightResult<()>;

    /// Reload the current document
    fn refresh(&self) -> PagewrightResult<()>;

    /// Current document URL
    fn current_url(&self) -> PagewrightResult<String>;

    /// Current document title
    fn title(&self) -> PagewrightResult<String>;

    /// Serialized source of the current document
    fn page_source(&self) -> PagewrightResult<String>;

    /// Delete all cookies for the session
    fn delete_cookies(&self) -> PagewrightResult<()>;

    /// Assemble a document readiness probe
    fn document_ready(&self) -> PagewrightResult<ReadyProbe>;
}
