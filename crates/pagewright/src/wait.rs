//! Wait/Readiness Helper.
//!
//! Centralizes all readiness polling so flows never fall back to ad hoc
//! fixed sleeps. Given a condition and a timeout (default 10 s), the waiter
//! polls the session at a bounded interval until the condition holds,
//! returning the matched handle, or fails with
//! [`Timeout`](crate::PagewrightError::Timeout) on expiry.
//!
//! "Timed out" and "element never existed" deliberately surface as the same
//! timeout failure.

use crate::locator::Locator;
use crate::result::{PagewrightError, PagewrightResult};
use crate::session::{ElementHandle, ElementState, Session};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Element state transitions the waiter can poll for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCondition {
    /// Present, visible, and enabled
    Clickable,
    /// Present and visible
    Visible,
    /// Hidden or absent
    Hidden,
}

impl ElementCondition {
    /// Check the condition against a state snapshot
    #[must_use]
    pub const fn holds(&self, state: ElementState) -> bool {
        match self {
            Self::Clickable => state.is_clickable(),
            Self::Visible => state.is_visible(),
            Self::Hidden => state.is_hidden(),
        }
    }

    /// Human-readable condition name for error context
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clickable => "clickable",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for ElementCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Waiter for synchronization operations
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a new waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// The configured options
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Wait for an element state transition, returning the matched handle.
    ///
    /// For [`ElementCondition::Hidden`] the handle refers to the locator,
    /// not a live element.
    pub fn wait_for_element<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
        condition: ElementCondition,
    ) -> PagewrightResult<ElementHandle> {
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();

        while start.elapsed() < timeout {
            let state = session.state(locator)?;
            if condition.holds(state) {
                tracing::trace!(
                    locator = %locator,
                    condition = %condition,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "wait satisfied"
                );
                return Ok(ElementHandle::new(locator.clone()));
            }
            std::thread::sleep(poll_interval);
        }

        Err(PagewrightError::Timeout {
            ms: self.options.timeout_ms,
        })
    }

    /// Wait for the element to be clickable
    pub fn wait_clickable<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
    ) -> PagewrightResult<ElementHandle> {
        self.wait_for_element(session, locator, ElementCondition::Clickable)
    }

    /// Wait for the element to be visible
    pub fn wait_visible<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
    ) -> PagewrightResult<ElementHandle> {
        self.wait_for_element(session, locator, ElementCondition::Visible)
    }

    /// Wait for the element to be hidden or absent
    pub fn wait_hidden<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
    ) -> PagewrightResult<()> {
        self.wait_for_element(session, locator, ElementCondition::Hidden)
            .map(|_| ())
    }

    /// Wait for the document to settle: ready state complete, a body element
    /// present, and zero in-flight xhr/fetch resource entries.
    ///
    /// The pending-request check is a heuristic proxy for "fully settled":
    /// requests issued after a probe but before it returns are missed, as is
    /// WebSocket/long-poll traffic.
    pub fn wait_document_ready<S: Session>(&self, session: &S) -> PagewrightResult<()> {
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();

        while start.elapsed() < timeout {
            let probe = session.document_ready()?;
            if probe.is_settled() {
                tracing::trace!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "document ready"
                );
                return Ok(());
            }
            std::thread::sleep(poll_interval);
        }

        Err(PagewrightError::Timeout {
            ms: self.options.timeout_ms,
        })
    }

    /// Wait for a predicate to return true
    pub fn wait_for_function<F>(&self, predicate: F) -> PagewrightResult<()>
    where
        F: Fn() -> bool,
    {
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();

        while start.elapsed() < timeout {
            if predicate() {
                return Ok(());
            }
            std::thread::sleep(poll_interval);
        }

        Err(PagewrightError::Timeout {
            ms: self.options.timeout_ms,
        })
    }
}

/// Wait for a condition with default polling and a custom timeout
pub fn wait_until<F>(predicate: F, timeout_ms: u64) -> PagewrightResult<()>
where
    F: Fn() -> bool,
{
    let waiter = Waiter::with_options(WaitOptions::new().with_timeout(timeout_ms));
    waiter.wait_for_function(predicate)
}
