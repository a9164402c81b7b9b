//! Pagewright: a page-object browser automation scaffold.
//!
//! A thin Page Object Model layered over a synchronous browser session,
//! with an explicit-wait readiness helper, a static-HTML inspection layer,
//! and a CSV-driven suite harness with per-case result tracking.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    PAGEWRIGHT Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌──────────────┐           │
//! │   │ Page       │    │ Actions +  │    │ Session      │           │
//! │   │ Objects    │───►│ Waiter     │───►│ (CDP | mock) │           │
//! │   └────────────┘    └────────────┘    └──────────────┘           │
//! │   ┌────────────┐    ┌────────────┐    ┌──────────────┐           │
//! │   │ DataSet    │───►│ DataSuite  │───►│ ResultTracker│           │
//! │   │ (CSV)      │    │ (harness)  │    │ (code→result)│           │
//! │   └────────────┘    └────────────┘    └──────────────┘           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The live action layer fails loudly on element misses; the static
//! [`Snapshot`] layer degrades to absent values. Both contracts are
//! deliberate and documented on their modules.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod actions;
pub mod browser;
pub mod config;
pub mod dataset;
pub mod harness;
pub mod locator;
pub mod mock;
pub mod pages;
pub mod result;
pub mod session;
pub mod snapshot;
pub mod tracker;
pub mod wait;

pub use actions::{Actions, DEFAULT_ZOOM_PERCENT};
pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::CdpSession;
pub use config::{
    load_settings, BrowserKind, Environment, WebSettings, WindowMode, DEFAULT_CONFIG_PATH,
};
pub use dataset::{DataRow, DataSet, CODE_FIELD, DEFAULT_DATA_DIR};
pub use harness::{CaseResult, DataSuite, SuiteResults};
pub use locator::{Locator, Selector};
pub use mock::{ActionRecord, MockElement, MockSession};
pub use pages::login::LoginPage;
pub use pages::PageObject;
pub use result::{PagewrightError, PagewrightResult};
pub use session::{ElementHandle, ElementState, Key, ReadyProbe, SelectBy, Session};
pub use snapshot::{DropdownOption, Snapshot};
pub use tracker::{failure_line, CaseReport, Outcome, ResultTracker, Summary};
pub use wait::{
    wait_until, ElementCondition, WaitOptions, Waiter, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
