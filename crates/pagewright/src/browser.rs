//! Browser session construction.
//!
//! [`BrowserConfig`] describes the session to launch: browser family,
//! head/headless mode, viewport, and the driver executable override. With
//! the `browser` feature enabled, [`CdpSession`] drives a real Chromium via
//! the Chrome DevTools Protocol behind the synchronous [`Session`] trait —
//! each call blocks on a private tokio runtime until the browser responds.
//! Without the feature, use [`crate::mock::MockSession`].

use crate::config::{BrowserKind, WindowMode};
use crate::result::{PagewrightError, PagewrightResult};
use std::path::PathBuf;

#[cfg(feature = "browser")]
use crate::session::Session;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Browser family
    pub browser: BrowserKind,
    /// Window mode
    pub mode: WindowMode,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Explicit driver/browser executable path (None = resolve per family)
    pub executable_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome,
            mode: WindowMode::Headless,
            viewport_width: 1280,
            viewport_height: 800,
            executable_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Create a default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the browser family
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Set the window mode
    #[must_use]
    pub const fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set an explicit executable path
    #[must_use]
    pub fn with_executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Resolve the executable to launch.
    ///
    /// An explicit path must exist — absence is a fatal startup error. With
    /// no explicit path, the per-family default under `drivers/` is used
    /// when present; otherwise resolution is left to the CDP layer's
    /// auto-detection.
    pub fn resolve_executable(&self) -> PagewrightResult<Option<PathBuf>> {
        if let Some(path) = &self.executable_path {
            let resolved = PathBuf::from(path);
            if resolved.exists() {
                return Ok(Some(resolved));
            }
            return Err(PagewrightError::DriverNotFound { path: path.clone() });
        }

        let fallback = PathBuf::from(self.browser.default_driver_path());
        Ok(fallback.exists().then_some(fallback))
    }
}

// ============================================================================
// Real CDP implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{BrowserConfig, PagewrightError, PagewrightResult, Session};
    use crate::locator::Locator;
    use crate::session::{ElementHandle, ElementState, Key, ReadyProbe, SelectBy};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::cell::RefCell;
    use tokio::runtime::Runtime;

    /// Script counting xhr/fetch resource entries, as the readiness probe
    /// sees them. Entries recorded after the probe snapshot are missed.
    const PENDING_REQUESTS_SCRIPT: &str = "window.performance.getEntriesByType('resource')\
        .filter(r => ['xmlhttprequest','fetch'].includes(r.initiatorType)).length";

    /// A live CDP-backed session.
    ///
    /// Synchronous facade: every trait method blocks the calling thread on
    /// the private runtime until the browser responds. Single-writer by
    /// construction — the session is neither `Send` nor shared.
    pub struct CdpSession {
        config: BrowserConfig,
        runtime: Runtime,
        browser: RefCell<CdpBrowser>,
        page: CdpPage,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl std::fmt::Debug for CdpSession {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("CdpSession")
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }

    impl CdpSession {
        /// Launch a browser and open a blank page.
        pub fn launch(config: BrowserConfig) -> PagewrightResult<Self> {
            let executable = config.resolve_executable()?;
            let runtime = Runtime::new()?;

            let (browser, handler) = runtime.block_on(async {
                let mut builder = CdpConfig::builder()
                    .window_size(config.viewport_width, config.viewport_height);

                if !config.mode.is_headless() {
                    builder = builder.with_head();
                }
                if !config.sandbox {
                    builder = builder.no_sandbox();
                }
                if let Some(path) = &executable {
                    builder = builder.chrome_executable(path);
                }

                let cdp_config =
                    builder
                        .build()
                        .map_err(|e| PagewrightError::BrowserLaunchError {
                            message: e.to_string(),
                        })?;

                CdpBrowser::launch(cdp_config).await.map_err(|e| {
                    PagewrightError::BrowserLaunchError {
                        message: e.to_string(),
                    }
                })
            })?;

            let mut handler = handler;
            let handle = runtime.spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = runtime.block_on(async {
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| PagewrightError::BrowserLaunchError {
                        message: e.to_string(),
                    })
            })?;

            tracing::info!(browser = %config.browser, mode = %config.mode, "browser launched");
            Ok(Self {
                config,
                runtime,
                browser: RefCell::new(browser),
                page,
                handle,
            })
        }

        /// The launch configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub fn close(self) -> PagewrightResult<()> {
            self.runtime.block_on(async {
                self.browser.borrow_mut().close().await.map_err(|e| {
                    PagewrightError::BrowserLaunchError {
                        message: e.to_string(),
                    }
                })
            })?;
            Ok(())
        }

        fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> PagewrightResult<T> {
            self.runtime.block_on(async {
                let result =
                    self.page
                        .evaluate(expr)
                        .await
                        .map_err(|e| PagewrightError::ScriptError {
                            message: e.to_string(),
                        })?;
                result
                    .into_value()
                    .map_err(|e| PagewrightError::ScriptError {
                        message: e.to_string(),
                    })
            })
        }

        /// Evaluate a script against the first match, failing when the
        /// locator resolves to nothing.
        fn eval_on_element<T: serde::de::DeserializeOwned>(
            &self,
            locator: &Locator,
            body: &str,
        ) -> PagewrightResult<T> {
            let script = format!(
                "(() => {{ const el = {query}; if (!el) return null; {body} }})()",
                query = locator.to_query()
            );
            let value: serde_json::Value = self.eval(&script)?;
            if value.is_null() {
                return Err(PagewrightError::ElementNotFound {
                    locator: locator.to_string(),
                });
            }
            serde_json::from_value(value).map_err(PagewrightError::from)
        }
    }

    impl Session for CdpSession {
        fn find(&self, locator: &Locator) -> PagewrightResult<ElementHandle> {
            let tag: String =
                self.eval_on_element(locator, "return el.tagName.toLowerCase();")?;
            Ok(ElementHandle::new(locator.clone()).with_tag_name(tag))
        }

        fn count(&self, locator: &Locator) -> PagewrightResult<usize> {
            self.eval(&locator.to_count_query())
        }

        fn state(&self, locator: &Locator) -> PagewrightResult<ElementState> {
            self.eval(&locator.to_state_query())
        }

        fn click(&self, element: &ElementHandle) -> PagewrightResult<()> {
            let _: bool =
                self.eval_on_element(&element.locator, "el.click(); return true;")?;
            Ok(())
        }

        fn clear(&self, element: &ElementHandle) -> PagewrightResult<()> {
            let _: bool = self.eval_on_element(
                &element.locator,
                "el.value = ''; \
                 el.dispatchEvent(new Event('input', {bubbles: true})); \
                 return true;",
            )?;
            Ok(())
        }

        fn type_text(&self, element: &ElementHandle, text: &str) -> PagewrightResult<()> {
            let body = format!(
                "el.focus(); el.value += {text}; \
                 el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                 return true;",
                text = serde_json::Value::from(text)
            );
            let _: bool = self.eval_on_element(&element.locator, &body)?;
            Ok(())
        }

        fn send_key(&self, element: &ElementHandle, key: Key) -> PagewrightResult<()> {
            let body = format!(
                "el.focus(); \
                 el.dispatchEvent(new KeyboardEvent('keydown', {{key: '{key}', bubbles: true}})); \
                 el.dispatchEvent(new KeyboardEvent('keyup', {{key: '{key}', bubbles: true}})); \
                 return true;",
                key = key.dom_key()
            );
            let _: bool = self.eval_on_element(&element.locator, &body)?;
            Ok(())
        }

        fn select_option(&self, element: &ElementHandle, by: &SelectBy) -> PagewrightResult<()> {
            let matcher = match by {
                SelectBy::VisibleText(text) => format!(
                    "Array.from(el.options).findIndex(o => o.text.trim() === {})",
                    serde_json::Value::from(text.as_str())
                ),
                SelectBy::Value(value) => format!(
                    "Array.from(el.options).findIndex(o => o.value === {})",
                    serde_json::Value::from(value.as_str())
                ),
                SelectBy::Index(index) => format!("{index} < el.options.length ? {index} : -1"),
            };
            let body = format!(
                "const index = {matcher}; \
                 if (index < 0) return 'miss'; \
                 el.selectedIndex = index; \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                 return 'ok';"
            );
            let verdict: String = self.eval_on_element(&element.locator, &body)?;
            if verdict == "ok" {
                Ok(())
            } else {
                Err(PagewrightError::InputError {
                    message: format!("no option matched {by:?}"),
                })
            }
        }

        fn text_of(&self, element: &ElementHandle) -> PagewrightResult<String> {
            self.eval_on_element(&element.locator, "return el.textContent.trim();")
        }

        fn attribute_of(
            &self,
            element: &ElementHandle,
            name: &str,
        ) -> PagewrightResult<Option<String>> {
            let body = format!(
                "return {{value: el.getAttribute({name})}};",
                name = serde_json::Value::from(name)
            );
            #[derive(serde::Deserialize)]
            struct Wrapped {
                value: Option<String>,
            }
            let wrapped: Wrapped = self.eval_on_element(&element.locator, &body)?;
            Ok(wrapped.value)
        }

        fn execute_script(&self, script: &str) -> PagewrightResult<serde_json::Value> {
            self.runtime.block_on(async {
                let result =
                    self.page
                        .evaluate(script)
                        .await
                        .map_err(|e| PagewrightError::ScriptError {
                            message: e.to_string(),
                        })?;
                // scripts without a completion value evaluate to null
                Ok(result.into_value().unwrap_or(serde_json::Value::Null))
            })
        }

        fn navigate_to(&self, url: &str) -> PagewrightResult<()> {
            self.runtime.block_on(async {
                self.page
                    .goto(url)
                    .await
                    .map_err(|e| PagewrightError::NavigationError {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(())
            })
        }

        fn refresh(&self) -> PagewrightResult<()> {
            self.execute_script("window.location.reload();").map(|_| ())
        }

        fn current_url(&self) -> PagewrightResult<String> {
            self.eval("window.location.href")
        }

        fn title(&self) -> PagewrightResult<String> {
            self.eval("document.title")
        }

        fn page_source(&self) -> PagewrightResult<String> {
            self.eval("document.documentElement.outerHTML")
        }

        fn delete_cookies(&self) -> PagewrightResult<()> {
            self.runtime.block_on(async {
                self.page
                    .execute(ClearBrowserCookiesParams::default())
                    .await
                    .map_err(|e| PagewrightError::ScriptError {
                        message: e.to_string(),
                    })?;
                Ok(())
            })
        }

        fn document_ready(&self) -> PagewrightResult<ReadyProbe> {
            let script = format!(
                "({{ \
                    ready_state_complete: document.readyState === 'complete', \
                    body_present: document.body !== null, \
                    pending_requests: {PENDING_REQUESTS_SCRIPT} \
                }})"
            );
            self.eval(&script)
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpSession;
