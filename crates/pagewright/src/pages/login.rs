//! Login page object.

use crate::actions::Actions;
use crate::locator::Locator;
use crate::pages::PageObject;
use crate::result::{PagewrightError, PagewrightResult};
use crate::session::Session;
use crate::wait::WaitOptions;

/// Button opening the login form
#[must_use]
pub fn btn_action() -> Locator {
    Locator::xpath("//button[@id='account-menu']")
}

/// Username input
#[must_use]
pub fn txt_user() -> Locator {
    Locator::xpath("//input[@name='username']")
}

/// Password input
#[must_use]
pub fn txt_pass() -> Locator {
    Locator::xpath("//input[@name='password']")
}

/// Submit button
#[must_use]
pub fn btn_login() -> Locator {
    Locator::xpath("//button[@type='submit']")
}

/// Post-login page title element
#[must_use]
pub fn txt_title() -> Locator {
    Locator::xpath("//h2[@class='page-title']")
}

/// The locators the login flow interacts with, in flow order
#[must_use]
pub fn all_locators() -> Vec<Locator> {
    vec![btn_action(), txt_user(), txt_pass(), btn_login()]
}

/// The login page: a stateless orchestrator over the action layer
#[derive(Debug)]
pub struct LoginPage<'s, S: Session> {
    actions: Actions<'s, S>,
}

impl<'s, S: Session> LoginPage<'s, S> {
    /// Create with the default wait configuration
    #[must_use]
    pub fn new(session: &'s S) -> Self {
        Self {
            actions: Actions::new(session),
        }
    }

    /// Create with custom wait options
    #[must_use]
    pub fn with_options(session: &'s S, options: WaitOptions) -> Self {
        Self {
            actions: Actions::with_options(session, options),
        }
    }

    /// The underlying action layer
    #[must_use]
    pub const fn actions(&self) -> &Actions<'s, S> {
        &self.actions
    }

    /// Perform the login flow: a fixed, ordered sequence of five
    /// interactions with no branching and no retry.
    pub fn login(&self, usr: &str, pwd: &str) -> PagewrightResult<()> {
        self.actions.click(&btn_action())?;
        self.actions.fill(&txt_user(), usr)?;
        self.actions.clear(&txt_pass())?;
        self.actions.fill(&txt_pass(), pwd)?;
        self.actions.click(&btn_login())
    }

    /// Wait for the title element to be visible, then require exact text
    /// equality.
    pub fn check_title(&self, expected: &str) -> PagewrightResult<()> {
        self.actions.wait_visible(&txt_title())?;
        let actual = self.actions.text(&txt_title())?;
        if actual == expected {
            Ok(())
        } else {
            Err(PagewrightError::AssertionFailed {
                message: format!("title was '{actual}', expected '{expected}'"),
            })
        }
    }

    /// Current document URL
    pub fn current_url(&self) -> PagewrightResult<String> {
        self.actions.current_url()
    }
}

impl<S: Session> PageObject for LoginPage<'_, S> {
    fn url_pattern(&self) -> &str {
        "/login"
    }

    fn page_name(&self) -> &str {
        "LoginPage"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::{ActionRecord, MockElement, MockSession};
    use crate::session::Key;
    use std::time::Duration;

    fn fast_options() -> WaitOptions {
        WaitOptions::new().with_timeout(150).with_poll_interval(5)
    }

    fn seeded_session() -> MockSession {
        let session = MockSession::new();
        for locator in all_locators() {
            session.insert(&locator, MockElement::new("input"));
        }
        session
    }

    #[test]
    fn test_login_performs_five_interactions_in_order() {
        let session = seeded_session();
        let page = LoginPage::with_options(&session, fast_options());

        page.login("alice", "secret").unwrap();

        let user = txt_user().to_string();
        let pass = txt_pass().to_string();
        assert_eq!(
            session.journal(),
            vec![
                ActionRecord::Click(btn_action().to_string()),
                ActionRecord::Clear(user.clone()),
                ActionRecord::Type {
                    locator: user,
                    text: "alice".into(),
                },
                ActionRecord::Clear(pass.clone()),
                ActionRecord::Clear(pass.clone()),
                ActionRecord::Type {
                    locator: pass,
                    text: "secret".into(),
                },
                ActionRecord::Click(btn_login().to_string()),
            ]
        );
        assert_eq!(session.value_of(&txt_pass()).as_deref(), Some("secret"));
    }

    #[test]
    fn test_login_times_out_when_form_never_appears() {
        let session = MockSession::new();
        let page = LoginPage::with_options(&session, fast_options());
        let err = page.login("alice", "secret").unwrap_err();
        assert!(err.is_timeout());
        // nothing was clicked or typed
        assert!(session.journal().is_empty());
    }

    #[test]
    fn test_check_title_matches_exact_text() {
        let session = seeded_session();
        session.insert(&txt_title(), MockElement::new("h2").with_text("Dashboard"));
        let page = LoginPage::with_options(&session, fast_options());
        assert!(page.check_title("Dashboard").is_ok());
    }

    #[test]
    fn test_check_title_waits_for_visibility() {
        let session = seeded_session();
        session.reveal_after(
            &txt_title(),
            MockElement::new("h2").with_text("Dashboard"),
            Duration::from_millis(30),
        );
        let page = LoginPage::with_options(&session, fast_options());
        assert!(page.check_title("Dashboard").is_ok());
    }

    #[test]
    fn test_check_title_mismatch_is_assertion_failure() {
        let session = seeded_session();
        session.insert(&txt_title(), MockElement::new("h2").with_text("Maintenance"));
        let page = LoginPage::with_options(&session, fast_options());

        let err = page.check_title("Dashboard").unwrap_err();
        match err {
            PagewrightError::AssertionFailed { message } => {
                assert!(message.contains("Maintenance"));
                assert!(message.contains("Dashboard"));
            }
            other => panic!("expected AssertionFailed, got {other}"),
        }
    }

    #[test]
    fn test_page_object_metadata() {
        let session = seeded_session();
        let page = LoginPage::with_options(&session, fast_options());
        assert_eq!(page.url_pattern(), "/login");
        assert_eq!(page.page_name(), "LoginPage");
    }

    #[test]
    fn test_current_url_passthrough() {
        let session = seeded_session();
        session.navigate_to("https://example.test/login").unwrap();
        let page = LoginPage::with_options(&session, fast_options());
        assert_eq!(page.current_url().unwrap(), "https://example.test/login");
    }

    #[test]
    fn test_key_type_is_reexported_for_flows() {
        // flows occasionally submit via Enter instead of the button
        let session = seeded_session();
        let page = LoginPage::with_options(&session, fast_options());
        page.actions().press_enter(&txt_pass()).unwrap();
        assert!(matches!(
            session.journal().last(),
            Some(ActionRecord::Key {
                key: Key::Enter,
                ..
            })
        ));
    }
}
