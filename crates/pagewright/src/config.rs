//! Run configuration: target environment, browser family, window mode, and
//! the per-environment web settings document.
//!
//! The settings file is a JSON document keyed by environment name, each
//! value providing `base_url`, `usr`, `pwd`.

use crate::result::{PagewrightError, PagewrightResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default settings file path
pub const DEFAULT_CONFIG_PATH: &str = "configs/web_conf.json";

/// Target environment for a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Local,
    /// System integration testing
    Sit,
    /// User acceptance testing
    Uat,
    /// Production
    Prod,
}

impl Environment {
    /// Environment name as used in config keys and data folder paths
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Sit => "sit",
            Self::Uat => "uat",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "sit" => Ok(Self::Sit),
            "uat" => Ok(Self::Uat),
            "prod" => Ok(Self::Prod),
            other => Err(format!(
                "unknown environment '{other}' (expected local, sit, uat, prod)"
            )),
        }
    }
}

/// Browser family driving the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Chromium/Chrome
    #[default]
    Chrome,
    /// Firefox
    Firefox,
}

impl BrowserKind {
    /// Browser name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
        }
    }

    /// Default driver executable path for this family
    #[must_use]
    pub const fn default_driver_path(&self) -> &'static str {
        match self {
            Self::Chrome => "drivers/chromedriver",
            Self::Firefox => "drivers/geckodriver",
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            other => Err(format!(
                "unsupported browser '{other}' (expected chrome, firefox)"
            )),
        }
    }
}

/// Window mode for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Visible window
    Head,
    /// No window
    #[default]
    Headless,
}

impl WindowMode {
    /// Mode name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Headless => "headless",
        }
    }

    /// Whether the session runs without a window
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        matches!(self, Self::Headless)
    }
}

impl std::fmt::Display for WindowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WindowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "head" => Ok(Self::Head),
            "headless" => Ok(Self::Headless),
            other => Err(format!("unknown mode '{other}' (expected head, headless)")),
        }
    }
}

/// Per-environment web settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSettings {
    /// Application entry URL
    pub base_url: String,
    /// Login user
    pub usr: String,
    /// Login password
    pub pwd: String,
}

/// Load the settings for one environment from a JSON document keyed by
/// environment name.
///
/// Fails with [`UnknownEnvironment`](PagewrightError::UnknownEnvironment)
/// when the document has no entry for the requested environment.
pub fn load_settings(
    path: impl AsRef<Path>,
    env: Environment,
) -> PagewrightResult<WebSettings> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let mut document: HashMap<String, WebSettings> = serde_json::from_str(&raw)?;
    document
        .remove(env.as_str())
        .ok_or_else(|| PagewrightError::UnknownEnvironment {
            env: env.as_str().to_string(),
            path: path.display().to_string(),
        })
}
