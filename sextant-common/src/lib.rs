//! Common types and utilities shared across Sextant crates.
//!
//! This crate defines runtime configuration and observability helpers used
//! by the driver layer. It is intentionally lightweight so that every crate
//! can depend on it without pulling in the WebDriver stack.
//!
//! # Overview
//!
//! - [`SextantConfig`]: browser/session runtime configuration
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! Constructing a default configuration:
//!
//! ```rust
//! use sextant_common::SextantConfig;
//!
//! let mut cfg = SextantConfig::default();
//! cfg.base_url = Some("http://localhost:8080/app/".to_string());
//! assert_eq!(cfg.page_load_timeout_secs, 10);
//! ```
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod observability;

/// Default endpoint for a locally running chromedriver.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Fixed port the standalone server is started on for non-default browsers.
pub const DEFAULT_SERVER_PORT: u16 = 4444;

/// Configuration for a Sextant browser session.
///
/// Passed to `SextantDriver::launch` to decide how the underlying WebDriver
/// session is acquired and how navigation behaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SextantConfig {
    /// Browser identifier. `"chrome"` connects straight to
    /// [`DEFAULT_WEBDRIVER_URL`]; anything else goes through a standalone
    /// server started from `server_jar`.
    pub browser: String,
    /// WebDriver endpoint used for the default local browser.
    pub webdriver_url: String,
    /// Base URL that relative `get` destinations resolve against.
    pub base_url: Option<String>,
    /// Path to the standalone server artifact for remote browser targets.
    pub server_jar: PathBuf,
    /// Port the standalone server listens on.
    pub server_port: u16,
    /// Seconds to wait for a page load before `get` fails with a timeout.
    pub page_load_timeout_secs: u64,
    /// When set, `get` navigates directly and skips the two-phase
    /// synchronization handshake.
    pub ignore_synchronization: bool,
    /// Whether to run the browser without a visible window.
    pub headless: bool,
}

impl Default for SextantConfig {
    fn default() -> Self {
        Self {
            browser: "chrome".to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            base_url: None,
            server_jar: PathBuf::from("selenium/selenium-server-standalone.jar"),
            server_port: DEFAULT_SERVER_PORT,
            page_load_timeout_secs: 10,
            ignore_synchronization: false,
            headless: false,
        }
    }
}
