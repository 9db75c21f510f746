//! Deferred element lookup and session wrapping over a WebDriver client.
//!
//! This crate layers three conveniences on top of fantoccini:
//!
//! - [`by`]: locator builders, including custom-lookup locators whose
//!   resolution is caller-supplied rather than a native driver strategy
//! - [`SextantDriver`]: a session wrapper with base-URL-relative navigation
//!   and lookups that honor the custom-lookup protocol
//! - [`ElementFinder`] / [`ElementArrayFinder`]: lazy finders that capture a
//!   locator chain and resolve it only when a terminal operation runs
//!
//! Every element produced by a lookup through this layer comes back as a
//! [`SextantElement`], so nested lookups keep the same behavior all the way
//! down a chain.
//!
//! ```no_run
//! use sextant_driver::{by, SextantDriver};
//! use sextant_common::SextantConfig;
//!
//! # async fn run() -> sextant_driver::Result<()> {
//! let mut config = SextantConfig::default();
//! config.base_url = Some("http://localhost:8080/".to_string());
//! let driver = SextantDriver::launch(&config).await?;
//! let name_input = driver.element(by::css("input.name"));
//! driver.get("/signup").await?;
//! name_input.send_keys("Jane Doe").await?;
//! driver.quit().await
//! # }
//! ```

pub mod by;
pub mod driver;
pub mod element;
pub mod error;
pub mod finder;
pub mod locator;
mod lookup;
pub mod server;

pub use driver::{SextantDriver, DEFAULT_PAGE_LOAD_TIMEOUT};
pub use element::SextantElement;
pub use error::{Result, SextantError};
pub use finder::{ElementArrayFinder, ElementFinder};
pub use locator::Locator;
pub use server::DriverServer;
