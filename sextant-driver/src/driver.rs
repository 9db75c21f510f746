//! The wrapped WebDriver session.
//!
//! [`SextantDriver`] owns the underlying fantoccini client and layers the
//! custom-lookup protocol, base-URL-relative navigation and deferred finder
//! construction on top of it. Native session capabilities are forwarded as
//! explicit typed methods that delegate to the client.

use std::future::Future;
use std::time::Duration;

use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, info};
use url::Url;
use webdriver::capabilities::Capabilities;

use sextant_common::SextantConfig;

use crate::by;
use crate::element::SextantElement;
use crate::error::{Result, SextantError};
use crate::finder::{ElementArrayFinder, ElementFinder};
use crate::locator::Locator;
use crate::lookup;
use crate::server::DriverServer;

/// Marker prepended to `window.name` during the two-phase navigation. Nothing
/// in this layer consumes it; a page-framework synchronization script can.
const DEFER_LABEL: &str = "APP_DEFER_BOOTSTRAP!";

const BLANK_PAGE: &str = "about:blank";
const PAGE_LOAD_TIMEOUT_MESSAGE: &str = "Timed out waiting for page to load";
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default time `get` waits for a page load before failing.
pub const DEFAULT_PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// A WebDriver session wrapper with deferred lookup and custom locators.
pub struct SextantDriver {
    client: Client,
    base_url: Option<Url>,
    /// When set, `get` navigates directly with no synchronization handshake.
    pub ignore_synchronization: bool,
    page_load_timeout: Duration,
    server: Option<DriverServer>,
}

impl SextantDriver {
    /// Wrap an already connected client. `base_url`, when given, is what
    /// relative `get` destinations resolve against.
    pub fn new(client: Client, base_url: Option<Url>) -> Self {
        Self {
            client,
            base_url,
            ignore_synchronization: false,
            page_load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT,
            server: None,
        }
    }

    /// Acquire a session per `config`.
    ///
    /// The default browser (`"chrome"`) connects straight to the configured
    /// WebDriver endpoint. Any other browser name starts the standalone
    /// server on the configured port, connects through it, and attaches the
    /// server handle so [`quit`](Self::quit) stops it again.
    pub async fn launch(config: &SextantConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().map(Url::parse).transpose()?;
        let page_load_timeout = Duration::from_secs(config.page_load_timeout_secs);

        let (client, server) = if config.browser == "chrome" {
            let client = ClientBuilder::native()
                .capabilities(chrome_capabilities(config.headless))
                .connect(&config.webdriver_url)
                .await?;
            info!(target: "sextant.session", url = %config.webdriver_url, "connected to local WebDriver");
            (client, None)
        } else {
            let server = DriverServer::start(&config.server_jar, config.server_port).await?;
            let mut caps = Capabilities::new();
            caps.insert("browserName".to_string(), json!(config.browser));
            let client = ClientBuilder::native()
                .capabilities(caps)
                .connect(server.url())
                .await?;
            info!(target: "sextant.session", browser = %config.browser, url = %server.url(), "connected through standalone server");
            (client, Some(server))
        };

        Ok(Self {
            client,
            base_url,
            ignore_synchronization: config.ignore_synchronization,
            page_load_timeout,
            server,
        })
    }

    /// The underlying client, for capabilities not forwarded here.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Navigate with the default page-load timeout.
    pub async fn get(&self, destination: &str) -> Result<()> {
        self.get_with_timeout(destination, self.page_load_timeout)
            .await
    }

    /// Navigate to `destination`, resolved against the base URL the way
    /// anchor hrefs resolve.
    ///
    /// Unless [`ignore_synchronization`](Self::ignore_synchronization) is
    /// set, navigation is two-phase: load `about:blank`, tag `window.name`
    /// with the defer marker and assign the real destination from script,
    /// then poll until the current URL has left the blank page. Elapsing
    /// `timeout` first fails with a `Timeout` error.
    pub async fn get_with_timeout(&self, destination: &str, timeout: Duration) -> Result<()> {
        let destination = resolve_destination(self.base_url.as_ref(), destination)?;
        debug!(target: "sextant.session", url = %destination, "navigating");

        if self.ignore_synchronization {
            self.client.goto(destination.as_str()).await?;
            return Ok(());
        }

        self.client.goto(BLANK_PAGE).await?;
        let script = format!(
            "window.name = \"{DEFER_LABEL}\" + window.name; \
             window.location.assign(\"{destination}\");"
        );
        self.client.execute(&script, vec![]).await?;

        let client = self.client.clone();
        self.wait_until(
            move || {
                let client = client.clone();
                async move { Ok(client.current_url().await?.as_str() != BLANK_PAGE) }
            },
            timeout,
            PAGE_LOAD_TIMEOUT_MESSAGE,
        )
        .await
    }

    /// Poll `condition` until it reports true or `timeout` elapses, at which
    /// point a `Timeout` error carrying `message` is returned. Failures from
    /// the condition itself propagate immediately.
    pub async fn wait_until<F, Fut>(
        &self,
        mut condition: F,
        timeout: Duration,
        message: &str,
    ) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if condition().await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(SextantError::Timeout(message.to_string()));
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    /// Find a single element session-wide. Custom-lookup locators are invoked
    /// unscoped; native locators delegate to the driver. The result is
    /// wrapped so nested lookups stay consistent.
    pub async fn find_element(&self, locator: Locator) -> Result<SextantElement> {
        let found = lookup::find_one_raw(&self.client, None, &locator).await?;
        Ok(SextantElement::wrap(&self.client, found))
    }

    /// Find every matching element session-wide, each individually wrapped.
    pub async fn find_elements(&self, locator: Locator) -> Result<Vec<SextantElement>> {
        let found = lookup::find_all_raw(&self.client, None, &locator).await?;
        Ok(found
            .into_iter()
            .map(|element| SextantElement::wrap(&self.client, element))
            .collect())
    }

    /// Whether at least one element matches session-wide.
    pub async fn is_element_present(&self, locator: Locator) -> Result<bool> {
        lookup::is_present_raw(&self.client, None, &locator).await
    }

    /// Convenience for [`find_element`](Self::find_element) with an id
    /// locator, with the same override and diagnostic semantics.
    pub async fn by_id(&self, id: &str) -> Result<SextantElement> {
        let locator = by::id(id);
        debug!(target: "sextant.lookup", locator = %locator.message(), "resolving id lookup");
        self.find_element(locator).await
    }

    /// A deferred finder for a single element; no lookup happens until a
    /// terminal operation is invoked on it.
    pub fn element(&self, locator: Locator) -> ElementFinder {
        ElementFinder::new(self.client.clone(), Vec::new(), locator)
    }

    /// A deferred finder over every element matching `locator`.
    pub fn element_all(&self, locator: Locator) -> ElementArrayFinder {
        ElementArrayFinder::new(self.client.clone(), Vec::new(), locator)
    }

    /// Css sugar for [`element`](Self::element).
    pub fn css(&self, selector: &str) -> ElementFinder {
        self.element(by::css(selector))
    }

    /// Css sugar for [`element_all`](Self::element_all).
    pub fn css_all(&self, selector: &str) -> ElementArrayFinder {
        self.element_all(by::css(selector))
    }

    pub async fn title(&self) -> Result<String> {
        Ok(self.client.title().await?)
    }

    pub async fn current_url(&self) -> Result<Url> {
        Ok(self.client.current_url().await?)
    }

    /// The full page source.
    pub async fn source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    /// A PNG screenshot of the viewport, as raw bytes.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.client.screenshot().await?)
    }

    pub async fn set_window_size(&self, width: u32, height: u32) -> Result<()> {
        self.client.set_window_size(width, height).await?;
        Ok(())
    }

    /// Run a script in the page, preserving the driver's asynchronous contract.
    pub async fn execute(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Close the WebDriver session and, if a standalone server was started
    /// for it, stop that too.
    pub async fn quit(self) -> Result<()> {
        self.client.close().await?;
        if let Some(server) = self.server {
            server.stop().await?;
        }
        Ok(())
    }
}

fn chrome_capabilities(headless: bool) -> Capabilities {
    let mut args: Vec<&str> = Vec::new();
    if headless {
        args.push("--headless");
        args.push("--disable-gpu");
    }
    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

fn resolve_destination(base: Option<&Url>, destination: &str) -> Result<Url> {
    match base {
        Some(base) => Ok(base.join(destination)?),
        None => Ok(Url::parse(destination)?),
    }
}
