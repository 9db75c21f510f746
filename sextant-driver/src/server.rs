//! Standalone WebDriver server lifecycle.
//!
//! Non-default browser targets go through a standalone server started from a
//! jar artifact. The handle is attached to the session that connected through
//! it so teardown can stop the process again.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tracing::info;

use crate::error::{Result, SextantError};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(30);
const STARTUP_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A standalone WebDriver server child process.
pub struct DriverServer {
    child: Child,
    url: String,
    port: u16,
}

impl DriverServer {
    /// Spawn the server jar on `port` and wait until it accepts connections.
    pub async fn start(jar: &Path, port: u16) -> Result<Self> {
        let child = Command::new("java")
            .arg("-jar")
            .arg(jar)
            .arg("-port")
            .arg(port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SextantError::Server(format!("failed to spawn {}: {e}", jar.display()))
            })?;

        let server = Self {
            child,
            url: format!("http://localhost:{port}/wd/hub"),
            port,
        };
        server.wait_ready().await?;
        info!(target: "sextant.server", port, "WebDriver server ready");
        Ok(server)
    }

    /// Address sessions should connect to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn wait_ready(&self) -> Result<()> {
        let deadline = tokio::time::Instant::now() + STARTUP_TIMEOUT;
        loop {
            if TcpStream::connect(("localhost", self.port)).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(SextantError::Server(format!(
                    "timed out waiting for WebDriver server on port {}",
                    self.port
                )));
            }
            tokio::time::sleep(STARTUP_POLL_INTERVAL).await;
        }
    }

    /// Stop the server process.
    pub async fn stop(mut self) -> Result<()> {
        self.child
            .kill()
            .await
            .map_err(|e| SextantError::Server(format!("failed to stop server: {e}")))?;
        info!(target: "sextant.server", port = self.port, "WebDriver server stopped");
        Ok(())
    }
}
