//! Error types for the driver layer.

use fantoccini::error::{CmdError, NewSessionError};

/// Error types surfaced by sessions, wrapped elements and finders.
#[derive(thiserror::Error, Debug)]
pub enum SextantError {
    /// A lookup that expected exactly one element found zero. Carries the
    /// locator's diagnostic message verbatim.
    #[error("No element found using locator: {0}")]
    NotFound(String),

    /// A wait predicate did not become true within the allotted time.
    /// Carries the caller-supplied diagnostic message.
    #[error("{0}")]
    Timeout(String),

    /// An index into a matched-element sequence was out of range.
    #[error("index {index} out of bounds for {len} matched element(s)")]
    OutOfBounds { index: usize, len: usize },

    /// A destination could not be resolved into a valid URL.
    #[error("invalid destination URL: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying WebDriver command failed; propagated unchanged.
    #[error("WebDriver command failed: {0}")]
    Driver(#[from] CmdError),

    /// The WebDriver session could not be established.
    #[error("failed to start WebDriver session: {0}")]
    Session(#[from] NewSessionError),

    /// The standalone server process could not be started or stopped.
    #[error("WebDriver server error: {0}")]
    Server(String),
}

/// Convenient alias for results that use [`SextantError`].
pub type Result<T> = std::result::Result<T, SextantError>;
