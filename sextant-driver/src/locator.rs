//! Locator descriptors.
//!
//! A [`Locator`] either names a native WebDriver strategy (resolved directly
//! by fantoccini) or carries a caller-supplied lookup function that replaces
//! the native find behavior entirely. Both variants flow through the same
//! resolution code, so a custom lookup is indistinguishable from a native one
//! from a session's or finder's point of view.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use fantoccini::elements::Element;
use fantoccini::Client;
use futures::future::BoxFuture;

use crate::error::Result;

/// Caller-supplied resolution logic. Invoked with a handle to the session's
/// client and, when scoped to an element, that element; returns every match.
pub type LookupFn =
    dyn Fn(Client, Option<Element>) -> BoxFuture<'static, Result<Vec<Element>>> + Send + Sync;

/// Native selector strategies understood by the underlying driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selector {
    Css(String),
    LinkText(String),
    XPath(String),
}

impl Selector {
    pub(crate) fn as_fantoccini(&self) -> fantoccini::Locator<'_> {
        match self {
            Selector::Css(s) => fantoccini::Locator::Css(s),
            Selector::LinkText(s) => fantoccini::Locator::LinkText(s),
            Selector::XPath(s) => fantoccini::Locator::XPath(s),
        }
    }
}

/// Exactly one of the two resolution paths is set per locator.
#[derive(Clone)]
pub(crate) enum Strategy {
    Native(Selector),
    Lookup(Arc<LookupFn>),
}

/// Immutable descriptor used to find elements.
///
/// Carries a human-readable `message` used verbatim in "no element found" and
/// "more than one element found" diagnostics.
#[derive(Clone)]
pub struct Locator {
    strategy: Strategy,
    message: String,
}

impl Locator {
    pub(crate) fn native(selector: Selector, message: String) -> Self {
        Self {
            strategy: Strategy::Native(selector),
            message,
        }
    }

    /// Build a locator whose resolution is deferred to `lookup` instead of a
    /// native driver strategy.
    ///
    /// The lookup receives a clone of the session client plus the scope
    /// element (`None` for session-wide lookups) and returns every matching
    /// element. It is invoked afresh on every resolution; nothing is cached.
    pub fn custom<F, Fut>(message: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(Client, Option<Element>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Element>>> + Send + 'static,
    {
        let boxed = move |client: Client, scope: Option<Element>| -> BoxFuture<'static, Result<Vec<Element>>> {
            Box::pin(lookup(client, scope))
        };
        Self {
            strategy: Strategy::Lookup(Arc::new(boxed)),
            message: message.into(),
        }
    }

    /// The diagnostic label, e.g. `by.css("li")`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this locator resolves through a custom lookup function.
    pub fn is_custom(&self) -> bool {
        matches!(self.strategy, Strategy::Lookup(_))
    }

    pub(crate) fn strategy(&self) -> &Strategy {
        &self.strategy
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("message", &self.message)
            .field("custom", &self.is_custom())
            .finish()
    }
}
