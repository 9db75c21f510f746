//! Shared resolution core.
//!
//! Session-level and element-scoped lookups funnel through these helpers so
//! the override-vs-native branching and the zero/one/many semantics for
//! custom lookups live in exactly one place. A `scope` of `None` means the
//! lookup runs against the whole session.

use fantoccini::elements::Element;
use fantoccini::Client;
use tracing::warn;

use crate::error::{Result, SextantError};
use crate::locator::{Locator, Strategy};

pub(crate) async fn find_all_raw(
    client: &Client,
    scope: Option<&Element>,
    locator: &Locator,
) -> Result<Vec<Element>> {
    match locator.strategy() {
        Strategy::Lookup(lookup) => lookup(client.clone(), scope.cloned()).await,
        Strategy::Native(selector) => {
            let found = match scope {
                Some(element) => element.find_all(selector.as_fantoccini()).await?,
                None => client.find_all(selector.as_fantoccini()).await?,
            };
            Ok(found)
        }
    }
}

pub(crate) async fn find_one_raw(
    client: &Client,
    scope: Option<&Element>,
    locator: &Locator,
) -> Result<Element> {
    match locator.strategy() {
        Strategy::Lookup(lookup) => {
            let mut found = lookup(client.clone(), scope.cloned()).await?;
            if found.is_empty() {
                return Err(SextantError::NotFound(locator.message().to_string()));
            }
            if found.len() > 1 {
                warn!(
                    target: "sextant.lookup",
                    locator = %locator.message(),
                    matches = found.len(),
                    "more than one element found for locator - you may need to be more specific"
                );
            }
            Ok(found.swap_remove(0))
        }
        Strategy::Native(selector) => {
            let found = match scope {
                Some(element) => element.find(selector.as_fantoccini()).await?,
                None => client.find(selector.as_fantoccini()).await?,
            };
            Ok(found)
        }
    }
}

pub(crate) async fn is_present_raw(
    client: &Client,
    scope: Option<&Element>,
    locator: &Locator,
) -> Result<bool> {
    let found = find_all_raw(client, scope, locator).await?;
    Ok(!found.is_empty())
}
