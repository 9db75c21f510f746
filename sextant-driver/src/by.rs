//! Locator builders.
//!
//! `css`, `xpath` and `link_text` produce native-strategy locators that the
//! driver resolves directly. [`id`] demonstrates the custom-lookup protocol:
//! it resolves through the override indirection rather than a native
//! strategy, so application-specific lookups built with [`Locator::custom`]
//! behave identically from the session's perspective.

use crate::locator::{Locator, Selector};

/// Locate by CSS selector.
pub fn css(selector: &str) -> Locator {
    Locator::native(
        Selector::Css(selector.to_string()),
        format!(r#"by.css("{selector}")"#),
    )
}

/// Locate by XPath expression.
pub fn xpath(expression: &str) -> Locator {
    Locator::native(
        Selector::XPath(expression.to_string()),
        format!(r#"by.xpath("{expression}")"#),
    )
}

/// Locate a link by its visible text.
pub fn link_text(text: &str) -> Locator {
    Locator::native(
        Selector::LinkText(text.to_string()),
        format!(r#"by.linkText("{text}")"#),
    )
}

/// Locate by element id, routed through the custom-lookup indirection.
///
/// The lookup asks the driver for every element matching the native id
/// strategy, scoped to the given element when one is supplied. Zero matches
/// surface as `NotFound` carrying `by.id("<id>")`; multiple matches log a
/// warning and the first is used.
pub fn id(id: &str) -> Locator {
    let needle = id.to_string();
    Locator::custom(format!(r#"by.id("{id}")"#), move |client, scope| {
        let needle = needle.clone();
        async move {
            let found = match &scope {
                Some(element) => element.find_all(fantoccini::Locator::Id(&needle)).await?,
                None => client.find_all(fantoccini::Locator::Id(&needle)).await?,
            };
            Ok(found)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_quote_the_selector() {
        assert_eq!(css("ul > li").message(), r#"by.css("ul > li")"#);
        assert_eq!(xpath("//input").message(), r#"by.xpath("//input")"#);
        assert_eq!(link_text("Sign in").message(), r#"by.linkText("Sign in")"#);
        assert_eq!(id("username").message(), r#"by.id("username")"#);
    }

    #[test]
    fn id_is_the_custom_lookup_variant() {
        assert!(id("username").is_custom());
        assert!(!css("#username").is_custom());
    }
}
