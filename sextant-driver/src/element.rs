//! Wrapped element handles.
//!
//! [`SextantElement`] is an adapter over the raw driver element rather than a
//! mutation of it: interaction methods delegate unchanged, while the
//! lookup-capable methods branch on custom-vs-native locators and re-wrap
//! every element they produce, so nested lookups stay consistent no matter
//! how deep the chain goes. Because wrapping is a plain constructor over the
//! raw handle, applying it repeatedly changes nothing observable.

use fantoccini::elements::Element;
use fantoccini::Client;

use crate::by;
use crate::error::Result;
use crate::locator::Locator;
use crate::lookup;

/// A located element with scoped lookups and the standard interaction surface.
#[derive(Clone, Debug)]
pub struct SextantElement {
    element: Element,
    client: Client,
}

impl SextantElement {
    pub(crate) fn wrap(client: &Client, element: Element) -> Self {
        Self {
            element,
            client: client.clone(),
        }
    }

    /// The underlying driver element, for operations not forwarded here.
    pub fn raw(&self) -> &Element {
        &self.element
    }

    /// Find a single element scoped to this one.
    ///
    /// A custom-lookup locator is invoked with this element as its scope;
    /// a native locator delegates to the driver's per-element lookup.
    pub async fn find_element(&self, locator: Locator) -> Result<SextantElement> {
        let found = lookup::find_one_raw(&self.client, Some(&self.element), &locator).await?;
        Ok(SextantElement::wrap(&self.client, found))
    }

    /// Find every matching element scoped to this one, each individually wrapped.
    pub async fn find_elements(&self, locator: Locator) -> Result<Vec<SextantElement>> {
        let found = lookup::find_all_raw(&self.client, Some(&self.element), &locator).await?;
        Ok(found
            .into_iter()
            .map(|element| SextantElement::wrap(&self.client, element))
            .collect())
    }

    /// Whether at least one element matches, scoped to this one.
    pub async fn is_element_present(&self, locator: Locator) -> Result<bool> {
        lookup::is_present_raw(&self.client, Some(&self.element), &locator).await
    }

    /// Shortcut for [`find_element`](Self::find_element) with a css locator.
    pub async fn css(&self, selector: &str) -> Result<SextantElement> {
        self.find_element(by::css(selector)).await
    }

    /// Shortcut for [`find_elements`](Self::find_elements) with a css locator.
    pub async fn css_all(&self, selector: &str) -> Result<Vec<SextantElement>> {
        self.find_elements(by::css(selector)).await
    }

    pub async fn click(&self) -> Result<()> {
        self.element.click().await?;
        Ok(())
    }

    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.element.send_keys(text).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.element.clear().await?;
        Ok(())
    }

    /// The element's visible text.
    pub async fn text(&self) -> Result<String> {
        Ok(self.element.text().await?)
    }

    /// Read an attribute value, `None` when the attribute is absent.
    pub async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.element.attr(name).await?)
    }

    /// Read a DOM property value.
    pub async fn prop(&self, name: &str) -> Result<Option<String>> {
        Ok(self.element.prop(name).await?)
    }

    /// Read a computed CSS value.
    pub async fn css_value(&self, name: &str) -> Result<String> {
        Ok(self.element.css_value(name).await?)
    }

    pub async fn tag_name(&self) -> Result<String> {
        Ok(self.element.tag_name().await?)
    }

    /// The element's HTML; `inner` selects inner vs outer markup.
    pub async fn html(&self, inner: bool) -> Result<String> {
        Ok(self.element.html(inner).await?)
    }

    /// Position and size as `(x, y, width, height)`.
    pub async fn rectangle(&self) -> Result<(f64, f64, f64, f64)> {
        Ok(self.element.rectangle().await?)
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        Ok(self.element.is_displayed().await?)
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        Ok(self.element.is_enabled().await?)
    }

    pub async fn is_selected(&self) -> Result<bool> {
        Ok(self.element.is_selected().await?)
    }
}
