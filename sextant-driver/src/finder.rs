//! Deferred element finders.
//!
//! A finder captures a locator (and a chain of parent locators for scoping)
//! without touching the page; lookup happens only when a terminal operation
//! runs, so finders can be built in helper code before the page exists.
//! Every terminal operation re-resolves from scratch - nothing is memoized
//! between calls, and a finder stays reusable afterwards.
//!
//! Resolution of a chain `[l0, l1, ..., ln]` walks left-to-right: each step's
//! single-element lookup narrows the scope for the next, so lookups within
//! one chain resolve strictly in chain order.

use std::future::Future;

use fantoccini::elements::Element;
use fantoccini::Client;
use futures::future::try_join_all;

use crate::by;
use crate::element::SextantElement;
use crate::error::{Result, SextantError};
use crate::locator::Locator;
use crate::lookup;

async fn resolve_chain(client: &Client, using: &[Locator]) -> Result<Option<Element>> {
    let mut scope: Option<Element> = None;
    for step in using {
        let next = lookup::find_one_raw(client, scope.as_ref(), step).await?;
        scope = Some(next);
    }
    Ok(scope)
}

/// Deferred single-element finder.
#[derive(Clone)]
pub struct ElementFinder {
    client: Client,
    using: Vec<Locator>,
    locator: Locator,
}

impl ElementFinder {
    pub(crate) fn new(client: Client, using: Vec<Locator>, locator: Locator) -> Self {
        Self {
            client,
            using,
            locator,
        }
    }

    /// The locator this finder resolves, for diagnostics.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Resolve the chain and return the wrapped element.
    pub async fn find(&self) -> Result<SextantElement> {
        let scope = resolve_chain(&self.client, &self.using).await?;
        let found = lookup::find_one_raw(&self.client, scope.as_ref(), &self.locator).await?;
        Ok(SextantElement::wrap(&self.client, found))
    }

    /// Whether at least one element currently matches.
    pub async fn is_present(&self) -> Result<bool> {
        let scope = resolve_chain(&self.client, &self.using).await?;
        lookup::is_present_raw(&self.client, scope.as_ref(), &self.locator).await
    }

    /// A finder for an element nested inside this one: the current locator
    /// joins the scope chain and `locator` becomes the new target.
    pub fn element(&self, locator: Locator) -> ElementFinder {
        let mut using = self.using.clone();
        using.push(self.locator.clone());
        ElementFinder::new(self.client.clone(), using, locator)
    }

    /// Shortcut for [`element`](Self::element) with a css locator.
    pub fn css(&self, selector: &str) -> ElementFinder {
        self.element(by::css(selector))
    }

    /// Resolve this finder, then find every match of `locator` scoped to the
    /// resolved element.
    pub async fn find_elements(&self, locator: Locator) -> Result<Vec<SextantElement>> {
        self.find().await?.find_elements(locator).await
    }

    /// Resolve this finder, then report whether `locator` matches anything
    /// scoped to the resolved element.
    pub async fn is_element_present(&self, locator: Locator) -> Result<bool> {
        self.find().await?.is_element_present(locator).await
    }

    /// Shortcut for [`find_elements`](Self::find_elements) with a css locator.
    pub async fn css_all(&self, selector: &str) -> Result<Vec<SextantElement>> {
        self.find_elements(by::css(selector)).await
    }

    pub async fn click(&self) -> Result<()> {
        self.find().await?.click().await
    }

    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.find().await?.send_keys(text).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.find().await?.clear().await
    }

    pub async fn text(&self) -> Result<String> {
        self.find().await?.text().await
    }

    pub async fn attr(&self, name: &str) -> Result<Option<String>> {
        self.find().await?.attr(name).await
    }

    pub async fn css_value(&self, name: &str) -> Result<String> {
        self.find().await?.css_value(name).await
    }

    pub async fn tag_name(&self) -> Result<String> {
        self.find().await?.tag_name().await
    }

    pub async fn prop(&self, name: &str) -> Result<Option<String>> {
        self.find().await?.prop(name).await
    }

    pub async fn html(&self, inner: bool) -> Result<String> {
        self.find().await?.html(inner).await
    }

    pub async fn rectangle(&self) -> Result<(f64, f64, f64, f64)> {
        self.find().await?.rectangle().await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.find().await?.is_displayed().await
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.find().await?.is_enabled().await
    }

    pub async fn is_selected(&self) -> Result<bool> {
        self.find().await?.is_selected().await
    }
}

/// Deferred finder over the full sequence of matches.
#[derive(Clone)]
pub struct ElementArrayFinder {
    client: Client,
    using: Vec<Locator>,
    locator: Locator,
}

impl ElementArrayFinder {
    pub(crate) fn new(client: Client, using: Vec<Locator>, locator: Locator) -> Self {
        Self {
            client,
            using,
            locator,
        }
    }

    /// The locator this finder resolves, for diagnostics.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn matches(&self) -> Result<Vec<Element>> {
        let scope = resolve_chain(&self.client, &self.using).await?;
        lookup::find_all_raw(&self.client, scope.as_ref(), &self.locator).await
    }

    /// Every match in lookup order, each individually wrapped.
    pub async fn all(&self) -> Result<Vec<SextantElement>> {
        let found = self.matches().await?;
        Ok(found
            .into_iter()
            .map(|element| SextantElement::wrap(&self.client, element))
            .collect())
    }

    /// The number of elements currently matching.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.matches().await?.len())
    }

    /// The element at `index` in lookup order.
    pub async fn get(&self, index: usize) -> Result<SextantElement> {
        let mut found = self.matches().await?;
        let len = found.len();
        if index >= len {
            return Err(SextantError::OutOfBounds { index, len });
        }
        Ok(SextantElement::wrap(&self.client, found.remove(index)))
    }

    /// The first match; `NotFound` carrying the locator's message when the
    /// sequence is empty.
    pub async fn first(&self) -> Result<SextantElement> {
        let mut found = self.matches().await?;
        if found.is_empty() {
            return Err(SextantError::NotFound(self.locator.message().to_string()));
        }
        Ok(SextantElement::wrap(&self.client, found.remove(0)))
    }

    /// The last match; an index error when the sequence is empty.
    pub async fn last(&self) -> Result<SextantElement> {
        let found = self.matches().await?;
        let len = found.len();
        match found.into_iter().last() {
            Some(element) => Ok(SextantElement::wrap(&self.client, element)),
            None => Err(SextantError::OutOfBounds { index: 0, len }),
        }
    }

    /// Invoke `callback` once per match, in lookup order. Each callback is
    /// spawned and left to run; completion is not awaited.
    pub async fn each<F, Fut>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(SextantElement) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        for element in self.all().await? {
            tokio::spawn(callback(element));
        }
        Ok(())
    }

    /// Apply `map_fn(element, index)` to every match and collect the results.
    /// The aggregate preserves lookup order regardless of per-element
    /// completion order.
    pub async fn map<F, Fut, T>(&self, map_fn: F) -> Result<Vec<T>>
    where
        F: Fn(SextantElement, usize) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let elements = self.all().await?;
        try_join_all(
            elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| map_fn(element, index)),
        )
        .await
    }
}
