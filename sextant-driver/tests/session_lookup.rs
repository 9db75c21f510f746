//! Session-level lookup semantics: custom-vs-native dispatch, zero/one/many
//! custom-lookup results, and element re-wrapping.

mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::Mock;

use common::{connect, element_ref, session_path, webdriver_stub, webdriver_value};
use sextant_driver::{by, SextantDriver, SextantError};

#[tokio::test]
async fn custom_lookup_is_used_instead_of_the_native_strategy() {
    let server = webdriver_stub().await;

    // by::id resolves through find_all; the native single-element endpoint is
    // deliberately not mounted, so a native-path lookup would 404.
    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .respond_with(webdriver_value(json!([element_ref("e1")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("element/e1/text")))
        .respond_with(webdriver_value(json!("hello")))
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    let element = driver.find_element(by::id("greeting")).await.unwrap();
    assert_eq!(element.text().await.unwrap(), "hello");
}

#[tokio::test]
async fn empty_custom_lookup_fails_with_the_locator_message() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .respond_with(webdriver_value(json!([])))
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    let err = driver.find_element(by::id("missing")).await.unwrap_err();
    assert!(matches!(err, SextantError::NotFound(_)));
    assert!(err.to_string().contains(r#"by.id("missing")"#));
}

#[tokio::test]
async fn ambiguous_custom_lookup_takes_the_first_match() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .respond_with(webdriver_value(json!([
            element_ref("e1"),
            element_ref("e2")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("element/e1/text")))
        .respond_with(webdriver_value(json!("first")))
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    let element = driver.find_element(by::id("dup")).await.unwrap();
    assert_eq!(element.text().await.unwrap(), "first");
}

#[tokio::test]
async fn native_css_lookup_delegates_to_the_driver() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("element")))
        .and(body_partial_json(
            json!({ "using": "css selector", "value": "input.email" }),
        ))
        .respond_with(webdriver_value(element_ref("e1")))
        .expect(1)
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    driver.find_element(by::css("input.email")).await.unwrap();
}

#[tokio::test]
async fn user_supplied_lookup_behaves_like_a_builtin_one() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .and(body_partial_json(
            json!({ "using": "css selector", "value": "[data-hook='cart']" }),
        ))
        .respond_with(webdriver_value(json!([element_ref("e1")])))
        .expect(1)
        .mount(&server)
        .await;

    let locator = sextant_driver::Locator::custom(
        r#"by.hook("cart")"#,
        |client, scope| async move {
            let found = match &scope {
                Some(element) => {
                    element
                        .find_all(fantoccini::Locator::Css("[data-hook='cart']"))
                        .await?
                }
                None => {
                    client
                        .find_all(fantoccini::Locator::Css("[data-hook='cart']"))
                        .await?
                }
            };
            Ok(found)
        },
    );

    let driver = SextantDriver::new(connect(&server).await, None);
    driver.find_element(locator).await.unwrap();
}

#[tokio::test]
async fn element_scoped_custom_lookup_passes_the_scope() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("element")))
        .respond_with(webdriver_value(element_ref("e1")))
        .mount(&server)
        .await;
    // Scoped custom lookup must hit the per-element plural endpoint.
    Mock::given(method("POST"))
        .and(path(session_path("element/e1/elements")))
        .respond_with(webdriver_value(json!([element_ref("e2")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("element/e2/text")))
        .respond_with(webdriver_value(json!("scoped")))
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    let form = driver.find_element(by::css("#form")).await.unwrap();
    let submit = form.find_element(by::id("submit")).await.unwrap();
    assert_eq!(submit.text().await.unwrap(), "scoped");
}

#[tokio::test]
async fn is_element_present_reports_both_ways() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .and(body_partial_json(json!({ "value": "ul li" })))
        .respond_with(webdriver_value(json!([element_ref("e1")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .respond_with(webdriver_value(json!([])))
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    assert!(driver.is_element_present(by::css("ul li")).await.unwrap());
    assert!(!driver.is_element_present(by::id("gone")).await.unwrap());
}

#[tokio::test]
async fn find_elements_wraps_every_result() {
    let server = webdriver_stub().await;

    Mock::given(method("POST"))
        .and(path(session_path("elements")))
        .respond_with(webdriver_value(json!([
            element_ref("e1"),
            element_ref("e2")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("element/e1/text")))
        .respond_with(webdriver_value(json!("a")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("element/e2/text")))
        .respond_with(webdriver_value(json!("b")))
        .mount(&server)
        .await;

    let driver = SextantDriver::new(connect(&server).await, None);
    let elements = driver.find_elements(by::css("li")).await.unwrap();
    assert_eq!(elements.len(), 2);

    let mut texts = Vec::new();
    for element in &elements {
        texts.push(element.text().await.unwrap());
    }
    assert_eq!(texts, vec!["a", "b"]);
}
