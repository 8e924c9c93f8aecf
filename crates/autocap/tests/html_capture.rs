//! End-to-end capture over parsed HTML

use autocap::{
    CaptureConfig, DomElement, ElementFilter, ElementRecord, Fingerprinter, chain_matches,
    fingerprint, html,
};
use serde_json::json;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <nav class="top">
      <a href="/">Home</a>
      <!-- pricing moved -->
      <a id="signup" class="btn btn-primary" href="/signup" data-empty="">Sign up</a>
    </nav>
    <form id="pay">
      <label for="card">Card</label>
      <input id="card" name="cc-number" type="text" value="4111111111111111">
      <span id="echo">Card 4111 1111 1111 1111 charged</span>
      <span id="echo2">Paid with 4111111111111111 today</span>
      <button id="buy" type="submit">Buy</button>
    </form>
    <div class="ph-no-capture">
      <p id="secret">Account 12345</p>
    </div>
    <svg class="icon"><circle class="dot" r="1"/></svg>
  </body>
</html>"#;

#[test]
fn test_link_fingerprint() {
    let tree = html::parse(PAGE).unwrap();
    let link = DomElement::by_id(&tree, "signup").unwrap();

    let fp = fingerprint(&link);
    assert_eq!(
        serde_json::to_value(&fp).unwrap(),
        json!({
            "tag_name": "a",
            "$el_text": "Sign up",
            "classes": ["btn", "btn-primary"],
            "attr__href": "/signup",
            "attr__class": "btn btn-primary",
            "attr__id": "signup",
            "nth_child": 2,
            "nth_of_type": 2
        })
    );
}

#[test]
fn test_comment_sibling_not_counted() {
    let tree = html::parse(PAGE).unwrap();
    let buy = DomElement::by_id(&tree, "buy").unwrap();

    let fp = fingerprint(&buy);
    // label, input, span, span precede the button
    assert_eq!((fp.nth_child, fp.nth_of_type), (5, 1));
    assert_eq!(fp.text.as_deref(), Some("Buy"));
}

#[test]
fn test_input_text_never_captured() {
    let tree = html::parse(PAGE).unwrap();
    let input = DomElement::by_id(&tree, "card").unwrap();

    let fp = fingerprint(&input);
    assert_eq!(fp.text, None);
    assert_eq!(fp.attribute("name"), Some("cc-number"));
}

#[test]
fn test_card_number_dropped_from_text() {
    let tree = html::parse(PAGE).unwrap();
    let echo = DomElement::by_id(&tree, "echo2").unwrap();

    let fp = fingerprint(&echo);
    assert_eq!(fp.text.as_deref(), Some("Paid with today"));
    assert_eq!((fp.nth_child, fp.nth_of_type), (4, 2));
}

#[test]
fn test_opt_out_subtree() {
    let tree = html::parse(PAGE).unwrap();
    let secret = DomElement::by_id(&tree, "secret").unwrap();

    assert_eq!(fingerprint(&secret).text, None);

    let config = CaptureConfig {
        opt_out_class: "something-else".into(),
        ..CaptureConfig::default()
    };
    let fp = Fingerprinter::new(config).fingerprint(&secret).unwrap();
    assert_eq!(fp.text.as_deref(), Some("Account 12345"));
}

#[test]
fn test_svg_classes() {
    let tree = html::parse(PAGE).unwrap();
    let circle = DomElement::by_tag(&tree, "circle", 0).unwrap();

    let fp = fingerprint(&circle);
    assert_eq!(fp.tag_name, "circle");
    assert_eq!(fp.classes, vec!["dot"]);
}

#[test]
fn test_capture_chain() {
    let tree = html::parse(PAGE).unwrap();
    let link = DomElement::by_id(&tree, "signup").unwrap();

    let chain = Fingerprinter::default().capture_chain(&link).unwrap();
    let tags: Vec<&str> = chain.iter().map(|c| c.fingerprint.tag_name.as_str()).collect();
    assert_eq!(tags, vec!["a", "nav", "body", "html"]);
    assert!(chain.iter().enumerate().all(|(i, c)| c.order == i));

    let value = serde_json::to_value(&chain[1]).unwrap();
    assert_eq!(value["order"], 1);
    assert_eq!(value["classes"], json!(["top"]));
}

#[test]
fn test_capture_chain_stop_tag() {
    let tree = html::parse(PAGE).unwrap();
    let buy = DomElement::by_id(&tree, "buy").unwrap();

    let config = CaptureConfig {
        stop_tag: "BODY".into(),
        ..CaptureConfig::default()
    };
    let chain = Fingerprinter::new(config).capture_chain(&buy).unwrap();
    let tags: Vec<&str> = chain.iter().map(|c| c.fingerprint.tag_name.as_str()).collect();
    assert_eq!(tags, vec!["button", "form", "body"]);
}

#[test]
fn test_chain_round_trips_through_json() {
    let tree = html::parse(PAGE).unwrap();
    let link = DomElement::by_id(&tree, "signup").unwrap();
    let chain = Fingerprinter::default().capture_chain(&link).unwrap();

    let encoded = serde_json::to_string(&chain).unwrap();
    let decoded: Vec<autocap::CapturedElement> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, chain);
}

#[test]
fn test_chain_rejects_impossible_position() {
    let bad = json!([{"order": 0, "tag_name": "a", "nth_child": 1, "nth_of_type": 2}]);
    assert!(serde_json::from_value::<Vec<autocap::CapturedElement>>(bad).is_err());
}

#[test]
fn test_filter_against_chain() {
    let tree = html::parse(PAGE).unwrap();
    let link = DomElement::by_id(&tree, "signup").unwrap();
    let chain = Fingerprinter::default().capture_chain(&link).unwrap();

    let record = ElementRecord::from_captured(&chain[0]);
    assert_eq!(record.href.as_deref(), Some("/signup"));
    assert_eq!(record.attr_id.as_deref(), Some("signup"));

    let filters: Vec<ElementFilter> = serde_json::from_value(json!([
        {"tag_name": "a", "text": "Sign up"},
        {"tag_name": "nav", "attr_class": ["top"]}
    ]))
    .unwrap();
    assert!(chain_matches(&chain, &filters));

    let filters: Vec<ElementFilter> =
        serde_json::from_value(json!([{"tag_name": "a", "nth_child": 1}])).unwrap();
    assert!(!chain_matches(&chain, &filters));
}
