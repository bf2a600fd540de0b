//! Integration tests: JSON → definition → JSON round-trip.
//!
//! Verifies the durable artifact survives a full load/save cycle with
//! structural equality, independent of key order and omitted optionals.

use fm_core::model::{DefaultValue, ElementKind, ElementType, FormDefinition};
use fm_core::schema::{from_json, to_json, to_json_pretty};
use pretty_assertions::assert_eq;

fn load_fixture() -> FormDefinition {
    from_json(include_str!("fixtures/contact_form.json")).expect("fixture should parse")
}

#[test]
fn roundtrip_contact_form_fixture() {
    let def = load_fixture();
    let emitted = to_json(&def).unwrap();
    let back = from_json(&emitted).unwrap();
    assert_eq!(back, def);
}

#[test]
fn roundtrip_pretty_and_compact_agree() {
    let def = load_fixture();
    let via_pretty = from_json(&to_json_pretty(&def).unwrap()).unwrap();
    let via_compact = from_json(&to_json(&def).unwrap()).unwrap();
    assert_eq!(via_pretty, via_compact);
}

#[test]
fn fixture_covers_every_element_type() {
    let def = load_fixture();
    for ty in ElementType::ALL {
        assert!(
            def.iter().any(|el| el.element_type() == ty),
            "fixture is missing a {ty} element"
        );
    }
}

#[test]
fn fixture_preserves_list_order() {
    let def = load_fixture();
    assert_eq!(def[0].id.as_str(), "text_0");
    assert_eq!(def.last().unwrap().id.as_str(), "table_14");

    let emitted = to_json(&def).unwrap();
    let back = from_json(&emitted).unwrap();
    let ids: Vec<_> = back.iter().map(|e| e.id).collect();
    let expected: Vec<_> = def.iter().map(|e| e.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn typed_payloads_deserialize_correctly() {
    let def = load_fixture();

    match &def[0].kind {
        ElementKind::Text {
            min_length,
            max_length,
            pattern,
        } => {
            assert_eq!(*min_length, Some(2));
            assert_eq!(*max_length, Some(80));
            assert_eq!(*pattern, None);
        }
        other => panic!("expected text payload, got {other:?}"),
    }

    let dropdown = def.iter().find(|e| e.id.as_str() == "dropdown_2").unwrap();
    assert_eq!(dropdown.kind.options().unwrap().len(), 3);

    let checkbox = def.iter().find(|e| e.id.as_str() == "checkbox_9").unwrap();
    assert_eq!(
        checkbox.default_value.as_ref().and_then(DefaultValue::as_bool),
        Some(false)
    );

    let date = def.iter().find(|e| e.id.as_str() == "date_10").unwrap();
    assert_eq!(
        date.default_value.as_ref().and_then(DefaultValue::as_text),
        Some("2024-05-01")
    );
}

#[test]
fn omitted_position_and_width_take_defaults() {
    let def = load_fixture();
    let radio = def.iter().find(|e| e.id.as_str() == "radio_6").unwrap();
    assert_eq!(radio.position(), (0.0, 0.0));
    assert_eq!(radio.width_or_default(), "280px");
}

#[test]
fn emitted_json_omits_absent_optionals() {
    let def = load_fixture();
    let emitted: serde_json::Value = serde_json::from_str(&to_json(&def).unwrap()).unwrap();
    // radio_6 had no x/y/width/placeholder in the fixture
    let radio = &emitted[3];
    assert!(radio.get("x").is_none());
    assert!(radio.get("width").is_none());
    assert!(radio.get("placeholder").is_none());
}
