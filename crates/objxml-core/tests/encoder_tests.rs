//! Serializer contract tests: element naming, list flattening, map entry
//! wrappers, flag gating, and whitespace modes.

use objxml_core::{Value, XmlError, XmlSerializer, parse};

/// A serializer producing compact output (exact-string assertions are
/// hostile to indentation).
fn compact() -> XmlSerializer {
    let mut xml = XmlSerializer::new();
    xml.formatted = false;
    xml
}

fn assert_serializes(value: &Value, expected_body: &str) {
    let text = compact().serialize(value).expect("serialize failed");
    assert_eq!(text, format!("<?xml version=\"1.0\"?>\n{expected_body}\n"));
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn simple_record() {
    let person = Value::record(
        "stdClass",
        vec![
            ("firstname", Value::string("Andreas")),
            ("lastname", Value::string("Mueller")),
        ],
    );
    assert_serializes(
        &person,
        "<stdClass><firstname>Andreas</firstname><lastname>Mueller</lastname></stdClass>",
    );
}

#[test]
fn nested_record_uses_field_name_not_type_name() {
    let root = Value::record(
        "stdClass",
        vec![(
            "today",
            Value::record("Date", vec![("year", Value::integer(2015))]),
        )],
    );
    assert_serializes(&root, "<stdClass><today><year>2015</year></today></stdClass>");
}

#[test]
fn empty_record_is_an_empty_element() {
    let root = Value::record::<&str>("Empty", vec![]);
    assert_serializes(&root, "<Empty/>");
}

#[test]
fn record_with_advanced_fixture() {
    let date = Value::record(
        "stdClass",
        vec![
            ("year", Value::string("2015")),
            ("month", Value::string("9")),
            ("day", Value::string("25")),
        ],
    );
    let object = Value::record(
        "stdClass",
        vec![
            ("firstname", Value::string("Andreas")),
            ("lastname", Value::string("Mueller")),
            ("today", date.clone()),
            (
                "languages",
                Value::list(vec![
                    Value::string("C#"),
                    Value::string("PHP"),
                    Value::string("..."),
                ]),
            ),
            (
                "meetings",
                Value::map(vec![
                    ("Breakfast", date),
                    ("Lunch", Value::string("12:30")),
                    ("Dinner", Value::string("19:00")),
                ]),
            ),
        ],
    );

    let mut xml = compact();
    xml.allow_associative_array = true;
    let text = xml.serialize(&object).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\"?>\n<stdClass><firstname>Andreas</firstname><lastname>Mueller</lastname>\
         <today><year>2015</year><month>9</month><day>25</day></today>\
         <languages>C#</languages><languages>PHP</languages><languages>...</languages>\
         <meetings><key>Breakfast</key><value><year>2015</year><month>9</month><day>25</day></value></meetings>\
         <meetings><key>Lunch</key><value>12:30</value></meetings>\
         <meetings><key>Dinner</key><value>19:00</value></meetings></stdClass>\n"
    );
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn list_field_emits_sibling_elements_without_wrapper() {
    let root = Value::record(
        "stdClass",
        vec![(
            "languages",
            Value::list(vec![Value::string("C#"), Value::string("PHP")]),
        )],
    );
    assert_serializes(
        &root,
        "<stdClass><languages>C#</languages><languages>PHP</languages></stdClass>",
    );
}

#[test]
fn empty_list_field_leaves_no_trace() {
    let root = Value::record(
        "stdClass",
        vec![
            ("empty", Value::list(vec![])),
            ("after", Value::string("x")),
        ],
    );
    assert_serializes(&root, "<stdClass><after>x</after></stdClass>");
}

#[test]
fn top_level_list_gets_synthetic_array_root() {
    let list = Value::list(vec![
        Value::integer(1),
        Value::string("x"),
        Value::boolean(true),
    ]);
    assert_serializes(
        &list,
        "<Array><integer>1</integer><string>x</string><boolean>1</boolean></Array>",
    );
}

#[test]
fn list_type_hint_names_unnamed_items() {
    let list = Value::list_of("lang", vec![Value::string("C#"), Value::string("PHP")]);
    assert_serializes(&list, "<Array><lang>C#</lang><lang>PHP</lang></Array>");
}

#[test]
fn field_name_wins_over_type_hint() {
    let root = Value::record(
        "stdClass",
        vec![("languages", Value::list_of("lang", vec![Value::string("C#")]))],
    );
    assert_serializes(&root, "<stdClass><languages>C#</languages></stdClass>");
}

#[test]
fn nested_list_gets_a_wrapper_element() {
    let root = Value::record(
        "stdClass",
        vec![(
            "rows",
            Value::list(vec![
                Value::list(vec![Value::string("a"), Value::string("b")]),
                Value::list(vec![Value::string("c"), Value::string("d")]),
            ]),
        )],
    );
    assert_serializes(
        &root,
        "<stdClass><rows><string>a</string><string>b</string></rows>\
         <rows><string>c</string><string>d</string></rows></stdClass>",
    );
}

#[test]
fn record_list_items_take_the_field_name() {
    let root = Value::record(
        "stdClass",
        vec![(
            "points",
            Value::list(vec![
                Value::record("Point", vec![("x", Value::integer(1))]),
                Value::record("Point", vec![("x", Value::integer(2))]),
            ]),
        )],
    );
    assert_serializes(
        &root,
        "<stdClass><points><x>1</x></points><points><x>2</x></points></stdClass>",
    );
}

// ============================================================================
// Scalars at the top level
// ============================================================================

#[test]
fn top_level_scalars_are_named_by_kind() {
    assert_serializes(&Value::string("hi"), "<string>hi</string>");
    assert_serializes(&Value::integer(42), "<integer>42</integer>");
    assert_serializes(&Value::float(2.5), "<float>2.5</float>");
    assert_serializes(&Value::boolean(true), "<boolean>1</boolean>");
    assert_serializes(&Value::boolean(false), "<boolean/>");
    assert_serializes(&Value::null(), "<null/>");
}

#[test]
fn non_finite_floats_degrade_to_null() {
    assert_eq!(Value::float(f64::NAN), Value::null());
    assert_eq!(Value::float(f64::INFINITY), Value::null());
}

// ============================================================================
// Maps
// ============================================================================

#[test]
fn map_is_rejected_without_the_flag() {
    let root = Value::record(
        "stdClass",
        vec![("meetings", Value::map(vec![("Lunch", Value::string("12:30"))]))],
    );
    let err = compact().serialize(&root).unwrap_err();
    assert!(matches!(err, XmlError::AssociativeArrayNotAllowed));
}

#[test]
fn deeply_nested_map_is_still_rejected() {
    let root = Value::record(
        "stdClass",
        vec![(
            "outer",
            Value::record(
                "stdClass",
                vec![(
                    "items",
                    Value::list(vec![Value::map(vec![("k", Value::string("v"))])]),
                )],
            ),
        )],
    );
    let err = compact().serialize(&root).unwrap_err();
    assert!(matches!(err, XmlError::AssociativeArrayNotAllowed));
}

#[test]
fn empty_map_still_requires_the_flag() {
    let err = compact()
        .serialize(&Value::map::<&str>(vec![]))
        .unwrap_err();
    assert!(matches!(err, XmlError::AssociativeArrayNotAllowed));
}

#[test]
fn empty_map_field_is_an_empty_element() {
    let root = Value::record(
        "stdClass",
        vec![
            ("m", Value::map::<&str>(vec![])),
            ("after", Value::string("x")),
        ],
    );
    let mut xml = compact();
    xml.allow_associative_array = true;
    let text = xml.serialize(&root).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\"?>\n<stdClass><m/><after>x</after></stdClass>\n"
    );
}

#[test]
fn top_level_map_wrappers_are_named_by_value_type() {
    let map = Value::map(vec![
        ("a", Value::integer(1)),
        ("b", Value::record("Point", vec![("x", Value::integer(2))])),
    ]);
    let mut xml = compact();
    xml.allow_associative_array = true;
    let text = xml.serialize(&map).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\"?>\n<Array>\
         <integer><key>a</key><value>1</value></integer>\
         <Point><key>b</key><value><x>2</x></value></Point></Array>\n"
    );
}

#[test]
fn map_entry_value_may_be_a_list() {
    let root = Value::record(
        "stdClass",
        vec![(
            "tags",
            Value::map(vec![("all", Value::list(vec![Value::string("a"), Value::string("b")]))]),
        )],
    );
    let mut xml = compact();
    xml.allow_associative_array = true;
    let text = xml.serialize(&root).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\"?>\n<stdClass><tags><key>all</key>\
         <value><string>a</string><string>b</string></value></tags></stdClass>\n"
    );
}

// ============================================================================
// Root naming
// ============================================================================

#[test]
fn explicit_root_name_overrides_type_name() {
    let person = Value::record("stdClass", vec![("name", Value::string("A"))]);
    let text = compact().serialize_named(&person, "Person").unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\"?>\n<Person><name>A</name></Person>\n"
    );
}

#[test]
fn invalid_root_name_is_unsupported() {
    let err = compact()
        .serialize_named(&Value::string("x"), "1bad")
        .unwrap_err();
    assert!(matches!(err, XmlError::UnsupportedValueKind(_)));
}

#[test]
fn invalid_field_name_is_unsupported() {
    let root = Value::record("stdClass", vec![("bad name", Value::string("x"))]);
    let err = compact().serialize(&root).unwrap_err();
    assert!(matches!(err, XmlError::UnsupportedValueKind(_)));
}

// ============================================================================
// Escaping and whitespace modes
// ============================================================================

#[test]
fn leaf_text_is_escaped() {
    let root = Value::record("stdClass", vec![("t", Value::string("a & b < c > d"))]);
    let text = compact().serialize(&root).unwrap();
    assert!(text.contains("<t>a &amp; b &lt; c &gt; d</t>"));
}

#[test]
fn formatted_output_indents_two_spaces() {
    let person = Value::record(
        "stdClass",
        vec![
            ("firstname", Value::string("Andreas")),
            ("lastname", Value::string("Mueller")),
        ],
    );
    let text = XmlSerializer::new().serialize(&person).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\"?>\n<stdClass>\n  <firstname>Andreas</firstname>\n  <lastname>Mueller</lastname>\n</stdClass>\n"
    );
}

#[test]
fn formatted_and_compact_are_structurally_identical() {
    let mut formatted = XmlSerializer::new();
    formatted.allow_associative_array = true;
    let mut plain = compact();
    plain.allow_associative_array = true;

    let value = Value::record(
        "stdClass",
        vec![
            ("name", Value::string("A")),
            ("langs", Value::list(vec![Value::string("a"), Value::string("b")])),
            ("map", Value::map(vec![("k", Value::string("v"))])),
        ],
    );

    let a = parse(&formatted.serialize(&value).unwrap()).unwrap();
    let b = parse(&plain.serialize(&value).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn failed_serialization_returns_no_partial_output() {
    let root = Value::record(
        "stdClass",
        vec![
            ("before", Value::string("emitted first")),
            ("map", Value::map(vec![("k", Value::string("v"))])),
        ],
    );
    // Err carries no document at all; the buffer is dropped.
    assert!(compact().serialize(&root).is_err());
}
