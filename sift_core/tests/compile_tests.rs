//! Tests for compiling filter sets into People API filter text

use sift_core::filter::{
    Combinator, Condition, FilterSet, ItemCondition, ListMode, Operator, compile, operators_for,
};
use percent_encoding::percent_decode_str;
use sift_core::{Attribute, AttributeType, attribute::standard_attributes};

fn raw(set: &FilterSet) -> String {
    compile(set).raw
}

#[test]
fn test_empty_filter_set() {
    let compiled = compile(&FilterSet::new(Combinator::Or));
    assert_eq!(compiled.raw, "");
    assert_eq!(compiled.encoded, "");
}

#[test]
fn test_scalar_equality() {
    let set = FilterSet::default().with_condition(Condition::new("firstName", Operator::Equal, "Ana"));
    assert_eq!(raw(&set), r#"{"firstName":"Ana"}"#);
}

#[test]
fn test_scalar_comparison_with_literal_number() {
    let set = FilterSet::default().with_condition(
        Condition::new("age", Operator::GreaterThan, 30i64).with_type(AttributeType::Integer),
    );
    assert_eq!(raw(&set), r##"{"#gt":{"age":30}}"##);
}

#[test]
fn test_scalar_comparison_with_text_number() {
    let set = FilterSet::default().with_condition(
        Condition::new("age", Operator::GreaterThan, "30").with_type(AttributeType::Integer),
    );
    assert_eq!(raw(&set), r##"{"#gt":{"age":30}}"##);
}

#[test]
fn test_and_keeps_input_order() {
    let set = FilterSet::new(Combinator::And)
        .with_condition(Condition::new("lastName", Operator::Equal, "Horvat"))
        .with_condition(Condition::new("city", Operator::StartsWith, "Zag"));
    assert_eq!(
        raw(&set),
        r##"{"#and":[{"lastName":"Horvat"},{"#startsWith":{"city":"Zag"}}]}"##
    );
}

#[test]
fn test_or_keeps_input_order() {
    let set = FilterSet::new(Combinator::Or)
        .with_condition(Condition::new("city", Operator::StartsWith, "Zag"))
        .with_condition(Condition::new("lastName", Operator::Equal, "Horvat"));
    assert_eq!(
        raw(&set),
        r##"{"#or":[{"#startsWith":{"city":"Zag"}},{"lastName":"Horvat"}]}"##
    );
}

#[test]
fn test_incomplete_conditions_are_skipped_in_combination() {
    let set = FilterSet::new(Combinator::And)
        .with_condition(Condition::new("lastName", Operator::Equal, "Horvat"))
        .with_condition(Condition::new("city", Operator::Equal, ""))
        .with_condition(Condition::new("", Operator::Equal, "x"));
    assert_eq!(raw(&set), r#"{"lastName":"Horvat"}"#);
}

#[test]
fn test_membership_trims_and_drops_empty() {
    let set = FilterSet::default().with_condition(Condition::new("city", Operator::In, "a, b ,c"));
    assert_eq!(raw(&set), r##"{"#in":{"city":["a","b","c"]}}"##);
}

#[test]
fn test_not_in() {
    let set = FilterSet::default().with_condition(Condition::new("country", Operator::NotIn, "HR,,SI"));
    assert_eq!(raw(&set), r##"{"#notIn":{"country":["HR","SI"]}}"##);
}

#[test]
fn test_exists_ignores_value() {
    let set = FilterSet::default().with_condition(
        Condition::new("tags", Operator::Exists, "whatever").with_type(AttributeType::Array),
    );
    assert_eq!(raw(&set), r##"{"#exists":{"tags":true}}"##);

    let set = FilterSet::default()
        .with_condition(Condition::without_value("tags", Operator::Exists).with_type(AttributeType::Array));
    assert_eq!(raw(&set), r##"{"#exists":{"tags":true}}"##);
}

#[test]
fn test_dotted_path_nesting() {
    let set = FilterSet::default().with_condition(Condition::new(
        "contactInformation.email.address",
        Operator::Equal,
        "a@b.com",
    ));
    assert_eq!(
        raw(&set),
        r#"{"contactInformation":{"email":{"address":"a@b.com"}}}"#
    );
}

#[test]
fn test_dotted_path_with_operator() {
    let set = FilterSet::default().with_condition(Condition::new(
        "contactInformation.email.address",
        Operator::EndsWith,
        "@b.com",
    ));
    assert_eq!(
        raw(&set),
        r##"{"#endsWith":{"contactInformation":{"email":{"address":"@b.com"}}}}"##
    );
}

#[test]
fn test_array_field_operator_is_innermost() {
    let set = FilterSet::default().with_condition(
        Condition::new("tags", Operator::NotContain, "churned").with_type(AttributeType::Array),
    );
    assert_eq!(raw(&set), r##"{"tags":{"#notContain":"churned"}}"##);
}

#[test]
fn test_list_condition_match_any() {
    let set = FilterSet::default().with_condition(Condition::list(
        "data.ListName",
        ListMode::MatchAny,
        Combinator::And,
        vec![ItemCondition::new("color", Operator::Equal, "red")],
    ));
    assert_eq!(
        raw(&set),
        "{\"#any\":{\"data\\u0001ListName\":{\"#and\":[{\"color\":\"red\"}]}}}"
    );
}

#[test]
fn test_list_condition_combined_with_flat_condition() {
    let set = FilterSet::new(Combinator::Or)
        .with_condition(Condition::new("city", Operator::Equal, "Split"))
        .with_condition(Condition::list(
            "data.Orders",
            ListMode::MatchAll,
            Combinator::Or,
            vec![
                ItemCondition::new("qty", Operator::LessThan, "3").with_type(AttributeType::Integer),
                ItemCondition::new("color", Operator::Equal, ""),
            ],
        ));
    assert_eq!(
        raw(&set),
        "{\"#or\":[{\"city\":\"Split\"},{\"#all\":{\"data\\u0001Orders\":{\"#or\":[{\"#lt\":{\"qty\":3}}]}}}]}"
    );
}

#[test]
fn test_boolean_field() {
    let set = FilterSet::default().with_condition(
        Condition::new("customAttributes.newsletter", Operator::Equal, "yes")
            .with_type(AttributeType::Boolean),
    );
    assert_eq!(raw(&set), r#"{"customAttributes":{"newsletter":true}}"#);
}

#[test]
fn test_decimal_field_without_fraction() {
    let set = FilterSet::default().with_condition(
        Condition::new("score", Operator::GreaterOrEqual, "4.0").with_type(AttributeType::Decimal),
    );
    assert_eq!(raw(&set), r##"{"#gte":{"score":4}}"##);
}

#[test]
fn test_encoded_round_trip() {
    let set = FilterSet::new(Combinator::And)
        .with_condition(Condition::new("firstName", Operator::Equal, "Šime Žunić & co?"))
        .with_condition(Condition::new("city", Operator::In, "東京, Zürich"))
        .with_condition(Condition::list(
            "data.Orders",
            ListMode::MatchAny,
            Combinator::And,
            vec![ItemCondition::new("note", Operator::Contains, "100%")],
        ));

    let compiled = compile(&set);
    assert!(!compiled.encoded.contains('{'));
    assert!(!compiled.encoded.contains(' '));
    assert!(!compiled.encoded.contains('&'));

    let decoded = percent_decode_str(&compiled.encoded).decode_utf8().unwrap();
    assert_eq!(decoded, compiled.raw);
}

#[test]
fn test_round_trip_of_separator() {
    let raw_text = "{\"#any\":{\"data\u{1}Orders\":true}}";
    let encoded = sift_core::filter::encode(raw_text);
    assert!(encoded.contains("%01"));
    assert_eq!(percent_decode_str(&encoded).decode_utf8().unwrap(), raw_text);
}

#[test]
fn test_compilation_is_idempotent() {
    let set = FilterSet::new(Combinator::Or)
        .with_condition(Condition::new("age", Operator::In, "1,2,3").with_type(AttributeType::Integer))
        .with_condition(Condition::new("tags", Operator::Contains, "vip").with_type(AttributeType::Array))
        .with_condition(Condition::list(
            "data.Orders",
            ListMode::MatchAll,
            Combinator::And,
            vec![
                ItemCondition::new("b", Operator::Equal, "1"),
                ItemCondition::new("a", Operator::NotEqual, "2"),
            ],
        ));

    assert_eq!(compile(&set), compile(&set));
}

#[test]
fn test_filter_file_compiles_after_type_resolution() {
    let json = r#"{
        "logic": "and",
        "conditions": [
            {"field": "tags", "operator": "contains", "value": "vip"},
            {"field": "gender", "operator": "eq", "value": "FEMALE"}
        ]
    }"#;

    let mut set: FilterSet = serde_json::from_str(json).unwrap();
    set.resolve_types(&standard_attributes());

    assert_eq!(
        raw(&set),
        r##"{"#and":[{"tags":{"#contains":"vip"}},{"gender":"FEMALE"}]}"##
    );
}

#[test]
fn test_numeric_fields_never_offer_text_operators() {
    for attribute_type in [AttributeType::Integer, AttributeType::Decimal, AttributeType::Number] {
        let ops = operators_for(&Attribute::new("points", attribute_type));
        for text_op in [
            Operator::Contains,
            Operator::NotContain,
            Operator::StartsWith,
            Operator::EndsWith,
        ] {
            assert!(!ops.contains(&text_op), "{attribute_type} offered {text_op:?}");
        }
    }
}
