// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use assert_matches::assert_matches;
use test_case::test_case;

use super::*;
use crate::registry::{EnumType, Field, ObjectType};

fn registry() -> Registry<()> {
    let mut builder = Registry::builder("Query");
    builder
        .register(EnumType::new("Category").value("SERVER").value("RELEASE"))
        .unwrap()
        .register(ObjectType::new("Query").field(Field::new("ok", TypeRef::named("Boolean"))))
        .unwrap();
    builder.finish().unwrap()
}

fn specs() -> Vec<ArgumentSpec> {
    vec![
        ArgumentSpec::new("id", TypeRef::named_nn(TypeRef::STRING)),
        ArgumentSpec::new("category", TypeRef::named("Category")),
        ArgumentSpec::new("limit", TypeRef::named_nn(TypeRef::INT)).default_value(10),
    ]
}

fn raw(arguments: &[(&str, Value)]) -> IndexMap<Name, Value> {
    arguments
        .iter()
        .map(|(name, value)| (Name::new(name), value.clone()))
        .collect()
}

fn bind(arguments: &[(&str, Value)]) -> Result<BoundArguments, FieldError> {
    bind_arguments(&registry(), "posts", &specs(), raw(arguments))
}

#[test]
fn defaults_apply_and_absent_optionals_stay_absent() {
    let arguments = bind(&[("id", Value::from("a"))]).unwrap();

    assert_eq!(arguments.string("id"), Ok("a"));
    assert_eq!(arguments.int("limit"), Ok(10));
    assert!(!arguments.contains("category"));
    assert_eq!(arguments.enum_name("category"), None);
}

#[test]
fn explicit_null_is_kept_distinct_from_absence() {
    let arguments = bind(&[("id", Value::from("a")), ("category", Value::Null)]).unwrap();

    assert!(arguments.contains("category"));
    assert_eq!(arguments.get("category"), Some(&Value::Null));
    assert_eq!(arguments.enum_name("category"), None);
}

#[test]
fn client_values_override_defaults() {
    let arguments = bind(&[("id", Value::from("a")), ("limit", Value::from(-1))]).unwrap();

    assert_eq!(arguments.int("limit"), Ok(-1));
}

#[test]
fn missing_required_argument() {
    assert_eq!(
        bind(&[]),
        Err(FieldError::MissingArgument {
            field: "posts".to_owned(),
            argument: "id".to_owned(),
        })
    );
}

#[test]
fn null_for_non_null_argument() {
    assert_matches!(
        bind(&[("id", Value::Null)]),
        Err(FieldError::InvalidArgument { argument, expected, .. })
            if argument == "id" && expected == "String!"
    );
}

#[test]
fn unknown_argument() {
    assert_matches!(
        bind(&[("id", Value::from("a")), ("order", Value::from("asc"))]),
        Err(FieldError::UnknownArgument { argument, .. }) if argument == "order"
    );
}

#[test_case(Value::Enum(Name::new("RELEASE")) ; "enum literal")]
#[test_case(Value::from("RELEASE") ; "wire name string")]
fn enum_coercion(category: Value) {
    let arguments = bind(&[("id", Value::from("a")), ("category", category)]).unwrap();

    assert_eq!(arguments.get("category"), Some(&Value::Enum(Name::new("RELEASE"))));
    assert_eq!(arguments.enum_name("category"), Some("RELEASE"));
}

#[test_case(Value::from("DRAFT"), "DRAFT" ; "unknown wire name")]
#[test_case(Value::Enum(Name::new("DRAFT")), "DRAFT" ; "unknown enum literal")]
#[test_case(Value::from("release"), "release" ; "wrong case")]
#[test_case(Value::from(3), "3" ; "number")]
fn invalid_enum_value(category: Value, reported: &str) {
    let error = bind(&[("id", Value::from("a")), ("category", category)]).unwrap_err();

    assert_matches!(
        &error,
        FieldError::InvalidEnumValue { type_name, value } if type_name == "Category" && value == reported
    );
    assert_eq!(
        error.to_string(),
        format!("Value `{reported}` is not a member of enum `Category`")
    );
}

#[test_case(TypeRef::STRING, Value::from("x"), Some(Value::from("x")))]
#[test_case(TypeRef::STRING, Value::from(1), None)]
#[test_case(TypeRef::ID, Value::from(7), Some(Value::from("7")))]
#[test_case(TypeRef::INT, Value::from(7), Some(Value::from(7)))]
#[test_case(TypeRef::INT, Value::from(i64::from(i32::MAX) + 1), None ; "int out of range")]
#[test_case(TypeRef::INT, Value::from(1.5), None ; "int from float")]
#[test_case(TypeRef::FLOAT, Value::from(7), Some(Value::from(7)) ; "float from int")]
#[test_case(TypeRef::BOOLEAN, Value::from(true), Some(Value::from(true)))]
#[test_case(TypeRef::BOOLEAN, Value::from("true"), None)]
fn scalar_coercion(type_name: &str, value: Value, expected: Option<Value>) {
    let coerced = coerce_input(&registry(), &TypeRef::named(type_name), value).ok();

    assert_eq!(coerced, expected);
}

#[test]
fn single_values_coerce_to_lists() {
    let registry = registry();
    let ty = TypeRef::named_nn_list_nn("Category");

    assert_eq!(
        coerce_input(&registry, &ty, Value::from("SERVER")),
        Ok(Value::List(vec![Value::Enum(Name::new("SERVER"))]))
    );
    assert_matches!(
        coerce_input(&registry, &ty, Value::List(vec![Value::from("SERVER"), Value::Null])),
        Err(CoercionError::Mismatch { expected, .. }) if expected == "Category!"
    );
}

#[test]
fn bound_argument_accessors() {
    let arguments = BoundArguments::new("comments")
        .with("limit", 2)
        .with("title", "T");

    assert_eq!(arguments.field(), "comments");
    assert_eq!(arguments.int("limit"), Ok(2));
    assert_eq!(arguments.optional_string("title"), Some("T"));
    assert_eq!(arguments.optional_string("limit"), None);
    assert_matches!(
        arguments.string("summary"),
        Err(FieldError::MissingArgument { field, argument }) if field == "comments" && argument == "summary"
    );
    assert_eq!(
        arguments.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        ["limit", "title"]
    );
}
