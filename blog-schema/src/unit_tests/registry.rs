// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use assert_matches::assert_matches;
use test_case::test_case;

use super::*;

type TestBuilder = RegistryBuilder<()>;

fn query(field: Field<()>) -> ObjectType<()> {
    ObjectType::new("Query").field(field)
}

fn string_field(name: &str) -> Field<()> {
    Field::new(name, TypeRef::named_nn(TypeRef::STRING))
}

#[test_case(TypeRef::named("String"), "String")]
#[test_case(TypeRef::named_nn("String"), "String!")]
#[test_case(TypeRef::named_list("Post"), "[Post]")]
#[test_case(TypeRef::named_nn_list("Post"), "[Post!]")]
#[test_case(TypeRef::named_list_nn("Post"), "[Post]!")]
#[test_case(TypeRef::named_nn_list_nn("Post"), "[Post!]!")]
#[test_case(TypeRef::named_nn("Post").non_null(), "Post!" ; "non null is idempotent")]
fn type_ref_display(ty: TypeRef, expected: &str) {
    assert_eq!(ty.to_string(), expected);
    assert_eq!(ty.base_name(), expected.trim_matches(|c| matches!(c, '[' | ']' | '!')));
}

#[test]
fn lookups() {
    let mut builder = TestBuilder::new("Query");
    builder.mutation("Mutation");
    builder
        .register(EnumType::new("Color").value("RED"))
        .unwrap()
        .register(InterfaceType::new("Named").field(InterfaceField::new("name", TypeRef::named_nn("String"))))
        .unwrap()
        .register(query(string_field("name")).implement("Named"))
        .unwrap()
        .register(ObjectType::new("Mutation").field(string_field("rename")))
        .unwrap();
    let registry = builder.finish().unwrap();

    assert_eq!(registry.query_type().map(ObjectType::name), Some("Query"));
    assert_eq!(registry.mutation_type().map(ObjectType::name), Some("Mutation"));
    assert!(registry.enum_type("Color").unwrap().contains("RED"));
    assert!(!registry.enum_type("Color").unwrap().contains("red"));
    assert!(registry.interface("Named").is_some());
    assert!(registry.object("Named").is_none());
    assert!(matches!(registry.get("Int"), Some(MetaType::Scalar(_))));
    assert_eq!(registry.query_type_name(), "Query");
    assert_eq!(registry.mutation_type_name(), Some("Mutation"));
    assert!(registry.query_type().unwrap().implements("Named"));
}

#[test]
fn duplicate_type() {
    let mut builder = TestBuilder::new("Query");
    builder.register(ObjectType::new("Thing").field(string_field("id"))).unwrap();

    let error = builder
        .register(ObjectType::new("Thing").field(string_field("name")))
        .err();
    assert_matches!(error, Some(SchemaError::DuplicateType(name)) if name == "Thing");
}

#[test]
fn built_in_scalars_cannot_be_redeclared() {
    let mut builder = TestBuilder::new("Query");

    let error = builder.register(ScalarType::new("String")).err();
    assert_matches!(error, Some(SchemaError::DuplicateType(name)) if name == "String");
}

#[test]
fn duplicate_field() {
    let object = ObjectType::new("Thing")
        .field(string_field("id"))
        .field(Field::new("id", TypeRef::named("Int")));

    let error = TestBuilder::new("Query").register(object).map(|_| ());
    assert_eq!(
        error,
        Err(SchemaError::DuplicateField {
            type_name: "Thing".to_owned(),
            field: "id".to_owned(),
        })
    );
}

#[test]
fn duplicate_argument() {
    let field = string_field("search")
        .argument(ArgumentSpec::new("text", TypeRef::named("String")))
        .argument(ArgumentSpec::new("text", TypeRef::named("Int")));

    let error = TestBuilder::new("Query").register(query(field)).err();
    assert_matches!(
        error,
        Some(SchemaError::DuplicateArgument { field, argument })
            if field == "Query.search" && argument == "text"
    );
}

#[test]
fn duplicate_enum_value() {
    let color = EnumType::new("Color").value("RED").value("RED");

    let error = TestBuilder::new("Query").register(color).err();
    assert_matches!(error, Some(SchemaError::DuplicateEnumValue { value, .. }) if value == "RED");
}

#[test]
fn unknown_type_reference() {
    let mut builder = TestBuilder::new("Query");
    builder
        .register(query(Field::new("thing", TypeRef::named("Thing"))))
        .unwrap();

    assert_matches!(
        builder.finish().err(),
        Some(SchemaError::UnknownType { referenced_by, type_name })
            if referenced_by == "Query.thing" && type_name == "Thing"
    );
}

#[test]
fn arguments_must_have_input_types() {
    let mut builder = TestBuilder::new("Query");
    let field = string_field("echo").argument(ArgumentSpec::new("query", TypeRef::named("Query")));
    builder.register(query(field)).unwrap();

    assert_matches!(builder.finish().err(), Some(SchemaError::NotAnInputType { type_name, .. }) if type_name == "Query");
}

#[test]
fn default_values_must_match_their_type() {
    let mut builder = TestBuilder::new("Query");
    let field = string_field("echo")
        .argument(ArgumentSpec::new("times", TypeRef::named("Int")).default_value("twice"));
    builder.register(query(field)).unwrap();

    assert_matches!(
        builder.finish().err(),
        Some(SchemaError::InvalidDefaultValue { argument, .. }) if argument == "times"
    );
}

#[test]
fn implemented_interfaces_must_exist() {
    let mut builder = TestBuilder::new("Query");
    builder
        .register(query(string_field("name")).implement("Named"))
        .unwrap();

    assert_matches!(builder.finish().err(), Some(SchemaError::UnknownType { type_name, .. }) if type_name == "Named");
}

#[test]
fn only_interfaces_can_be_implemented() {
    let mut builder = TestBuilder::new("Query");
    builder
        .register(ObjectType::new("Other").field(string_field("name")))
        .unwrap()
        .register(query(string_field("name")).implement("Other"))
        .unwrap();

    assert_matches!(builder.finish().err(), Some(SchemaError::NotAnInterface { interface, .. }) if interface == "Other");
}

#[test]
fn implementors_declare_every_interface_field() {
    let mut builder = TestBuilder::new("Query");
    builder
        .register(InterfaceType::new("Named").field(InterfaceField::new("name", TypeRef::named_nn("String"))))
        .unwrap()
        .register(query(string_field("id")).implement("Named"))
        .unwrap();

    assert_matches!(
        builder.finish().err(),
        Some(SchemaError::MissingInterfaceField { field, .. }) if field == "name"
    );
}

#[test]
fn implementors_keep_the_interface_field_types() {
    let mut builder = TestBuilder::new("Query");
    builder
        .register(InterfaceType::new("Named").field(InterfaceField::new("name", TypeRef::named_nn("String"))))
        .unwrap()
        .register(query(Field::new("name", TypeRef::named("String"))).implement("Named"))
        .unwrap();

    assert_matches!(
        builder.finish().err(),
        Some(SchemaError::InterfaceFieldTypeMismatch { expected, found, .. })
            if expected == "String!" && found == "String"
    );
}

#[test]
fn root_types_must_be_objects() {
    assert_matches!(
        TestBuilder::new("Query").finish().err(),
        Some(SchemaError::InvalidRootType(name)) if name == "Query"
    );

    let mut builder = TestBuilder::new("Query");
    builder.mutation("Color");
    builder
        .register(query(string_field("name")))
        .unwrap()
        .register(EnumType::new("Color").value("RED"))
        .unwrap();
    assert_matches!(builder.finish().err(), Some(SchemaError::InvalidRootType(name)) if name == "Color");
}
