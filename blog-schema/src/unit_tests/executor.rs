// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use async_graphql::Variables;
use serde_json::json;
use test_case::test_case;

use super::*;
use crate::registry::{ArgumentSpec, EnumType, InterfaceField, InterfaceType};

#[derive(Clone, Debug, PartialEq)]
enum Animal {
    Root,
    Dog(String),
    Cat(String),
    Rock,
}

impl Node for Animal {
    fn type_name(&self) -> Option<&'static str> {
        match self {
            Animal::Root => None,
            Animal::Dog(_) => Some("Dog"),
            Animal::Cat(_) => Some("Cat"),
            Animal::Rock => Some("Rock"),
        }
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match (self, name) {
            (Animal::Dog(pet_name) | Animal::Cat(pet_name), "name") => {
                Some(Value::String(pet_name.clone()))
            }
            _ => None,
        }
    }
}

fn registry(with_mutations: bool) -> Registry<Animal> {
    let mut builder = Registry::builder("Query");
    if with_mutations {
        builder.mutation("Mutation");
    }
    builder
        .register(EnumType::new("Size").value("SMALL").value("LARGE"))
        .unwrap()
        .register(
            InterfaceType::new("Pet").field(InterfaceField::new("name", TypeRef::named_nn("String"))),
        )
        .unwrap()
        .register(
            ObjectType::new("Dog")
                .implement("Pet")
                .field(Field::new("name", TypeRef::named_nn("String")))
                .field(Field::new("barks", TypeRef::named_nn("Boolean")).resolve(|_| Ok(FieldValue::leaf(true))))
                .field(Field::new("owner", TypeRef::named_nn("String")))
                .field(
                    Field::new("puppies", TypeRef::named_nn_list_nn("Dog"))
                        .resolve(|_| Ok(FieldValue::nodes([Animal::Dog("Pup".to_owned())]))),
                ),
        )
        .unwrap()
        .register(
            ObjectType::new("Cat")
                .implement("Pet")
                .field(Field::new("name", TypeRef::named_nn("String")))
                .field(Field::new("lives", TypeRef::named_nn("Int")).resolve(|_| Ok(FieldValue::leaf(9)))),
        )
        .unwrap()
        .register(
            ObjectType::new("Query")
                .field(Field::new("pets", TypeRef::named_nn_list_nn("Pet")).resolve(|_| {
                    Ok(FieldValue::nodes([
                        Animal::Dog("Rex".to_owned()),
                        Animal::Cat("Tom".to_owned()),
                    ]))
                }))
                .field(
                    Field::new("pet", TypeRef::named("Pet"))
                        .argument(ArgumentSpec::new("name", TypeRef::named_nn("String")))
                        .resolve(|context| {
                            let name = context.arguments.string("name")?;
                            Ok(match name {
                                "rock" => FieldValue::node(Animal::Rock),
                                name => FieldValue::node(Animal::Dog(name.to_owned())),
                            })
                        }),
                )
                .field(
                    Field::new("dog", TypeRef::named("Dog"))
                        .resolve(|_| Ok(FieldValue::node(Animal::Dog("Rex".to_owned())))),
                )
                .field(
                    Field::new("greeting", TypeRef::named("String"))
                        .argument(ArgumentSpec::new("name", TypeRef::named("String")).default_value("world"))
                        .argument(ArgumentSpec::new("size", TypeRef::named("Size")))
                        .resolve(|context| {
                            let name = context.arguments.string("name")?;
                            let size = context.arguments.enum_name("size").unwrap_or("none");
                            Ok(FieldValue::string(format!("hello {name} {size}")))
                        }),
                )
                .field(
                    Field::new("failing", TypeRef::named("String")).resolve(|_| {
                        Err(FieldError::Blog(blog_base::BlogError::NoSuchAuthor("nope".to_owned())))
                    }),
                )
                .field(Field::new("strictDog", TypeRef::named_nn("Dog")).resolve(|_| Ok(FieldValue::Null)))
                .field(Field::new("size", TypeRef::named("Size")).resolve(|_| Ok(FieldValue::string("HUGE")))),
        )
        .unwrap();

    if with_mutations {
        builder
            .register(
                ObjectType::new("Mutation")
                    .field(Field::new("touch", TypeRef::named_nn("Int")).resolve(|_| Ok(FieldValue::leaf(1)))),
            )
            .unwrap();
    }

    builder.finish().unwrap()
}

fn schema() -> Schema<Animal> {
    Schema::new(registry(true), Animal::Root).unwrap()
}

fn data(response: &Response) -> serde_json::Value {
    serde_json::to_value(&response.data).unwrap()
}

fn errors(response: &Response) -> Vec<serde_json::Value> {
    response
        .errors
        .iter()
        .map(|error| serde_json::to_value(error).unwrap())
        .collect()
}

fn codes(response: &Response) -> Vec<String> {
    errors(response)
        .iter()
        .map(|error| error["extensions"]["code"].as_str().unwrap().to_owned())
        .collect()
}

/// Asserts that the request was rejected before any field was resolved.
fn assert_rejected(response: &Response, message_part: &str) {
    assert_eq!(data(response), json!(null));
    assert!(
        response
            .errors
            .iter()
            .any(|error| error.message.contains(message_part)),
        "no error mentions {message_part:?}: {:?}",
        response.errors
    );
}

#[tokio::test]
async fn aliases() {
    let response = schema()
        .execute("{ first: dog { name } second: dog { barks } }")
        .await;

    assert!(response.errors.is_empty());
    assert_eq!(
        data(&response),
        json!({
            "first": { "name": "Rex" },
            "second": { "barks": true },
        })
    );
}

#[tokio::test]
async fn interface_values_resolve_with_their_concrete_type() {
    let response = schema()
        .execute("{ pets { __typename name ... on Dog { barks } ... on Cat { lives } } }")
        .await;

    assert!(response.errors.is_empty());
    assert_eq!(
        data(&response),
        json!({
            "pets": [
                { "__typename": "Dog", "name": "Rex", "barks": true },
                { "__typename": "Cat", "name": "Tom", "lives": 9 },
            ],
        })
    );
}

#[tokio::test]
async fn named_fragments_apply_by_type_condition() {
    let query = r#"
        query { pets { ...PetName ...DogFields } }
        fragment PetName on Pet { name }
        fragment DogFields on Dog { barks }
    "#;
    let response = schema().execute(query).await;

    assert!(response.errors.is_empty());
    assert_eq!(
        data(&response),
        json!({ "pets": [{ "name": "Rex", "barks": true }, { "name": "Tom" }] })
    );
}

#[tokio::test]
async fn unknown_fragment_is_rejected() {
    let response = schema().execute("{ dog { ...Missing name } }").await;

    assert_rejected(&response, "Missing");
}

#[tokio::test]
async fn fragment_cycles_are_rejected() {
    let query = "{ dog { ...Litter } } fragment Litter on Dog { name puppies { ...Litter } }";
    let response = schema().execute(query).await;

    assert_eq!(data(&response), json!(null));
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn nesting_beyond_the_depth_limit_is_rejected() {
    let schema = Schema::with_depth_limit(registry(false), Animal::Root, 3).unwrap();

    let response = schema.execute("{ dog { puppies { name } } }").await;
    assert!(response.errors.is_empty());
    assert_eq!(data(&response), json!({ "dog": { "puppies": [{ "name": "Pup" }] } }));

    let response = schema
        .execute("{ dog { puppies { puppies { name } } } }")
        .await;
    assert_eq!(data(&response), json!(null));
    assert!(!response.errors.is_empty());
}

#[test_case(false, true ; "included")]
#[test_case(true, false ; "skipped")]
#[tokio::test]
async fn skip_directive_with_variable(skip: bool, present: bool) {
    let request = Request::new("query ($skip: Boolean!) { dog { name @skip(if: $skip) barks } }")
        .variables(Variables::from_json(json!({ "skip": skip })));
    let response = schema().execute(request).await;

    assert!(response.errors.is_empty());
    let data = data(&response);
    let dog = &data["dog"];
    assert_eq!(dog.get("name").is_some(), present);
    assert_eq!(dog["barks"], json!(true));
}

#[tokio::test]
async fn include_directive() {
    let response = schema()
        .execute("{ dog { name @include(if: false) barks @include(if: true) } }")
        .await;

    assert_eq!(data(&response), json!({ "dog": { "barks": true } }));
}

#[test_case("{ greeting }", "hello world none" ; "default value")]
#[test_case(r#"{ greeting(name: "you", size: LARGE) }"#, "hello you LARGE" ; "enum literal")]
#[test_case(r#"{ greeting(size: "SMALL") }"#, "hello world SMALL" ; "enum given as string")]
#[tokio::test]
async fn argument_binding(query: &str, expected: &str) {
    let response = schema().execute(query).await;

    assert!(response.errors.is_empty());
    assert_eq!(data(&response), json!({ "greeting": expected }));
}

#[tokio::test]
async fn explicit_null_overrides_the_default() {
    let response = schema().execute("{ greeting(name: null) }").await;

    assert_eq!(data(&response), json!({ "greeting": null }));
    assert_eq!(codes(&response), ["MISSING_ARGUMENT"]);
    assert_eq!(errors(&response)[0]["path"], json!(["greeting"]));
}

#[test_case(r#"{ greeting(size: "HUGE") dog { name } }"#, "HUGE" ; "invalid enum literal")]
#[test_case(r#"{ dog { name } greeting(mood: "happy") }"#, "mood" ; "unknown argument")]
#[test_case("{ pet { name } }", "name" ; "missing required argument")]
#[test_case("{ dog { name color } }", "color" ; "unknown field")]
#[tokio::test]
async fn invalid_selections_are_rejected(query: &str, message_part: &str) {
    let response = schema().execute(query).await;

    assert_rejected(&response, message_part);
}

#[tokio::test]
async fn failed_interface_dispatch_nulls_the_field() {
    let response = schema()
        .execute(r#"{ pet(name: "rock") { name } dog { name } }"#)
        .await;

    assert_eq!(data(&response), json!({ "pet": null, "dog": { "name": "Rex" } }));
    let errors = errors(&response);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!(["pet"]));
    assert_eq!(errors[0]["extensions"]["code"], json!("RESOLUTION_ERROR"));
}

#[tokio::test]
async fn resolver_errors_carry_their_code_and_path() {
    let response = schema().execute("{ failing dog { name } }").await;

    assert_eq!(data(&response), json!({ "failing": null, "dog": { "name": "Rex" } }));
    let errors = errors(&response);
    assert_eq!(errors[0]["message"], json!("No such author: nope"));
    assert_eq!(errors[0]["path"], json!(["failing"]));
    assert_eq!(errors[0]["locations"], json!([{ "line": 1, "column": 3 }]));
    assert_eq!(errors[0]["extensions"]["code"], json!("NO_SUCH_AUTHOR"));
}

#[tokio::test]
async fn null_in_non_null_field_bubbles_to_nullable_parent() {
    let response = schema().execute("{ dog { name owner } pets { name } }").await;

    assert_eq!(
        data(&response),
        json!({ "dog": null, "pets": [{ "name": "Rex" }, { "name": "Tom" }] })
    );
    let errors = errors(&response);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!(["dog", "owner"]));
    assert_eq!(errors[0]["extensions"]["code"], json!("MISSING_ATTRIBUTE"));
}

#[tokio::test]
async fn null_in_non_null_list_item_bubbles_through_the_list() {
    let response = schema().execute("{ pets { ... on Dog { owner } } }").await;

    assert_eq!(data(&response), json!(null));
    let errors = errors(&response);
    assert_eq!(errors[0]["path"], json!(["pets", 0, "owner"]));
}

#[tokio::test]
async fn null_non_null_root_field_nulls_the_data() {
    let response = schema().execute("{ strictDog { name } dog { name } }").await;

    assert_eq!(data(&response), json!(null));
    assert_eq!(codes(&response), ["NULL_VALUE"]);
}

#[tokio::test]
async fn enum_results_are_checked() {
    let response = schema().execute("{ size }").await;

    assert_eq!(data(&response), json!({ "size": null }));
    assert_eq!(codes(&response), ["INVALID_ENUM_VALUE"]);
    assert_eq!(
        errors(&response)[0]["message"],
        json!("Value `HUGE` is not a member of enum `Size`")
    );
}

#[tokio::test]
async fn operation_selection() {
    let query = "query A { dog { name } } query B { pets { name } }";

    let response = schema().execute(Request::new(query).operation_name("A")).await;
    assert_eq!(data(&response), json!({ "dog": { "name": "Rex" } }));

    let response = schema().execute(query).await;
    assert_eq!(data(&response), json!(null));
    assert!(!response.errors.is_empty());

    let response = schema().execute(Request::new(query).operation_name("C")).await;
    assert_rejected(&response, "C");
}

#[test_case("{ dog { name }" ; "parse error")]
#[test_case("subscription { dog { name } }" ; "subscription")]
#[tokio::test]
async fn malformed_requests_produce_no_data(query: &str) {
    let response = schema().execute(query).await;

    assert_eq!(data(&response), json!(null));
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn missing_required_variable() {
    let response = schema()
        .execute("query ($name: String!) { pet(name: $name) { name } }")
        .await;

    assert_eq!(data(&response)["pet"], json!(null));
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn mutations_need_a_mutation_root() {
    let response = schema().execute("mutation { touch }").await;
    assert_eq!(data(&response), json!({ "touch": 1 }));

    let schema = Schema::new(registry(false), Animal::Root).unwrap();
    let response = schema.execute("mutation { touch }").await;
    assert_eq!(data(&response), json!(null));
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn variable_defaults_and_coercion() {
    let query = r#"query ($name: String = "Fido", $size: Size) { pet(name: $name) { name } greeting(size: $size) }"#;

    let response = schema().execute(query).await;
    assert!(response.errors.is_empty());
    assert_eq!(
        data(&response),
        json!({ "pet": { "name": "Fido" }, "greeting": "hello world none" })
    );

    let request = Request::new(query).variables(Variables::from_json(json!({ "size": "LARGE" })));
    let response = schema().execute(request).await;
    assert_eq!(data(&response)["greeting"], json!("hello world LARGE"));

    let request = Request::new(query).variables(Variables::from_json(json!({ "size": "HUGE" })));
    let response = schema().execute(request).await;
    assert_eq!(data(&response)["greeting"], json!(null));
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn the_lowered_schema_keeps_the_registry() {
    let schema = schema();

    assert_eq!(schema.registry().query_type_name(), "Query");
    assert!(schema.sdl().contains("interface Pet {"));
}
