// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::registry::{
    ArgumentSpec, EnumType, Field, InterfaceField, InterfaceType, ObjectType, Registry, TypeRef,
};

const EXPECTED_SDL: &str = r#"
"""
A color
"""
enum Color {
  RED
  BLUE
}

interface Named {
  name: String!
}

"""
The root
"""
type Query implements Named {
  name: String!
  """
  Colors by count
  """
  colors(count: Int! = 2, after: Color): [Color!]!
  paint(
    """
    The color to use
    """
    color: Color!
  ): Color
}

type Mutation {
  reset: Boolean!
}

schema {
  query: Query
  mutation: Mutation
}
"#;

#[test]
fn sdl_of_a_registry() {
    let mut builder = Registry::<()>::builder("Query");
    builder.mutation("Mutation");
    builder
        .register(
            EnumType::new("Color")
                .description("A color")
                .value("RED")
                .value("BLUE"),
        )
        .unwrap()
        .register(InterfaceType::new("Named").field(InterfaceField::new("name", TypeRef::named_nn("String"))))
        .unwrap()
        .register(
            ObjectType::new("Query")
                .description("The root")
                .implement("Named")
                .field(Field::new("name", TypeRef::named_nn("String")))
                .field(
                    Field::new("colors", TypeRef::named_nn_list_nn("Color"))
                        .description("Colors by count")
                        .argument(ArgumentSpec::new("count", TypeRef::named_nn("Int")).default_value(2))
                        .argument(ArgumentSpec::new("after", TypeRef::named("Color"))),
                )
                .field(
                    Field::new("paint", TypeRef::named("Color")).argument(
                        ArgumentSpec::new("color", TypeRef::named_nn("Color"))
                            .description("The color to use"),
                    ),
                ),
        )
        .unwrap()
        .register(ObjectType::new("Mutation").field(Field::new("reset", TypeRef::named_nn("Boolean"))))
        .unwrap();
    let registry = builder.finish().unwrap();

    assert_eq!(registry.sdl(), EXPECTED_SDL.trim_start());
}
