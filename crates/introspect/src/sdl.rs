//! SDL (Schema Definition Language) rendering from introspection data.
//!
//! The output is a deliberate subset of SDL: only `type`, `input` and `enum`
//! blocks are written, without descriptions, directives or default values.

use crate::types::{FieldDescriptor, InputValueDescriptor, SchemaDescriptor, TypeDescriptor, TypeKind};
use crate::Result;
use std::fmt;

/// Options controlling SDL output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prepend a `schema { query: ... }` block listing the root operation types.
    pub include_schema_definition: bool,
}

/// Renders an introspection payload to SDL.
///
/// The payload may be a full response, the `data` object, or the bare schema
/// object; see [`SchemaDescriptor::from_payload`].
///
/// # Errors
///
/// Returns [`crate::IntrospectionError::Structure`] if the payload has no
/// usable `types` array.
///
/// # Examples
///
/// ```
/// # use sdl_introspect::render;
/// let payload = serde_json::json!({
///     "__schema": {
///         "types": [
///             { "kind": "ENUM", "name": "Role", "enumValues": [{ "name": "ADMIN" }] }
///         ]
///     }
/// });
/// assert_eq!(render(&payload)?, "enum Role {\n  ADMIN\n}\n\n");
/// # Ok::<(), sdl_introspect::IntrospectionError>(())
/// ```
pub fn render(payload: &serde_json::Value) -> Result<String> {
    render_with(payload, &RenderOptions::default())
}

/// Like [`render`], with explicit [`RenderOptions`].
///
/// # Errors
///
/// Returns [`crate::IntrospectionError::Structure`] if the payload has no
/// usable `types` array.
pub fn render_with(payload: &serde_json::Value, options: &RenderOptions) -> Result<String> {
    let schema = SchemaDescriptor::from_payload(payload)?;
    Ok(render_sdl_with(&schema, options))
}

/// Converts a schema descriptor to SDL with default options.
#[must_use]
pub fn render_sdl(schema: &SchemaDescriptor) -> String {
    render_sdl_with(schema, &RenderOptions::default())
}

/// Converts a schema descriptor to SDL.
///
/// Types are emitted in input order, each block followed by a blank line.
/// Only named `OBJECT`, `INPUT_OBJECT` and `ENUM` types whose names do not
/// start with `__` are written.
#[must_use]
#[tracing::instrument(skip(schema), fields(types = schema.types.len()))]
pub fn render_sdl_with(schema: &SchemaDescriptor, options: &RenderOptions) -> String {
    let rendered: Vec<&TypeDescriptor> = schema
        .types
        .iter()
        .filter(|type_def| type_def.is_renderable())
        .collect();

    let names: Vec<&str> = rendered
        .iter()
        .filter_map(|type_def| type_def.name.as_deref())
        .collect();
    tracing::info!(count = rendered.len(), names = ?names, "Rendering types");

    let sdl = SdlDocument {
        schema,
        types: &rendered,
        options,
    }
    .to_string();

    tracing::debug!(sdl_length = sdl.len(), "SDL generation complete");
    sdl
}

struct SdlDocument<'a> {
    schema: &'a SchemaDescriptor,
    types: &'a [&'a TypeDescriptor],
    options: &'a RenderOptions,
}

impl fmt::Display for SdlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.include_schema_definition {
            write_schema_definition(f, self.schema)?;
        }
        for type_def in self.types {
            write_type(f, type_def)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn write_schema_definition(f: &mut fmt::Formatter<'_>, schema: &SchemaDescriptor) -> fmt::Result {
    let roots = [
        ("query", &schema.query_type),
        ("mutation", &schema.mutation_type),
        ("subscription", &schema.subscription_type),
    ];
    if roots.iter().all(|(_, root)| root.is_none()) {
        return Ok(());
    }

    f.write_str("schema {\n")?;
    for (operation, root) in roots {
        if let Some(root) = root {
            writeln!(f, "  {operation}: {}", root.name)?;
        }
    }
    f.write_str("}\n\n")
}

fn write_type(f: &mut fmt::Formatter<'_>, type_def: &TypeDescriptor) -> fmt::Result {
    let name = type_def.name.as_deref().unwrap_or_default();
    match type_def.kind {
        TypeKind::Object => {
            writeln!(f, "type {name} {{")?;
            for field in type_def.fields.iter().flatten() {
                write_field(f, field)?;
            }
        }
        TypeKind::InputObject => {
            writeln!(f, "input {name} {{")?;
            for input_field in type_def.input_fields.iter().flatten() {
                writeln!(f, "  {}: {}", input_field.name, input_field.type_ref)?;
            }
        }
        TypeKind::Enum => {
            writeln!(f, "enum {name} {{")?;
            for value in type_def.enum_values.iter().flatten() {
                writeln!(f, "  {}", value.name)?;
            }
        }
        // Filtered out before rendering.
        _ => return Ok(()),
    }
    f.write_str("}\n")
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldDescriptor) -> fmt::Result {
    write!(f, "  {}", field.name)?;
    if !field.args.is_empty() {
        write!(f, "({})", ArgumentList(&field.args))?;
    }
    writeln!(f, ": {}", field.type_ref)
}

struct ArgumentList<'a>(&'a [InputValueDescriptor]);

impl fmt::Display for ArgumentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", arg.name, arg.type_ref)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EnumValueDescriptor, RootTypeRef, TypeRef};
    use crate::ErrorKind;
    use serde_json::json;

    fn scalar(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Scalar, name)
    }

    fn object(name: &str, fields: Option<Vec<FieldDescriptor>>) -> TypeDescriptor {
        TypeDescriptor {
            kind: TypeKind::Object,
            name: Some(name.to_string()),
            fields,
            input_fields: None,
            enum_values: None,
        }
    }

    fn field(name: &str, args: Vec<InputValueDescriptor>, type_ref: TypeRef) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            args,
            type_ref,
        }
    }

    fn arg(name: &str, type_ref: TypeRef) -> InputValueDescriptor {
        InputValueDescriptor {
            name: name.to_string(),
            type_ref,
        }
    }

    fn schema(types: Vec<TypeDescriptor>) -> SchemaDescriptor {
        SchemaDescriptor {
            types,
            ..SchemaDescriptor::default()
        }
    }

    #[test]
    fn test_null_fields_render_empty_braces() {
        let sdl = render_sdl(&schema(vec![object("Foo", None)]));
        assert_eq!(sdl, "type Foo {\n}\n\n");
    }

    #[test]
    fn test_field_arguments() {
        let query = object(
            "Query",
            Some(vec![field(
                "search",
                vec![
                    arg("name", scalar("String")),
                    arg("limit", TypeRef::non_null(scalar("Int"))),
                ],
                TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(
                    TypeKind::Object,
                    "User",
                )))),
            )]),
        );
        let sdl = render_sdl(&schema(vec![query]));
        assert_eq!(
            sdl,
            "type Query {\n  search(name: String, limit: Int!): [User!]!\n}\n\n"
        );
    }

    #[test]
    fn test_fields_without_arguments_have_no_parens() {
        let user = object(
            "User",
            Some(vec![
                field("id", vec![], TypeRef::non_null(scalar("ID"))),
                field("age", vec![], scalar("Int")),
            ]),
        );
        let sdl = render_sdl(&schema(vec![user]));
        assert_eq!(sdl, "type User {\n  id: ID!\n  age: Int\n}\n\n");
    }

    #[test]
    fn test_filtering_and_order() {
        let payload = json!({
            "__schema": {
                "types": [
                    { "kind": "OBJECT", "name": "User", "fields": [
                        { "name": "id", "args": [], "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } } }
                    ] },
                    { "kind": "OBJECT", "name": "__Type", "fields": [] },
                    { "kind": "ENUM", "name": "Role", "enumValues": [
                        { "name": "ADMIN", "isDeprecated": false },
                        { "name": "MEMBER", "isDeprecated": true, "deprecationReason": "use ADMIN" }
                    ] },
                    { "kind": "INPUT_OBJECT", "name": "CreateUserInput", "inputFields": [
                        { "name": "name", "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "String", "ofType": null } }, "defaultValue": null },
                        { "name": "roles", "type": { "kind": "LIST", "name": null, "ofType": { "kind": "ENUM", "name": "Role", "ofType": null } } }
                    ] },
                    { "kind": "UNION", "name": "SearchResult", "possibleTypes": [] },
                    { "kind": "SCALAR", "name": "String" }
                ]
            }
        });

        let sdl = render(&payload).unwrap();
        assert!(!sdl.contains("__Type"));
        assert!(!sdl.contains("SearchResult"));
        assert!(!sdl.contains("scalar"));

        insta::assert_snapshot!(sdl.trim_end(), @r"
        type User {
          id: ID!
        }

        enum Role {
          ADMIN
          MEMBER
        }

        input CreateUserInput {
          name: String!
          roles: [Role]
        }
        ");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let sdl = render_sdl(&schema(vec![object("Foo", None), object("Foo", None)]));
        assert_eq!(sdl, "type Foo {\n}\n\ntype Foo {\n}\n\n");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let payload = json!({
            "types": [
                { "kind": "ENUM", "name": "B", "enumValues": [{ "name": "X" }, { "name": "Y" }] },
                { "kind": "OBJECT", "name": "A", "fields": null },
                { "kind": "INPUT_OBJECT", "name": "C", "inputFields": [] }
            ]
        });
        let first = render(&payload).unwrap();
        let second = render(&payload).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("enum B {"));
    }

    #[test]
    fn test_missing_collections_for_every_kind() {
        let enum_type = TypeDescriptor {
            kind: TypeKind::Enum,
            name: Some("Empty".to_string()),
            fields: None,
            input_fields: None,
            enum_values: None,
        };
        let input_type = TypeDescriptor {
            kind: TypeKind::InputObject,
            name: Some("NoInput".to_string()),
            fields: None,
            input_fields: None,
            enum_values: None,
        };
        let sdl = render_sdl(&schema(vec![enum_type, input_type]));
        assert_eq!(sdl, "enum Empty {\n}\n\ninput NoInput {\n}\n\n");
    }

    #[test]
    fn test_unnamed_type_is_skipped() {
        let mut unnamed = object("x", None);
        unnamed.name = None;
        assert_eq!(render_sdl(&schema(vec![unnamed])), "");
    }

    #[test]
    fn test_no_renderable_types_is_empty() {
        assert_eq!(render_sdl(&schema(vec![])), "");
    }

    #[test]
    fn test_schema_definition_is_opt_in() {
        let mut descriptor = schema(vec![TypeDescriptor {
            kind: TypeKind::Enum,
            name: Some("Role".to_string()),
            fields: None,
            input_fields: None,
            enum_values: Some(vec![EnumValueDescriptor {
                name: "ADMIN".to_string(),
            }]),
        }]);
        descriptor.query_type = Some(RootTypeRef {
            name: "Query".to_string(),
        });
        descriptor.mutation_type = Some(RootTypeRef {
            name: "Mutation".to_string(),
        });

        assert_eq!(render_sdl(&descriptor), "enum Role {\n  ADMIN\n}\n\n");

        let options = RenderOptions {
            include_schema_definition: true,
        };
        assert_eq!(
            render_sdl_with(&descriptor, &options),
            "schema {\n  query: Query\n  mutation: Mutation\n}\n\nenum Role {\n  ADMIN\n}\n\n"
        );
    }

    #[test]
    fn test_schema_definition_without_roots_is_omitted() {
        let options = RenderOptions {
            include_schema_definition: true,
        };
        assert_eq!(render_sdl_with(&schema(vec![]), &options), "");
    }

    #[test]
    fn test_null_args_render_without_parentheses() {
        let payload = json!({
            "types": [{
                "kind": "OBJECT",
                "name": "User",
                "fields": [{ "name": "id", "args": null, "type": { "kind": "SCALAR", "name": "ID" } }]
            }]
        });
        assert_eq!(render(&payload).unwrap(), "type User {\n  id: ID\n}\n\n");
    }

    #[test]
    fn test_irregular_excluded_types_do_not_abort_render() {
        let payload = json!({
            "types": [
                { "kind": "OBJECT", "name": "User", "fields": [] },
                { "kind": "INTERFACE", "name": "Node", "fields": [{ "name": "id" }] },
                { "kind": "SCALAR", "name": "__Meta", "fields": "weird" },
                { "kind": "DIRECTIVE", "name": "Custom", "fields": 7 }
            ]
        });
        assert_eq!(render(&payload).unwrap(), "type User {\n}\n\n");
    }

    #[test]
    fn test_render_structure_errors() {
        let err = render(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);

        let err = render(&json!({ "types": "not-an-array" })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
    }
}
