//! Type definitions for GraphQL introspection payloads.
//!
//! These types mirror the subset of an introspection response that the SDL
//! renderer consumes. Collections are optional because introspection returns
//! `null` for collections that do not apply to a type's kind.

use serde::{Deserialize, Deserializer, Serialize};

/// The `__schema` object of an introspection response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<RootTypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<RootTypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<RootTypeRef>,
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDescriptor>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValueDescriptor>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValueDescriptor>>,
}

impl TypeDescriptor {
    /// Whether the SDL renderer emits a block for this type.
    ///
    /// Only named `OBJECT`, `INPUT_OBJECT` and `ENUM` types are rendered, and
    /// introspection meta-types (`__Type`, `__Schema`, ...) never are.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        let Some(name) = self.name.as_deref() else {
            return false;
        };
        !name.starts_with("__")
            && matches!(
                self.kind,
                TypeKind::Object | TypeKind::InputObject | TypeKind::Enum
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Servers may send `null` for a field without arguments.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<InputValueDescriptor>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// A field argument or an input-object field. Default values and
/// descriptions are not read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValueDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

pub type ArgumentDescriptor = InputValueDescriptor;

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    /// A kind this crate does not know; never rendered.
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    #[must_use]
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Self::List | Self::NonNull)
    }
}

impl TypeRef {
    /// A named type reference such as `String` or `User`.
    #[must_use]
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    #[must_use]
    pub fn list(of_type: Self) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    #[must_use]
    pub fn non_null(of_type: Self) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    /// Converts the type reference to a GraphQL type string.
    ///
    /// Handles type wrappers like `NonNull` and `List` to generate strings like:
    /// - `String` for a simple scalar
    /// - `String!` for a non-null scalar
    /// - `[String]` for a list
    /// - `[String!]!` for a non-null list of non-null strings
    ///
    /// There is no depth limit here; the nesting depth of a fetched payload is
    /// bounded only by the query that produced it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sdl_introspect::{TypeKind, TypeRef};
    /// let type_ref = TypeRef::non_null(TypeRef::named(TypeKind::Scalar, "String"));
    /// assert_eq!(type_ref.to_type_string(), "String!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match self.kind {
            TypeKind::NonNull => self.of_type.as_ref().map_or_else(
                || "!".to_string(),
                |of_type| format!("{}!", of_type.to_type_string()),
            ),
            TypeKind::List => self.of_type.as_ref().map_or_else(
                || "[]".to_string(),
                |of_type| format!("[{}]", of_type.to_type_string()),
            ),
            _ => self.name.as_deref().unwrap_or_default().to_string(),
        }
    }

    /// Checks that every node carries exactly one of `name` and `ofType`, and
    /// that only wrapper kinds carry `ofType`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match (&self.name, &self.of_type) {
            (Some(_), None) => !self.kind.is_wrapper(),
            (None, Some(inner)) => self.kind.is_wrapper() && inner.is_well_formed(),
            _ => false,
        }
    }

    /// Number of wrapper levels above the named type.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.of_type.as_ref().map_or(0, |inner| 1 + inner.depth())
    }

    /// The innermost named type, if the chain ends in one.
    #[must_use]
    pub fn named_type(&self) -> Option<&str> {
        match &self.of_type {
            Some(inner) => inner.named_type(),
            None => self.name.as_deref(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_type_string())
    }
}
