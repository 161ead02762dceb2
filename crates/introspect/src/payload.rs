//! Normalization of introspection payloads into a [`SchemaDescriptor`].
//!
//! Introspection data reaches the renderer in one of three shapes: a full
//! GraphQL response (`{"data": {"__schema": ...}}`), the `data` object
//! (`{"__schema": ...}`), or the bare schema object (`{"types": [...]}`).
//! The shape is resolved once here so the renderer only sees typed data.

use crate::{
    IntrospectionError, Result, RootTypeRef, SchemaDescriptor, TypeDescriptor, TypeKind,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Where the schema object was found in a payload.
#[derive(Debug, Clone, Copy)]
pub enum PayloadRoot<'a> {
    /// A full response; the schema lives somewhere under `data`.
    Response(&'a Value),
    /// The schema lives under a `__schema` key.
    Nested(&'a Map<String, Value>),
    /// The payload is the schema object itself.
    TopLevel(&'a Map<String, Value>),
}

impl<'a> PayloadRoot<'a> {
    /// Classifies a payload by shape.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectionError::Structure`] if the payload is not a JSON object.
    pub fn detect(payload: &'a Value) -> Result<Self> {
        let Some(object) = payload.as_object() else {
            return Err(IntrospectionError::types_not_found());
        };

        if let Some(schema) = object.get("__schema").and_then(Value::as_object) {
            return Ok(Self::Nested(schema));
        }
        if !object.contains_key("types") {
            if let Some(data) = object.get("data").filter(|data| data.is_object()) {
                return Ok(Self::Response(data));
            }
        }
        Ok(Self::TopLevel(object))
    }

    /// Resolves the schema object this root points at.
    fn schema_object(self) -> Result<&'a Map<String, Value>> {
        match self {
            Self::Response(data) => PayloadRoot::detect(data)?.schema_object(),
            Self::Nested(schema) | Self::TopLevel(schema) => Ok(schema),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Response(_) => "response",
            Self::Nested(_) => "__schema",
            Self::TopLevel(_) => "top-level",
        }
    }
}

impl SchemaDescriptor {
    /// Builds a schema descriptor from a loosely-shaped introspection payload.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectionError::Structure`] when the payload has no
    /// `types` array, or when a renderable entry of `types` is malformed.
    /// Entries that will not be rendered keep only their kind and name, and
    /// entries without a readable kind are dropped.
    #[tracing::instrument(skip(payload))]
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let root = PayloadRoot::detect(payload)?;
        tracing::debug!(root = root.label(), "Detected payload root");
        let schema = root.schema_object()?;

        let types = schema
            .get("types")
            .and_then(Value::as_array)
            .ok_or_else(IntrospectionError::types_not_found)?;

        let types = types
            .iter()
            .enumerate()
            .filter_map(|(index, value)| type_entry(index, value).transpose())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            query_type: root_type(schema, "queryType"),
            mutation_type: root_type(schema, "mutationType"),
            subscription_type: root_type(schema, "subscriptionType"),
            types,
        })
    }
}

/// The part of a `types` entry read before deciding whether it is rendered.
#[derive(Deserialize)]
struct TypeHeader {
    kind: TypeKind,
    #[serde(default)]
    name: Option<String>,
}

fn type_entry(index: usize, value: &Value) -> Result<Option<TypeDescriptor>> {
    let Ok(header) = TypeHeader::deserialize(value) else {
        tracing::debug!(index, "Skipping type entry without a kind");
        return Ok(None);
    };
    let shallow = TypeDescriptor {
        kind: header.kind,
        name: header.name,
        fields: None,
        input_fields: None,
        enum_values: None,
    };
    if !shallow.is_renderable() {
        return Ok(Some(shallow));
    }

    TypeDescriptor::deserialize(value)
        .map(Some)
        .map_err(|e| IntrospectionError::Structure(format!("types[{index}]: {e}")))
}

fn root_type(schema: &Map<String, Value>, key: &str) -> Option<RootTypeRef> {
    schema
        .get(key)
        .and_then(|value| value.get("name"))
        .and_then(Value::as_str)
        .map(|name| RootTypeRef {
            name: name.to_string(),
        })
}
