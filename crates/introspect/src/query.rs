//! GraphQL introspection query generation.
//!
//! The `TypeRef` fragment is generated rather than written out by hand, so the
//! number of `ofType` levels fetched is an explicit parameter. Type references
//! nested deeper than this depth come back truncated from the server.

use std::fmt;

/// Default number of `ofType` levels fetched for every type reference.
///
/// Seven levels cover wrappers such as `[[[String!]!]!]!`.
pub const DEFAULT_TYPE_REF_DEPTH: usize = 7;

/// Upper bound accepted for a configured type-ref depth.
pub const MAX_TYPE_REF_DEPTH: usize = 32;

const QUERY_PREAMBLE: &str = "\
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
  }
}

fragment FullType on __Type {
  kind
  name
  fields(includeDeprecated: true) {
    name
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
  }
  inputFields {
    ...InputValue
  }
  enumValues(includeDeprecated: true) {
    name
  }
}

fragment InputValue on __InputValue {
  name
  type {
    ...TypeRef
  }
}
";

/// Builds the introspection query with `type_ref_depth` nested `ofType`
/// selections in the `TypeRef` fragment.
///
/// # Examples
///
/// ```
/// # use sdl_introspect::introspection_query;
/// let query = introspection_query(3);
/// assert_eq!(query.matches("ofType").count(), 3);
/// ```
#[must_use]
pub fn introspection_query(type_ref_depth: usize) -> String {
    let selection = TypeRefSelection {
        depth: type_ref_depth,
        indent: 1,
    };
    format!("{QUERY_PREAMBLE}\nfragment TypeRef on __Type {{\n{selection}}}\n")
}

/// The query with [`DEFAULT_TYPE_REF_DEPTH`] levels.
#[must_use]
pub fn default_introspection_query() -> String {
    introspection_query(DEFAULT_TYPE_REF_DEPTH)
}

/// Selection set body for a type reference: `kind`, `name`, and `depth`
/// further `ofType` levels, indented by `indent` steps.
#[derive(Debug, Clone, Copy)]
struct TypeRefSelection {
    depth: usize,
    indent: usize,
}

impl fmt::Display for TypeRefSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = "  ".repeat(self.indent);
        writeln!(f, "{pad}kind")?;
        writeln!(f, "{pad}name")?;
        if self.depth > 0 {
            writeln!(f, "{pad}ofType {{")?;
            let inner = Self {
                depth: self.depth - 1,
                indent: self.indent + 1,
            };
            write!(f, "{inner}")?;
            writeln!(f, "{pad}}}")?;
        }
        Ok(())
    }
}
