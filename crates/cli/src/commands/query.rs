//! Prints the introspection query.

use anyhow::Result;
use sdl_introspect::introspection_query;

/// Prints the introspection query requesting `depth` levels of `ofType`.
pub fn run(depth: usize) -> Result<()> {
    crate::output::write_output(None, &introspection_query(depth))
}
