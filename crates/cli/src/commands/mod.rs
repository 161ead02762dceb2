pub mod download;
pub mod query;
pub mod render;

use sdl_introspect::MAX_TYPE_REF_DEPTH;

/// Parses a `--depth` value, accepting `1..=MAX_TYPE_REF_DEPTH`.
pub fn parse_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (1..=MAX_TYPE_REF_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("depth must be between 1 and {MAX_TYPE_REF_DEPTH}"))
    }
}
