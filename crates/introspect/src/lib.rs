//! GraphQL introspection fetching and SDL rendering.
//!
//! This crate fetches a schema from a GraphQL endpoint via introspection and
//! renders the `type`, `input` and `enum` definitions it contains as SDL.
//!
//! # Examples
//!
//! ## One-step introspection to SDL
//!
//! ```no_run
//! use sdl_introspect::introspect_url_to_sdl;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sdl = introspect_url_to_sdl("http://localhost:4000/graphql").await?;
//!     println!("{}", sdl);
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a saved payload
//!
//! ```
//! use sdl_introspect::render;
//!
//! let payload = serde_json::json!({
//!     "types": [{ "kind": "OBJECT", "name": "Foo", "fields": null }]
//! });
//! assert_eq!(render(&payload).unwrap(), "type Foo {\n}\n\n");
//! ```

mod client;
mod error;
mod payload;
mod query;
mod sdl;
mod types;

pub use client::{parse_response_body, IntrospectionClient};
pub use error::{ErrorKind, GraphQLError, IntrospectionError, Result, TYPES_NOT_FOUND};
pub use payload::PayloadRoot;
pub use query::{
    default_introspection_query, introspection_query, DEFAULT_TYPE_REF_DEPTH, MAX_TYPE_REF_DEPTH,
};
pub use sdl::{render, render_sdl, render_sdl_with, render_with, RenderOptions};
pub use types::*;

/// Introspects a GraphQL endpoint and converts the result to SDL.
///
/// Uses a default [`IntrospectionClient`] followed by [`render`].
///
/// # Errors
///
/// Returns a fetch error if the request fails or the server reports GraphQL
/// errors, and a structure error if the response has no `types` array.
#[tracing::instrument]
pub async fn introspect_url_to_sdl(url: &str) -> Result<String> {
    tracing::info!("Starting introspection");
    let data = IntrospectionClient::new().execute(url).await?;
    tracing::debug!("Converting introspection to SDL");
    let sdl = render(&data)?;
    tracing::info!(sdl_length = sdl.len(), "Introspection complete");
    Ok(sdl)
}
