//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! passes over a template tree: "parse every template" and "render the tree".

pub mod parse_service;
pub mod render_service;

#[cfg(test)]
pub(crate) mod testing;

pub use parse_service::ParseService;
pub use render_service::RenderService;
