//! Domain records shared by the persistence layer and the HTTP API.
//!
//! These types are storage-independent: repositories translate their own row
//! representations into them, and the router serializes them as-is.

pub mod macros;
pub mod post;

pub use post::*;
