//! # Blog API
//!
//! A small content API: posts, their comments, and a per-post view counter,
//! served as JSON over HTTP.
//!
//! ## Architecture
//!
//! - [`models`]: Post and comment records plus write-side inputs
//! - [`db`]: Repository traits, the in-memory and Postgres backends, and the
//!   service layer
//! - [`http`]: Axum router, handlers, DTOs and error mapping
//! - [`config`]: Server settings read from the environment
//!
//! The persistence backend is chosen at startup and injected into the router
//! state; the HTTP layer never knows which one it is talking to.

pub mod config;
pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
