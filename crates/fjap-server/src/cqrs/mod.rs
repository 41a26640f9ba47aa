//! Read/write classification for feature requests
//!
//! Every command and query implements [`mediator::Request`] with its
//! `Result` type plus one of the marker traits in [`middleware`]. Route
//! handlers call each slice's `handle` function directly.

pub mod middleware;

pub use middleware::{Command, Query};
