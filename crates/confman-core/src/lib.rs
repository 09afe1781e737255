//! Core types and operations for the confman conference backend.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! decision engine and query service are written against the
//! [`store::ConferenceStore`] trait and the [`caller::Caller`] capability;
//! backends and transports live in other crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod caller;
pub mod decision;
pub mod error;
pub mod intake;
pub mod model;
pub mod query;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod memory;
