#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Aggregation over classification output.
//!
//! Each module here is a pure fold over already-classified in-memory data.
//! Nothing caches: callers recompute on every refresh, and two passes over
//! the same input produce identical results.

pub mod aggregate;
pub mod rank;
pub mod reconcile;
