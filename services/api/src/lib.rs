//! services/api/src/lib.rs
//!
//! The API service as a library: the binaries and the integration tests build
//! on the same adapters and router.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
