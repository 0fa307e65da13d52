//! Core types for the Skylift deployment facade.
//!
//! This crate defines the domain model (applications, services, routing) and
//! the [`session::PlatformSession`] boundary behind which an actual platform
//! client library lives. It performs no network I/O of its own.

pub mod app;
pub mod config;
pub mod error;
pub mod service;
pub mod session;

// Re-export common error types
pub use error::{ClientError, Result, SessionError};
