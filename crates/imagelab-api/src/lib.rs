//! Imagelab API Library
//!
//! This crate provides the HTTP handlers, error mapping and application setup for the
//! image laboratory service.

// Module declarations
mod handlers;
mod telemetry;

// Public modules
pub mod constants;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
