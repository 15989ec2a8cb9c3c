//! Core editing services.
//!
//! # Responsibility
//! - Compose model, surface and store into use-case level APIs.
//! - Keep UI/FFI layers decoupled from persistence and flush details.

pub mod loader;
pub mod save;
pub mod session;
pub mod surface;
