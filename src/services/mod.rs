//! External service module
//! 
//! This module contains the HTTP client for the study backend and the
//! shapes of its request and response bodies.

pub mod backend;
pub mod models;

// Re-export main types
pub use backend::BackendClient;
pub use models::*;
