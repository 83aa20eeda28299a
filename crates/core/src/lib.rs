//! Core business logic for the action service.

pub mod services;

pub use services::*;
