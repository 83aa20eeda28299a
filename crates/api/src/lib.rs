//! HTTP API layer for the action service.
//!
//! This crate provides the request/response adaptation around the core
//! services:
//!
//! - **Endpoints**: one router per action kind, composed under `/api`
//! - **State**: the aggregate of the three independently constructed
//!   services
//! - **Response**: the standard success envelope
//!
//! Built on Axum with a Tower middleware stack.

pub mod endpoints;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
