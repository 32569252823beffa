//! HTTP middleware components.
//!
//! Middleware run before route handlers and may short-circuit requests
//! (for example, rejecting unauthorized ones).

/// API key authentication middleware
pub mod auth;
