//! HTTP API: route handlers, middleware and token handling

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
