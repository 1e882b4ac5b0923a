//! Relay - Minimalist HTTP request-dispatch engine
//!
//! Core library for the middleware stack and HTTP plumbing.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod server;
