//! HTTP middleware: request ID and cross-origin policy.

pub mod cors;
pub mod request_id;
