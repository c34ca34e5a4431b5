//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Session: reads or issues the session cookie
//! 2. Audit logger: method, path, status, latency

pub mod audit;
pub mod session;
