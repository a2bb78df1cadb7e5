//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS — answers preflight requests before anything else runs
//! 2. Audit logger — request id, status and latency for every request

pub mod audit;
