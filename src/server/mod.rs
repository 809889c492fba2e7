//! Socket plumbing: the bound listener and the readiness loop that
//! multiplexes every client over a single task.

pub mod connection;
pub mod listener;
pub mod multiplexer;
