//! HTTP protocol implementation.
//!
//! One request-response exchange flows through three stages:
//!
//! - **`parser`**: turns a raw byte buffer into a [`request::Request`], or
//!   the invalid marker when the request line is malformed
//! - **`response`**: decides the status code against the [`resolver`] and
//!   the filesystem, and assembles headers plus a [`body::Body`]
//! - **`writer`**: serializes and drains the response onto the socket
//!
//! ```text
//!   bytes ──► Parser ──► Request ──► ResponseBuilder ──► Response ──► Writer
//!                                        │
//!                                 Resolver + mime table
//! ```
//!
//! Large payloads never materialize in memory: past the chunking threshold
//! the body is a forward-only cursor over the open file, drained chunk by
//! chunk at write time. Every malformed or unsafe request maps to a status
//! code; nothing in this module aborts the serving loop.

pub mod body;
pub mod mime;
pub mod parser;
pub mod request;
pub mod resolver;
pub mod response;
pub mod writer;
