//! staticd - Multiplexed Static File Server
//!
//! Core library for serving a fixed document root over HTTP/1.1.

pub mod config;
pub mod http;
pub mod server;
