//! Favicon server
//!
//! Serves a single icon at `/favicon.ico` with a strong `ETag`, a bounded
//! `Cache-Control` lifetime and `304 Not Modified` handling. The icon is read
//! once and kept in memory; a failed read is retried by the next request.

pub mod config;
pub mod favicon;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
