//! Request handler module
//!
//! Bridges the server's connections to the favicon responder.

pub mod router;

// Re-export main entry point
pub use router::{error_status, handle_request};
