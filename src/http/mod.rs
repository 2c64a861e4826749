//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the icon logic.

pub mod cache;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_404_response, build_405_response, build_error_response,
    build_icon_response, build_options_response,
};
