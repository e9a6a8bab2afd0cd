//! HTTP client for the chat endpoint.
//!
//! One request shape, one response shape, a fixed timeout, and a typed
//! error taxonomy that maps every failure to a user-facing message.

pub mod client;
pub mod error;


pub use client::{interpret_response, ChatClient, REQUEST_TIMEOUT};
pub use error::{ChatApiError, APOLOGY_PREFIX};
