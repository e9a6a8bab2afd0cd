//! Wire and storage types for sewchat
//!
//! Everything that crosses the network or lands in the history file is
//! defined here so the serialized shapes live in one place.

pub mod types;


pub use types::{
    deserialize_string_or_null, ChatRequest, ChatResponse, Message, Role, SessionRecord,
};
