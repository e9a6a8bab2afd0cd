pub mod controller;
pub mod conversation;

mod tests;

pub use controller::ChatController;
pub use conversation::Conversation;
