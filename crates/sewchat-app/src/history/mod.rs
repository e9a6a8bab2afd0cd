pub mod store;


pub use store::{strip_markup, HistoryStore};
