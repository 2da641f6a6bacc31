pub mod console;
pub mod file_store;
pub mod models;

pub use console::*;
pub use file_store::*;
pub use models::*;
