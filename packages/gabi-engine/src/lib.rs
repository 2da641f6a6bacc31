pub mod error;
pub mod models;
pub mod output;
pub mod services;
pub mod store;

pub use error::*;
pub use models::*;
pub use output::*;
pub use services::controller::{PhaseController, VoteOutcome};
pub use store::*;
