pub mod action;
pub mod game;
pub mod night;
pub mod player;
pub mod role;
pub mod rule;

pub use action::*;
pub use game::*;
pub use night::*;
pub use player::*;
pub use role::*;
pub use rule::*;
