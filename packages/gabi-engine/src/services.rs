pub mod controller;
pub mod night_resolver;
pub mod registry;
pub mod role_assigner;
pub mod scheduler;
pub mod vote_resolver;
pub mod win_condition;
