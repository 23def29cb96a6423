pub mod inference;
pub mod runner;
pub mod state;
