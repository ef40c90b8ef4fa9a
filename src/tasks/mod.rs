pub mod generator;
pub mod state;
pub mod types;
