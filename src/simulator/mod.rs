pub mod simulator;
pub mod types;
