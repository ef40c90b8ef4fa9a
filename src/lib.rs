pub mod agent;
pub mod simulator;
pub mod stats;
pub mod tasks;
