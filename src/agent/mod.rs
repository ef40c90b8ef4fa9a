pub mod actions;
pub mod api;
pub mod types;
