pub mod actions;
pub mod config;
pub mod error;
pub mod platform;
pub mod shutdown;
pub mod workflow;
