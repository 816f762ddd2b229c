mod client;
mod mapper;
pub mod models;

pub use client::{TerraformClient, DEFAULT_API_URL};
