//! Model-backed endpoints: advisory report, crop plan and disease diagnosis.

pub mod handlers;
pub mod model;
pub mod prompts;

pub use handlers::config;
