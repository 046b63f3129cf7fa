pub mod config;
pub mod diagnosis;
pub mod error;
pub mod llm;
pub mod model;
pub mod server;
pub mod vision;

pub use error::{Error, Result};
