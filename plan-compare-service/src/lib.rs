pub mod config;
pub mod render;
pub mod service;

pub use config::pipeline_config_from_env;
pub use service::{AppState, create_app};
