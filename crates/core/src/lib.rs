pub mod config;
pub mod config_loader;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, WorkerConfig};
pub use config_loader::ConfigLoader;
