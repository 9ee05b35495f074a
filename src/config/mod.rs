pub mod config;

pub use config::{Config, config_path, load_config, load_config_from, resolve_base_url, save_config, save_config_to};
