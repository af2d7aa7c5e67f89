pub mod action;
pub mod file;

pub use action::{env_keys, ActionConfig, ConfigError, Repository};
pub use file::FileConfig;
