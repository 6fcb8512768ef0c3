//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where configuration and log files live, and expands `~` in paths
//! given on the command line or in `config.toml`.

pub mod paths;

pub use paths::{expand_tilde, get_config_dir, get_data_dir};
