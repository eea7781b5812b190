//! Runtime settings from `WAGEDASH_*` environment variables.

use std::env;
use std::path::PathBuf;

use crate::data::boundary::DEFAULT_BOUNDARIES_PATH;
use crate::data::dataset::DEFAULT_DATASET_PATH;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8045";
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub dataset_path: PathBuf,
    pub boundaries_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            boundaries_path: PathBuf::from(DEFAULT_BOUNDARIES_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Config {
            bind_addr: var("WAGEDASH_BIND").unwrap_or(defaults.bind_addr),
            dataset_path: var("WAGEDASH_DATASET").map_or(defaults.dataset_path, PathBuf::from),
            boundaries_path: var("WAGEDASH_BOUNDARIES").map_or(defaults.boundaries_path, PathBuf::from),
            static_dir: var("WAGEDASH_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        }
    }
}
