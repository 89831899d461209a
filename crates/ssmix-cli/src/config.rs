//! Entry-point configuration, assembled from parsed CLI arguments.
//!
//! The core never reads environment variables or files for configuration
//! directly; every parameter it needs arrives through this struct.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_workers: usize,
    pub already_validated: bool,
    pub seed: u64,
}
