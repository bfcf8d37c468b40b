//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Image storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory uploaded images are written to
    #[arg(long, env = "MEDIA_ROOT", default_value = "./media")]
    pub media_root: PathBuf,
}
