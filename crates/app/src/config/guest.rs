//! Guest Store Config

use std::path::PathBuf;

use clap::Args;

/// Guest cart storage settings.
#[derive(Debug, Args)]
pub struct GuestStoreConfig {
    /// Directory holding the guest cart file
    #[arg(long, env = "GUEST_CART_DIR", default_value = ".imports")]
    pub guest_cart_dir: PathBuf,
}
