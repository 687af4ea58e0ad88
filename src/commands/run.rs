//! Launches a command inside a container by handing over to the shim.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::paths;
use crate::shim::ShimCommand;

/// Run a command inside a container rooted at the given directory
#[derive(Parser, Debug)]
pub struct Run {
    /// Path to the directory to use as the container root filesystem
    #[clap(value_parser = clap::builder::NonEmptyStringValueParser::new(), required = true)]
    pub rootfs: String,

    /// Command to execute inside the container, with its arguments
    #[clap(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Resolves the shim and the rootfs, assembles the shim argument vector and
/// executes it, returning the shim's exit code. Resolution failures abort
/// before anything is spawned.
pub fn run(args: Run) -> Result<i32> {
    let shim = paths::shim_binary()?;
    let rootfs = paths::rootfs_dir(Path::new(&args.rootfs))?;

    log::debug!(
        "resolved shim {} and rootfs {}",
        shim.display(),
        rootfs.display()
    );

    let code = ShimCommand::new(&shim, &rootfs, &args.command).status()?;
    Ok(code)
}
