//! Assembly and execution of the shim argument vector.

use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::LauncherError;

/// The argument vector handed to the shim:
/// `[<shim>, "run", <rootfs>, <passthrough...>]`.
///
/// The trailing passthrough arguments are the command to execute inside the
/// container; the launcher forwards them untouched and in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimCommand {
    argv: Vec<String>,
}

impl ShimCommand {
    /// Pure assembly; callers are expected to pass already-resolved paths.
    pub fn new(shim: &Path, rootfs: &Path, passthrough: &[String]) -> Self {
        let mut argv = Vec::with_capacity(3 + passthrough.len());
        argv.push(shim.display().to_string());
        argv.push("run".to_string());
        argv.push(rootfs.display().to_string());
        argv.extend_from_slice(passthrough);
        ShimCommand { argv }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Spawns the shim and blocks until it exits.
    ///
    /// All three standard streams are inherited from the launcher, so a shell
    /// running inside the container talks to the calling terminal directly.
    /// A child killed by a signal is reported as `128 + signo`, the usual
    /// shell encoding.
    pub fn status(&self) -> Result<i32, LauncherError> {
        log::debug!("handing over to shim: {:?}", self.argv);

        let mut child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(LauncherError::Spawn)?;

        let status = child.wait().map_err(LauncherError::Spawn)?;
        log::debug!("shim exited with {:?}", status);

        match status.code() {
            Some(code) => Ok(code),
            None => Ok(128 + status.signal().unwrap_or(0)),
        }
    }
}
