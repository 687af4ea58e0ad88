use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong between a well-formed invocation and the
/// shim's own exit status. Each variant maps to exit status 1; the variants
/// exist so the messages can carry the path the launcher actually looked at.
#[derive(Debug)]
pub enum LauncherError {
    /// The shim binary is absent from its fixed location.
    ShimNotFound(PathBuf),
    /// The caller-supplied rootfs does not exist.
    RootfsNotFound(PathBuf),
    /// The shim process could not be created, or waiting for it failed.
    Spawn(io::Error),
}

impl fmt::Display for LauncherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LauncherError::ShimNotFound(path) => write!(
                f,
                "container-shim binary not found at {}; build it first (gcc -o container-shim container-shim.c)",
                path.display()
            ),
            LauncherError::RootfsNotFound(path) => {
                write!(f, "rootfs not found at {}", path.display())
            }
            LauncherError::Spawn(err) => write!(f, "failed to execute container-shim: {}", err),
        }
    }
}

impl std::error::Error for LauncherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LauncherError::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LauncherError {
    fn from(err: io::Error) -> Self {
        LauncherError::Spawn(err)
    }
}
