//! Resolution of the shim binary and the rootfs to absolute, existing paths.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LauncherError;

/// File name of the runtime binary the launcher hands control to.
pub const SHIM_FILE_NAME: &str = "container-shim";

/// The shim is expected one directory above the current working directory.
/// This is a convention shared with the shim's build setup, not a setting;
/// no PATH lookup or alternate location is tried.
pub fn shim_binary() -> Result<PathBuf, LauncherError> {
    let location = Path::new("..").join(SHIM_FILE_NAME);
    let absolute = absolute(&location)?;
    if !absolute.exists() {
        return Err(LauncherError::ShimNotFound(absolute));
    }
    // resolves the `..` component and any symlinks for the child's argv[0]
    fs::canonicalize(&absolute).map_err(LauncherError::Spawn)
}

/// Absolutize the caller-supplied rootfs path and require that it exists.
/// Whether it is a directory with a sensible layout is the shim's problem.
pub fn rootfs_dir(raw: &Path) -> Result<PathBuf, LauncherError> {
    let absolute = absolute(raw)?;
    if !absolute.exists() {
        return Err(LauncherError::RootfsNotFound(absolute));
    }
    fs::canonicalize(&absolute).map_err(LauncherError::Spawn)
}

fn absolute(path: &Path) -> Result<PathBuf, io::Error> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use serial_test::serial;

    use super::*;

    // The tests below chdir into scratch directories, so they serialize with
    // each other and restore the original working directory before asserting.
    struct CwdGuard(PathBuf);

    impl CwdGuard {
        fn enter(dir: &Path) -> Self {
            let previous = env::current_dir().unwrap();
            env::set_current_dir(dir).unwrap();
            CwdGuard(previous)
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.0);
        }
    }

    #[test]
    #[serial]
    fn test_shim_binary_missing_reports_absolute_path() {
        let scratch = tempfile::tempdir().unwrap();
        let workdir = scratch.path().join("work");
        fs::create_dir(&workdir).unwrap();

        let _guard = CwdGuard::enter(&workdir);
        let err = shim_binary().unwrap_err();
        match err {
            LauncherError::ShimNotFound(path) => {
                assert!(path.is_absolute());
                assert!(path.ends_with(Path::new("..").join(SHIM_FILE_NAME)));
            }
            other => panic!("expected ShimNotFound, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_shim_binary_found_one_level_up() {
        let scratch = tempfile::tempdir().unwrap();
        let workdir = scratch.path().join("work");
        fs::create_dir(&workdir).unwrap();
        File::create(scratch.path().join(SHIM_FILE_NAME)).unwrap();

        let _guard = CwdGuard::enter(&workdir);
        let shim = shim_binary().unwrap();
        assert!(shim.is_absolute());
        assert!(shim.ends_with(SHIM_FILE_NAME));
        assert!(shim.exists());
    }

    #[test]
    #[serial]
    fn test_rootfs_missing_reports_absolute_path() {
        let scratch = tempfile::tempdir().unwrap();
        let _guard = CwdGuard::enter(scratch.path());

        let err = rootfs_dir(Path::new("./no-such-rootfs")).unwrap_err();
        match err {
            LauncherError::RootfsNotFound(path) => {
                assert!(path.is_absolute());
                assert!(path.ends_with("no-such-rootfs"));
            }
            other => panic!("expected RootfsNotFound, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_rootfs_relative_path_resolves() {
        let scratch = tempfile::tempdir().unwrap();
        fs::create_dir(scratch.path().join("rootfs")).unwrap();

        let _guard = CwdGuard::enter(scratch.path());
        let rootfs = rootfs_dir(Path::new("./rootfs")).unwrap();
        assert!(rootfs.is_absolute());
        assert!(rootfs.ends_with("rootfs"));
    }

    #[test]
    fn test_rootfs_absolute_path_is_kept() {
        let scratch = tempfile::tempdir().unwrap();
        let rootfs = rootfs_dir(scratch.path()).unwrap();
        assert_eq!(rootfs, fs::canonicalize(scratch.path()).unwrap());
    }
}
