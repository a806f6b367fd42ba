//! Path checks applied while parsing arguments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Fail unless `path` is a directory this process can list.
pub fn validate_readable_directory(path: &Path) -> Result<()> {
    validate_directory_with(path, is_readable)
}

/// Fail unless `path` exists and this process can read it.
pub fn validate_readable_file(path: &Path) -> Result<()> {
    validate_file_with(path, is_readable)
}

fn validate_directory_with(path: &Path, readable: impl Fn(&Path) -> bool) -> Result<()> {
    if !path.is_dir() {
        bail!("{} is not a valid path.", path.display());
    }
    ensure_read_access(path, readable)
}

fn validate_file_with(path: &Path, readable: impl Fn(&Path) -> bool) -> Result<()> {
    if !path.exists() {
        bail!("{} is not a valid file.", path.display());
    }
    ensure_read_access(path, readable)
}

/// `clap` value parser for `--stack`.
pub fn readable_directory(value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    validate_readable_directory(&path)?;
    Ok(path)
}

/// `clap` value parser for rule files and `--log-config`.
pub fn readable_file(value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    validate_readable_file(&path)?;
    Ok(path)
}

fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        fs::File::open(path).is_ok()
    }
}

fn ensure_read_access(path: &Path, readable: impl Fn(&Path) -> bool) -> Result<()> {
    if !readable(path) {
        bail!("No read access to {}.", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_directory_accepts_dir_and_returns_path_unchanged() {
        let temp = tempfile::tempdir().expect("tempdir");
        let value = temp.path().to_str().expect("utf8 path");
        let path = readable_directory(value).expect("readable");
        assert_eq!(path, temp.path());
    }

    #[test]
    fn readable_directory_rejects_missing_and_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("missing");
        let err = validate_readable_directory(&missing).expect_err("missing");
        assert!(err.to_string().contains("is not a valid path"));

        let file = temp.path().join("plan.tf");
        fs::write(&file, "").expect("write");
        assert!(validate_readable_directory(&file).is_err());
    }

    #[test]
    fn readable_file_rejects_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = validate_readable_file(&temp.path().join("naming.yaml")).expect_err("missing");
        assert!(err.to_string().contains("is not a valid file"));
    }

    #[test]
    fn readable_file_accepts_existing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("naming.yaml");
        fs::write(&file, "resources: []\n").expect("write");
        validate_readable_file(&file).expect("readable");
    }

    #[test]
    fn access_check_failure_rejects_file_and_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("naming.yaml");
        fs::write(&file, "x").expect("write");

        let err = validate_file_with(&file, |_| false).expect_err("file");
        assert_eq!(err.to_string(), format!("No read access to {}.", file.display()));

        let err = validate_directory_with(temp.path(), |_| false).expect_err("directory");
        assert_eq!(
            err.to_string(),
            format!("No read access to {}.", temp.path().display())
        );
    }

    #[test]
    fn access_check_sees_the_validated_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        validate_directory_with(temp.path(), |path| path == temp.path()).expect("directory");
    }

    /// Permission bits are not enforced for root; the skip is reported.
    #[cfg(unix)]
    fn enforced(path: &Path) -> bool {
        if is_readable(path) {
            eprintln!(
                "skipping: {} is readable despite mode 000 (running as root?)",
                path.display()
            );
            return false;
        }
        true
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("naming.yaml");
        fs::write(&file, "x").expect("write");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).expect("chmod");
        if enforced(&file) {
            let err = validate_readable_file(&file).expect_err("unreadable");
            assert!(err.to_string().contains("No read access"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("plans");
        fs::create_dir(&dir).expect("mkdir");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o000)).expect("chmod");
        let result = if enforced(&dir) {
            Some(validate_readable_directory(&dir))
        } else {
            None
        };
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).expect("restore");
        if let Some(result) = result {
            let err = result.expect_err("unreadable");
            assert!(err.to_string().contains("No read access"));
        }
    }
}
