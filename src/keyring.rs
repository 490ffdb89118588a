use tokio::process::Command;
use tracing::{debug, info};

use crate::audit::audit;
use crate::error::{Error, Result};
use crate::report::Report;

/// Arguments for a machine-readable secret key listing with signatures.
const LIST_SECRET_KEYS_ARGS: [&str; 4] = [
    "--batch",
    "--list-secret-keys",
    "--with-colons",
    "--with-sig-list",
];

/// The user's GnuPG secret keyring.
///
/// Listing is read-only. gpg runs once per call and its whole output is
/// captured before anything is parsed.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> arch_config::Result<()> {
/// use arch_config::SecretKeyring;
///
/// let report = SecretKeyring::new().audit().await?;
/// print!("{report}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecretKeyring {
    gpg_homedir: Option<String>,
}

impl SecretKeyring {
    /// Uses gpg's own choice of home directory (`$GNUPGHOME` or `~/.gnupg`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets an explicit GnuPG home directory.
    #[must_use]
    pub fn with_homedir(path: impl Into<String>) -> Self {
        Self {
            gpg_homedir: Some(path.into()),
        }
    }

    /// Returns the raw colon-delimited listing of all secret keys.
    pub async fn list_secret_keys(&self) -> Result<String> {
        let mut cmd = Command::new("gpg");
        cmd.env("LC_ALL", "C");
        if let Some(homedir) = &self.gpg_homedir {
            cmd.arg(format!("--homedir={}", homedir));
        }
        cmd.args(LIST_SECRET_KEYS_ARGS);

        debug!(homedir = ?self.gpg_homedir, "listing secret keys");
        let output = cmd.output().await?;

        if !output.status.success() {
            return Err(check_gpg_error(
                self.gpg_homedir.as_deref(),
                output.status,
                &output.stderr,
            ));
        }

        Ok(String::from_utf8(output.stdout)?)
    }

    /// Lists the secret keys and audits the listing.
    pub async fn audit(&self) -> Result<Report> {
        let listing = self.list_secret_keys().await?;
        let report = audit(&listing)?;
        info!(records = report.len(), "secret keyring matches the expected shape");
        Ok(report)
    }
}

fn check_gpg_error(homedir: Option<&str>, status: std::process::ExitStatus, stderr: &[u8]) -> Error {
    let msg = String::from_utf8_lossy(stderr);

    if msg.contains("Permission denied") || msg.contains("permission denied") {
        return Error::PermissionDenied;
    }

    if msg.contains("No such file or directory") && homedir.is_none_or(|dir| msg.contains(dir)) {
        return Error::KeyringNotInitialized;
    }

    Error::Gpg {
        status: status.code().unwrap_or(-1),
        stderr: msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_status() -> std::process::ExitStatus {
        std::process::Command::new("false").status().unwrap()
    }

    #[test]
    fn test_check_error_permission_denied() {
        let err = check_gpg_error(None, failed_status(), b"gpg: Permission denied");
        assert!(matches!(err, Error::PermissionDenied));
    }

    #[test]
    fn test_check_error_permission_denied_lowercase() {
        let err = check_gpg_error(
            Some("/home/jane/.gnupg"),
            failed_status(),
            b"gpg: permission denied (are you the owner?)",
        );
        assert!(matches!(err, Error::PermissionDenied));
    }

    #[test]
    fn test_check_error_keyring_not_initialized() {
        let stderr = b"gpg: keybox '/srv/gnupg/pubring.kbx': No such file or directory";
        let err = check_gpg_error(Some("/srv/gnupg"), failed_status(), stderr);
        assert!(matches!(err, Error::KeyringNotInitialized));
    }

    #[test]
    fn test_check_error_missing_file_elsewhere() {
        let stderr = b"gpg: /etc/gcrypt/random.conf: No such file or directory";
        let err = check_gpg_error(Some("/srv/gnupg"), failed_status(), stderr);
        assert!(matches!(err, Error::Gpg { .. }));
    }

    #[test]
    fn test_check_error_generic() {
        let err = check_gpg_error(None, failed_status(), b"gpg: some unknown error");
        match err {
            Error::Gpg { status, stderr } => {
                assert_eq!(status, 1);
                assert!(stderr.contains("some unknown error"));
            }
            other => panic!("expected Gpg error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_homedir() {
        let keyring = SecretKeyring::with_homedir("/srv/gnupg");
        assert_eq!(keyring.gpg_homedir.as_deref(), Some("/srv/gnupg"));
        assert!(SecretKeyring::new().gpg_homedir.is_none());
    }
}
