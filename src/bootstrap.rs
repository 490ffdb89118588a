use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::xdg::{UserDirs, XdgBaseDirs};

/// Directory inside the repository that mirrors `$XDG_CONFIG_HOME`.
const TRACKED_CONFIG_DIR: [&str; 2] = ["user", "XDG_CONFIG_HOME"];

/// A workstation user whose configuration is tracked in a repository.
#[derive(Debug, Clone)]
pub struct Workstation {
    repo_dir: PathBuf,
    home: PathBuf,
    base: XdgBaseDirs,
    user_dirs: UserDirs,
}

impl Workstation {
    /// Resolves the XDG base directories, installs the tracked user-dirs
    /// files and loads them.
    pub fn init(repo_dir: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Result<Self> {
        let repo_dir = repo_dir.into();
        let home = home.into();
        let base = XdgBaseDirs::from_env(&home);

        copy_user_dirs(&repo_dir, &base)?;
        let user_dirs = UserDirs::load(&base, &home)?;

        Ok(Self {
            repo_dir,
            home,
            base,
            user_dirs,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn base_dirs(&self) -> &XdgBaseDirs {
        &self.base
    }

    pub fn user_dirs(&self) -> &UserDirs {
        &self.user_dirs
    }

    /// Installs the systemd user environment that exports the XDG base
    /// directories.
    pub fn copy_systemd_environment(&self) -> Result<PathBuf> {
        copy_config_file(&self.repo_dir, &self.base, &["environment.d", "00-xdg-base.conf"])
    }
}

fn copy_user_dirs(repo_dir: &Path, base: &XdgBaseDirs) -> Result<()> {
    copy_config_file(repo_dir, base, &["user-dirs.dirs"])?;
    copy_config_file(repo_dir, base, &["user-dirs.locale"])?;
    Ok(())
}

/// Copies `<repo>/user/XDG_CONFIG_HOME/<parts>` to `<config home>/<parts>`,
/// creating missing parent directories. Returns the destination.
pub fn copy_config_file(repo_dir: &Path, base: &XdgBaseDirs, parts: &[&str]) -> Result<PathBuf> {
    let source = TRACKED_CONFIG_DIR
        .iter()
        .chain(parts)
        .fold(repo_dir.to_path_buf(), |p, c| p.join(c));
    let target = parts.iter().fold(base.config.clone(), |p, c| p.join(c));

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::copy(&source, &target).map_err(|e| Error::io(&source, e))?;

    info!(source = %source.display(), target = %target.display(), "installed config file");
    Ok(target)
}
