//! XDG base and user directory resolution.

use regex::Regex;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Error, Result};

static USER_DIR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^XDG_([A-Z]+)_DIR="(\$HOME)?/(.*)"$"#).expect("user-dirs pattern is valid")
});

/// The four XDG base directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgBaseDirs {
    pub cache: PathBuf,
    pub config: PathBuf,
    pub data: PathBuf,
    pub state: PathBuf,
}

impl XdgBaseDirs {
    /// Resolves against the process environment.
    pub fn from_env(home: &Path) -> Self {
        Self::resolve(home, |var| std::env::var_os(var))
    }

    /// Resolves each directory from `XDG_<KEY>_HOME`, falling back to the
    /// home-relative default when the variable is unset or empty.
    pub fn resolve<F>(home: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let dir = |key: &str, default: &[&str]| {
            lookup(&format!("XDG_{key}_HOME"))
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| default.iter().fold(home.to_path_buf(), |p, c| p.join(c)))
        };

        Self {
            cache: dir("CACHE", &[".cache"]),
            config: dir("CONFIG", &[".config"]),
            data: dir("DATA", &[".local", "share"]),
            state: dir("STATE", &[".local", "state"]),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.cache, &self.config, &self.data, &self.state]
            .into_iter()
            .map(PathBuf::as_path)
    }

    pub fn user_dirs_file(&self) -> PathBuf {
        self.config.join("user-dirs.dirs")
    }

    pub fn user_dirs_locale_file(&self) -> PathBuf {
        self.config.join("user-dirs.locale")
    }
}

/// A well-known XDG user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserDir {
    Desktop,
    Documents,
    Download,
    Music,
    Pictures,
    PublicShare,
    Templates,
    Videos,
}

impl UserDir {
    pub const ALL: [UserDir; 8] = [
        Self::Desktop,
        Self::Documents,
        Self::Download,
        Self::Music,
        Self::Pictures,
        Self::PublicShare,
        Self::Templates,
        Self::Videos,
    ];

    /// The `<KEY>` in `XDG_<KEY>_DIR`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Desktop => "DESKTOP",
            Self::Documents => "DOCUMENTS",
            Self::Download => "DOWNLOAD",
            Self::Music => "MUSIC",
            Self::Pictures => "PICTURES",
            Self::PublicShare => "PUBLICSHARE",
            Self::Templates => "TEMPLATES",
            Self::Videos => "VIDEOS",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.key() == key)
    }
}

impl fmt::Display for UserDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// All eight user directories, resolved to absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirs {
    dirs: BTreeMap<UserDir, PathBuf>,
}

impl UserDirs {
    /// Loads and parses `user-dirs.dirs`, after checking that
    /// `user-dirs.locale` selects the C locale.
    pub fn load(base: &XdgBaseDirs, home: &Path) -> Result<Self> {
        let locale_file = base.user_dirs_locale_file();
        let locale =
            std::fs::read_to_string(&locale_file).map_err(|e| Error::io(&locale_file, e))?;
        check_locale(&locale)?;

        let dirs_file = base.user_dirs_file();
        let contents =
            std::fs::read_to_string(&dirs_file).map_err(|e| Error::io(&dirs_file, e))?;
        Self::parse(&contents, home)
    }

    /// Parses the contents of `user-dirs.dirs`.
    ///
    /// Accepts only `XDG_<KEY>_DIR="$HOME/<path>"` and
    /// `XDG_<KEY>_DIR="/<path>"` lines and comments. Blank lines are invalid.
    /// Every one of the eight keys must be present.
    pub fn parse(contents: &str, home: &Path) -> Result<Self> {
        let mut dirs = BTreeMap::new();

        for line in contents.lines().map(str::trim) {
            if line.starts_with('#') {
                continue;
            }

            let captures = USER_DIR_LINE
                .captures(line)
                .ok_or_else(|| Error::InvalidUserDirsLine(line.to_string()))?;

            let key = &captures[1];
            let dir = UserDir::from_key(key).ok_or_else(|| Error::UnknownUserDir(key.to_string()))?;

            let relative = &captures[3];
            let path = if captures.get(2).is_some() {
                home.join(relative)
            } else {
                Path::new("/").join(relative)
            };
            dirs.insert(dir, path);
        }

        if let Some(missing) = UserDir::ALL.into_iter().find(|dir| !dirs.contains_key(dir)) {
            return Err(Error::MissingUserDir(missing.key()));
        }

        Ok(Self { dirs })
    }

    pub fn get(&self, dir: UserDir) -> Option<&Path> {
        self.dirs.get(&dir).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserDir, &Path)> {
        self.dirs.iter().map(|(dir, path)| (*dir, path.as_path()))
    }
}

/// Only the C locale is supported for user directory names.
pub fn check_locale(contents: &str) -> Result<()> {
    match contents.trim() {
        "C" => Ok(()),
        other => Err(Error::UnsupportedLocale(other.to_string())),
    }
}
