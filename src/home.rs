use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::bootstrap::Workstation;

/// Home subdirectories that are expected but not managed through XDG.
const UNTRACKED_DIRS: [&str; 2] = ["developer", ".mozilla"];

/// Files found in the home directory outside every expected location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeScan {
    /// Paths relative to the home directory, in walk order.
    pub unknown: Vec<PathBuf>,
}

impl fmt::Display for HomeScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.unknown {
            writeln!(f, "{}", path.display())?;
        }
        let message = format!("{} unknown files", self.unknown.len());
        writeln!(f, "{}", "-".repeat(message.len()))?;
        writeln!(f, "{message}")
    }
}

/// Walks `home` and collects every non-directory entry that is not below
/// one of `ignored`.
///
/// Symlinks are not followed. A symlink to a directory counts as a
/// directory and is neither reported nor descended into. Entries that cannot
/// be read are logged and skipped.
pub fn scan(home: &Path, ignored: &HashSet<PathBuf>) -> HomeScan {
    let mut unknown = Vec::new();

    let walker = WalkDir::new(home)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !ignored.contains(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    path = %e.path().unwrap_or(home).display(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(home) {
            unknown.push(relative.to_path_buf());
        }
    }

    debug!(home = %home.display(), unknown = unknown.len(), "scanned home directory");
    HomeScan { unknown }
}

impl Workstation {
    /// Directories whose contents are expected and skipped by [`Self::scan_home`].
    pub fn ignored_dirs(&self) -> HashSet<PathBuf> {
        UNTRACKED_DIRS
            .iter()
            .map(|dir| self.home().join(dir))
            .chain(self.base_dirs().iter().map(Path::to_path_buf))
            .chain(self.user_dirs().iter().map(|(_, path)| path.to_path_buf()))
            .collect()
    }

    pub fn scan_home(&self) -> HomeScan {
        scan(self.home(), &self.ignored_dirs())
    }
}
