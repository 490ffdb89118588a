//! Workstation bootstrap and audit for a single Arch Linux user.
//!
//! The crate installs the tracked XDG user configuration, reports files in
//! the home directory that live outside every expected location, and audits
//! the GnuPG secret keyring against one known key configuration.
//!
//! The keyring audit is deliberately strict. Every line of
//! `gpg --list-secret-keys --with-colons --with-sig-list` must be one of six
//! record types, with exactly the expected fields populated and every coded
//! value on a short allow-list. Anything unfamiliar is an error.
//!
//! # Example
//!
//! ```no_run
//! use arch_config::SecretKeyring;
//!
//! #[tokio::main]
//! async fn main() -> arch_config::Result<()> {
//!     let report = SecretKeyring::new().audit().await?;
//!     print!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! A captured listing can be audited without running gpg:
//!
//! ```
//! let listing = "fpr:::::::::0123456789ABCDEF0123456789ABCDEF01234567:\n";
//! let report = arch_config::audit(listing).unwrap();
//! assert_eq!(
//!     report.to_string(),
//!     "Fingerprint: 0123456789ABCDEF0123456789ABCDEF01234567\n"
//! );
//! ```

mod audit;
mod bootstrap;
mod error;
mod home;
mod keyring;
mod parse;
mod record;
mod report;
mod schema;
mod types;
mod validation;
pub mod xdg;

pub use audit::audit;
pub use bootstrap::{Workstation, copy_config_file};
pub use error::{Error, Result};
pub use home::{HomeScan, scan as scan_home};
pub use keyring::SecretKeyring;
pub use parse::{parse_record, parse_signature_class};
pub use record::{RawRecord, RecordType};
pub use report::Report;
pub use types::{
    CodedValue, Fingerprint, HashAlgorithm, Keygrip, PrimaryKey, PublicKeyAlgorithm, Record,
    Signature, SignatureType, Subkey, TrustLevel, UserId,
};
