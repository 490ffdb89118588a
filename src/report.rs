use chrono::{DateTime, Utc};
use std::fmt;

use crate::types::{Fingerprint, Keygrip, PrimaryKey, Record, Signature, Subkey, UserId};

/// ISO-8601 without offset, e.g. `2023-11-14T22:13:20`. Always UTC.
fn iso8601(timestamp: &DateTime<Utc>) -> impl fmt::Display + '_ {
    timestamp.format("%Y-%m-%dT%H:%M:%S")
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Primary Key")?;
        writeln!(f, "  Validity: {}", self.validity)?;
        writeln!(f, "  Key Length: {}", self.key_length)?;
        writeln!(f, "  Public Key Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Key ID: {}", self.key_id)?;
        writeln!(f, "  Created: {}", iso8601(&self.created))?;
        writeln!(f, "  Expires: {}", iso8601(&self.expires))?;
        writeln!(f, "  Owner Trust: {}", self.owner_trust)?;
        writeln!(f, "  Key Capabilities: {}", self.capabilities)?;
        writeln!(f, "  Serial Number: {}", self.serial_number)?;
        writeln!(f, "  Curve Name: {}", self.curve_name)?;
        writeln!(f, "  Origin: {}", self.origin)
    }
}

impl fmt::Display for Subkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Subkey")?;
        writeln!(f, "  Validity: {}", self.validity)?;
        writeln!(f, "  Key Length: {}", self.key_length)?;
        writeln!(f, "  Public Key Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Key ID: {}", self.key_id)?;
        writeln!(f, "  Created: {}", iso8601(&self.created))?;
        writeln!(f, "  Expires: {}", iso8601(&self.expires))?;
        writeln!(f, "  Key Capabilities: {}", self.capabilities)?;
        writeln!(f, "  Serial Number: {}", self.serial_number)?;
        writeln!(f, "  Curve Name: {}", self.curve_name)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# User ID:")?;
        writeln!(f, "  Validity: {}", self.validity)?;
        writeln!(f, "  Created: {}", iso8601(&self.created))?;
        writeln!(f, "  User ID Hash: {}", self.hash)?;
        writeln!(f, "  User ID: {}", self.user_id)?;
        writeln!(f, "  Origin: {}", self.origin)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Signature")?;
        writeln!(f, "  Public Key Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Key ID: {}", self.key_id)?;
        writeln!(f, "  Created: {}", iso8601(&self.created))?;
        writeln!(f, "  User ID: {}", self.user_id)?;
        writeln!(f, "  Type: {}", self.signature_type)?;
        writeln!(f, "  Issuer Fingerprint: {}", self.issuer_fingerprint)?;
        writeln!(f, "  Hash Algorithm: {}", self.hash_algorithm)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fingerprint: {}", self.fingerprint)
    }
}

impl fmt::Display for Keygrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keygrip: {}", self.keygrip)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey(key) => fmt::Display::fmt(key, f),
            Self::Subkey(key) => fmt::Display::fmt(key, f),
            Self::UserId(uid) => fmt::Display::fmt(uid, f),
            Self::Signature(sig) => fmt::Display::fmt(sig, f),
            Self::Fingerprint(fpr) => fmt::Display::fmt(fpr, f),
            Self::Keygrip(grp) => fmt::Display::fmt(grp, f),
        }
    }
}

/// Validated records of one listing, in input order.
///
/// Displaying a report writes one block per record and nothing else; there
/// is no grouping by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub records: Vec<Record>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.records.iter().try_for_each(|record| fmt::Display::fmt(record, f))
    }
}
