use std::fmt;

/// Kind of a line in GnuPG's `--with-colons` listing.
///
/// Only the record types that appear in a secret-key listing of the audited
/// key configuration are known. The listing format is assumed to be pinned,
/// so every other tag is treated as an error rather than skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// `sec`: secret primary key
    PrimaryKey,
    /// `ssb`: secret subkey
    Subkey,
    /// `uid`: user id
    UserId,
    /// `sig`: signature
    Signature,
    /// `fpr`: fingerprint of the preceding key
    Fingerprint,
    /// `grp`: keygrip of the preceding key
    Keygrip,
}

impl RecordType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sec" => Some(Self::PrimaryKey),
            "ssb" => Some(Self::Subkey),
            "uid" => Some(Self::UserId),
            "sig" => Some(Self::Signature),
            "fpr" => Some(Self::Fingerprint),
            "grp" => Some(Self::Keygrip),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::PrimaryKey => "sec",
            Self::Subkey => "ssb",
            Self::UserId => "uid",
            Self::Signature => "sig",
            Self::Fingerprint => "fpr",
            Self::Keygrip => "grp",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One tokenized line of the listing.
///
/// Fields are raw substrings of the line. Percent escapes such as `%3A` are
/// left as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    pub fn split(line: &'a str) -> Self {
        Self {
            fields: line.split(':').collect(),
        }
    }

    /// Field 0. A line without any colon is all tag.
    pub fn tag(&self) -> &'a str {
        self.fields.first().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at `index`, or an empty string past the end.
    pub fn get(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.fields.iter().copied().enumerate()
    }
}
