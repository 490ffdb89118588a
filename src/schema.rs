//! Positional layout of each record type.
//!
//! A schema lists the positions that may carry a value. Every other position
//! of a record must be empty; anything else means the listing tool's output
//! no longer matches the layout this crate was written against.

use crate::error::{Error, Result};
use crate::record::{RawRecord, RecordType};

/// A populated position in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub index: usize,
    pub name: &'static str,
}

impl Field {
    const fn new(index: usize, name: &'static str) -> Self {
        Self { index, name }
    }
}

pub const VALIDITY: Field = Field::new(1, "validity");
pub const KEY_LENGTH: Field = Field::new(2, "key length");
pub const PUBLIC_KEY_ALGORITHM: Field = Field::new(3, "public key algorithm");
pub const KEY_ID: Field = Field::new(4, "key id");
pub const CREATED: Field = Field::new(5, "creation date");
pub const EXPIRES: Field = Field::new(6, "expiration date");
pub const USER_ID_HASH: Field = Field::new(7, "user id hash");
pub const OWNER_TRUST: Field = Field::new(8, "owner trust");
pub const USER_ID: Field = Field::new(9, "user id");
pub const FINGERPRINT: Field = Field::new(9, "fingerprint");
pub const KEYGRIP: Field = Field::new(9, "keygrip");
pub const SIGNATURE_CLASS: Field = Field::new(10, "signature class");
pub const KEY_CAPABILITIES: Field = Field::new(11, "key capabilities");
pub const ISSUER_FINGERPRINT: Field = Field::new(12, "issuer fingerprint");
pub const SERIAL_NUMBER: Field = Field::new(14, "serial number");
pub const HASH_ALGORITHM: Field = Field::new(15, "hash algorithm");
pub const CURVE_NAME: Field = Field::new(16, "curve name");
pub const ORIGIN: Field = Field::new(19, "origin");

#[derive(Debug)]
pub struct Schema {
    pub record_type: RecordType,
    pub fields: &'static [Field],
}

pub const PRIMARY_KEY: Schema = Schema {
    record_type: RecordType::PrimaryKey,
    fields: &[
        VALIDITY,
        KEY_LENGTH,
        PUBLIC_KEY_ALGORITHM,
        KEY_ID,
        CREATED,
        EXPIRES,
        OWNER_TRUST,
        KEY_CAPABILITIES,
        SERIAL_NUMBER,
        CURVE_NAME,
        ORIGIN,
    ],
};

pub const SUBKEY: Schema = Schema {
    record_type: RecordType::Subkey,
    fields: &[
        VALIDITY,
        KEY_LENGTH,
        PUBLIC_KEY_ALGORITHM,
        KEY_ID,
        CREATED,
        EXPIRES,
        KEY_CAPABILITIES,
        SERIAL_NUMBER,
        CURVE_NAME,
    ],
};

pub const USER_ID_RECORD: Schema = Schema {
    record_type: RecordType::UserId,
    fields: &[VALIDITY, CREATED, USER_ID_HASH, USER_ID, ORIGIN],
};

pub const SIGNATURE: Schema = Schema {
    record_type: RecordType::Signature,
    fields: &[
        PUBLIC_KEY_ALGORITHM,
        KEY_ID,
        CREATED,
        USER_ID,
        SIGNATURE_CLASS,
        ISSUER_FINGERPRINT,
        HASH_ALGORITHM,
    ],
};

pub const FINGERPRINT_RECORD: Schema = Schema {
    record_type: RecordType::Fingerprint,
    fields: &[FINGERPRINT],
};

pub const KEYGRIP_RECORD: Schema = Schema {
    record_type: RecordType::Keygrip,
    fields: &[KEYGRIP],
};

impl Schema {
    /// Number of fields a record needs so that every declared position exists.
    pub fn min_len(&self) -> usize {
        self.fields.iter().map(|f| f.index).max().unwrap_or(0) + 1
    }

    fn allows(&self, index: usize) -> bool {
        index == 0 || self.fields.iter().any(|f| f.index == index)
    }

    /// Checks the tag, the record length and that only declared positions
    /// are non-empty.
    pub fn check(&self, record: &RawRecord<'_>) -> Result<()> {
        let tag = self.record_type.tag();

        if record.tag() != tag {
            return Err(self.drift(format!("expected tag '{}', got '{}'", tag, record.tag())));
        }

        if record.len() < self.min_len() {
            return Err(self.drift(format!(
                "expected at least {} fields, got {}",
                self.min_len(),
                record.len()
            )));
        }

        if let Some((index, value)) = record
            .iter()
            .find(|&(index, value)| !value.is_empty() && !self.allows(index))
        {
            return Err(self.drift(format!("unexpected value '{}' at field {}", value, index)));
        }

        Ok(())
    }

    fn drift(&self, reason: String) -> Error {
        Error::FormatDrift {
            record: self.record_type.tag(),
            reason,
        }
    }
}
