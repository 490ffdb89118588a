use crate::error::{Error, Result};
use crate::record::RecordType;
use crate::schema::Field;

/// Length of a long key id in hex digits.
pub const KEY_ID_LEN: usize = 16;

/// Length of a v4 fingerprint or a keygrip in hex digits.
pub const FINGERPRINT_LEN: usize = 40;

/// Validates that a field is exactly `len` hex digits.
///
/// Returns the value unchanged on success. Key ids, fingerprints and
/// keygrips are compared verbatim elsewhere, so no normalization happens
/// here.
pub fn validate_hex<'a>(
    record_type: RecordType,
    field: Field,
    value: &'a str,
    len: usize,
) -> Result<&'a str> {
    if value.is_empty() {
        return Err(drift(record_type, format!("{} cannot be empty", field.name)));
    }

    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(drift(
            record_type,
            format!("{} '{}' must contain only hexadecimal characters", field.name, value),
        ));
    }

    if value.len() != len {
        return Err(drift(
            record_type,
            format!(
                "{} must be {} hex characters (got {})",
                field.name,
                len,
                value.len()
            ),
        ));
    }

    Ok(value)
}

pub fn validate_key_id(record_type: RecordType, field: Field, value: &str) -> Result<&str> {
    validate_hex(record_type, field, value, KEY_ID_LEN)
}

pub fn validate_fingerprint(record_type: RecordType, field: Field, value: &str) -> Result<&str> {
    validate_hex(record_type, field, value, FINGERPRINT_LEN)
}

fn drift(record_type: RecordType, reason: String) -> Error {
    Error::FormatDrift {
        record: record_type.tag(),
        reason,
    }
}
