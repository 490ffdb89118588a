use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::record::{RawRecord, RecordType};
use crate::schema::{self, Field, Schema};
use crate::types::{
    Fingerprint, HashAlgorithm, Keygrip, PrimaryKey, PublicKeyAlgorithm, Record, Signature,
    SignatureType, Subkey, TrustLevel, UserId, require,
};
use crate::validation::{KEY_ID_LEN, validate_fingerprint, validate_key_id};

/// Tokenizes one listing line and validates it against its record type.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_record(line_number: usize, line: &str) -> Result<Record> {
    let record = RawRecord::split(line);

    let Some(record_type) = RecordType::from_tag(record.tag()) else {
        return Err(Error::UnrecognizedRecordType {
            line: line_number,
            tag: record.tag().to_string(),
        });
    };

    match record_type {
        RecordType::PrimaryKey => parse_primary_key(&record).map(Record::PrimaryKey),
        RecordType::Subkey => parse_subkey(&record).map(Record::Subkey),
        RecordType::UserId => parse_user_id(&record).map(Record::UserId),
        RecordType::Signature => parse_signature(&record).map(Record::Signature),
        RecordType::Fingerprint => parse_fingerprint(&record).map(Record::Fingerprint),
        RecordType::Keygrip => parse_keygrip(&record).map(Record::Keygrip),
    }
}

pub fn parse_primary_key(record: &RawRecord<'_>) -> Result<PrimaryKey> {
    let layout = &schema::PRIMARY_KEY;
    layout.check(record)?;
    let record_type = layout.record_type;

    Ok(PrimaryKey {
        validity: require(
            TrustLevel::from_gpg_code(record.get(schema::VALIDITY.index)),
            &[TrustLevel::Ultimate],
            schema::VALIDITY.name,
        )?,
        key_length: parse_integer(layout, record, schema::KEY_LENGTH)?,
        algorithm: require(
            PublicKeyAlgorithm::from_gpg_code(record.get(schema::PUBLIC_KEY_ALGORITHM.index)),
            &[PublicKeyAlgorithm::EdDsa],
            schema::PUBLIC_KEY_ALGORITHM.name,
        )?,
        key_id: validate_key_id(record_type, schema::KEY_ID, record.get(schema::KEY_ID.index))?
            .to_string(),
        created: parse_timestamp(layout, record, schema::CREATED)?,
        expires: parse_timestamp(layout, record, schema::EXPIRES)?,
        owner_trust: require(
            TrustLevel::from_gpg_code(record.get(schema::OWNER_TRUST.index)),
            &[TrustLevel::Ultimate],
            schema::OWNER_TRUST.name,
        )?,
        capabilities: record.get(schema::KEY_CAPABILITIES.index).to_string(),
        serial_number: record.get(schema::SERIAL_NUMBER.index).to_string(),
        curve_name: record.get(schema::CURVE_NAME.index).to_string(),
        origin: record.get(schema::ORIGIN.index).to_string(),
    })
}

pub fn parse_subkey(record: &RawRecord<'_>) -> Result<Subkey> {
    let layout = &schema::SUBKEY;
    layout.check(record)?;
    let record_type = layout.record_type;

    Ok(Subkey {
        validity: require(
            TrustLevel::from_gpg_code(record.get(schema::VALIDITY.index)),
            &[TrustLevel::Ultimate],
            schema::VALIDITY.name,
        )?,
        key_length: parse_integer(layout, record, schema::KEY_LENGTH)?,
        algorithm: require(
            PublicKeyAlgorithm::from_gpg_code(record.get(schema::PUBLIC_KEY_ALGORITHM.index)),
            &[PublicKeyAlgorithm::Ecdh, PublicKeyAlgorithm::EdDsa],
            schema::PUBLIC_KEY_ALGORITHM.name,
        )?,
        key_id: validate_key_id(record_type, schema::KEY_ID, record.get(schema::KEY_ID.index))?
            .to_string(),
        created: parse_timestamp(layout, record, schema::CREATED)?,
        expires: parse_timestamp(layout, record, schema::EXPIRES)?,
        capabilities: record.get(schema::KEY_CAPABILITIES.index).to_string(),
        serial_number: record.get(schema::SERIAL_NUMBER.index).to_string(),
        curve_name: record.get(schema::CURVE_NAME.index).to_string(),
    })
}

pub fn parse_user_id(record: &RawRecord<'_>) -> Result<UserId> {
    let layout = &schema::USER_ID_RECORD;
    layout.check(record)?;

    Ok(UserId {
        validity: require(
            TrustLevel::from_gpg_code(record.get(schema::VALIDITY.index)),
            &[TrustLevel::Ultimate],
            schema::VALIDITY.name,
        )?,
        created: parse_timestamp(layout, record, schema::CREATED)?,
        hash: validate_fingerprint(
            layout.record_type,
            schema::USER_ID_HASH,
            record.get(schema::USER_ID_HASH.index),
        )?
        .to_string(),
        user_id: record.get(schema::USER_ID.index).to_string(),
        origin: record.get(schema::ORIGIN.index).to_string(),
    })
}

pub fn parse_signature(record: &RawRecord<'_>) -> Result<Signature> {
    let layout = &schema::SIGNATURE;
    layout.check(record)?;
    let record_type = layout.record_type;

    let algorithm = require(
        PublicKeyAlgorithm::from_gpg_code(record.get(schema::PUBLIC_KEY_ALGORITHM.index)),
        &[PublicKeyAlgorithm::EdDsa],
        schema::PUBLIC_KEY_ALGORITHM.name,
    )?;
    let key_id = record.get(schema::KEY_ID.index);
    let issuer_fingerprint = record.get(schema::ISSUER_FINGERPRINT.index);
    check_key_id_link(key_id, issuer_fingerprint)?;
    validate_key_id(record_type, schema::KEY_ID, key_id)?;
    validate_fingerprint(record_type, schema::ISSUER_FINGERPRINT, issuer_fingerprint)?;

    Ok(Signature {
        algorithm,
        key_id: key_id.to_string(),
        created: parse_timestamp(layout, record, schema::CREATED)?,
        user_id: record.get(schema::USER_ID.index).to_string(),
        signature_type: parse_signature_class(record.get(schema::SIGNATURE_CLASS.index))?,
        issuer_fingerprint: issuer_fingerprint.to_string(),
        hash_algorithm: require(
            HashAlgorithm::from_gpg_code(record.get(schema::HASH_ALGORITHM.index)),
            &[HashAlgorithm::Sha512],
            schema::HASH_ALGORITHM.name,
        )?,
    })
}

pub fn parse_fingerprint(record: &RawRecord<'_>) -> Result<Fingerprint> {
    let layout = &schema::FINGERPRINT_RECORD;
    layout.check(record)?;

    let fingerprint = validate_fingerprint(
        layout.record_type,
        schema::FINGERPRINT,
        record.get(schema::FINGERPRINT.index),
    )?;

    Ok(Fingerprint {
        fingerprint: fingerprint.to_string(),
    })
}

pub fn parse_keygrip(record: &RawRecord<'_>) -> Result<Keygrip> {
    let layout = &schema::KEYGRIP_RECORD;
    layout.check(record)?;

    let keygrip = validate_fingerprint(
        layout.record_type,
        schema::KEYGRIP,
        record.get(schema::KEYGRIP.index),
    )?;

    Ok(Keygrip {
        keygrip: keygrip.to_string(),
    })
}

/// Decodes a signature class such as `13x`.
///
/// The first two characters are the hex signature type, the third must be
/// the exportable marker `x`. Local (`l`) signatures are rejected.
pub fn parse_signature_class(value: &str) -> Result<SignatureType> {
    let violation = |reason: String| Error::ConsistencyViolation {
        record: RecordType::Signature.tag(),
        reason,
    };

    if value.len() != 3 {
        return Err(violation(format!(
            "signature class '{}' must be 3 characters",
            value
        )));
    }

    let octet = value
        .get(..2)
        .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        .ok_or_else(|| {
            violation(format!(
                "signature class '{}' does not start with a hex signature type",
                value
            ))
        })?;

    let signature_type = require(
        SignatureType::from_octet(octet),
        &[
            SignatureType::PositiveCertification,
            SignatureType::SubkeyBinding,
        ],
        "signature type",
    )?;

    if value.get(2..) != Some("x") {
        return Err(violation(format!(
            "signature class '{}' is not marked exportable",
            value
        )));
    }

    Ok(signature_type)
}

/// A signature's key id must be the low 16 hex digits of the issuer
/// fingerprint.
fn check_key_id_link(key_id: &str, issuer_fingerprint: &str) -> Result<()> {
    let suffix = issuer_fingerprint
        .len()
        .checked_sub(KEY_ID_LEN)
        .and_then(|start| issuer_fingerprint.get(start..));

    if suffix == Some(key_id) {
        Ok(())
    } else {
        Err(Error::ConsistencyViolation {
            record: RecordType::Signature.tag(),
            reason: format!(
                "key id {} does not match issuer fingerprint {}",
                key_id, issuer_fingerprint
            ),
        })
    }
}

fn parse_integer<T: FromStr>(layout: &Schema, record: &RawRecord<'_>, field: Field) -> Result<T> {
    let value = record.get(field.index);
    value.parse().map_err(|_| Error::FormatDrift {
        record: layout.record_type.tag(),
        reason: format!("{} '{}' is not an integer", field.name, value),
    })
}

fn parse_timestamp(
    layout: &Schema,
    record: &RawRecord<'_>,
    field: Field,
) -> Result<DateTime<Utc>> {
    let seconds: i64 = parse_integer(layout, record, field)?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| Error::FormatDrift {
        record: layout.record_type.tag(),
        reason: format!("{} {} is out of range", field.name, seconds),
    })
}
