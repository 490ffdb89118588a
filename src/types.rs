use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{Error, Result};
use crate::record::RecordType;

/// A field whose raw code maps onto a closed set of known values.
///
/// Resolution never fails on its own: codes outside the allow-list become an
/// `Unsupported` variant. Callers then demand the values they accept with
/// [`require`], which turns everything else into [`Error::UnsupportedValue`].
pub trait CodedValue: Clone + PartialEq + fmt::Display {
    /// The raw code this value was resolved from.
    fn code(&self) -> String;
}

/// Accepts `value` only if it is one of `allowed`.
pub fn require<T: CodedValue>(value: T, allowed: &[T], field: &'static str) -> Result<T> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(Error::UnsupportedValue {
            field,
            value: value.code(),
        })
    }
}

/// Validity or owner-trust level.
///
/// GnuPG uses the same letters for both. Only ultimate trust is part of the
/// audited configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrustLevel {
    Ultimate,
    Unsupported(String),
}

impl TrustLevel {
    pub fn from_gpg_code(code: &str) -> Self {
        match code {
            "u" => Self::Ultimate,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

impl CodedValue for TrustLevel {
    fn code(&self) -> String {
        match self {
            Self::Ultimate => "u".to_string(),
            Self::Unsupported(code) => code.clone(),
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ultimate => f.write_str("Ultimate"),
            Self::Unsupported(code) => write!(f, "unsupported ({code})"),
        }
    }
}

/// Public key algorithm, by its OpenPGP algorithm id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublicKeyAlgorithm {
    /// 18
    Ecdh,
    /// 22
    EdDsa,
    Unsupported(String),
}

impl PublicKeyAlgorithm {
    pub fn from_gpg_code(code: &str) -> Self {
        match code {
            "18" => Self::Ecdh,
            "22" => Self::EdDsa,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

impl CodedValue for PublicKeyAlgorithm {
    fn code(&self) -> String {
        match self {
            Self::Ecdh => "18".to_string(),
            Self::EdDsa => "22".to_string(),
            Self::Unsupported(code) => code.clone(),
        }
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecdh => f.write_str("ECDH"),
            Self::EdDsa => f.write_str("EdDSA"),
            Self::Unsupported(code) => write!(f, "ALG{code}"),
        }
    }
}

/// Hash algorithm, by its OpenPGP algorithm id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// 10
    Sha512,
    Unsupported(String),
}

impl HashAlgorithm {
    pub fn from_gpg_code(code: &str) -> Self {
        match code {
            "10" => Self::Sha512,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

impl CodedValue for HashAlgorithm {
    fn code(&self) -> String {
        match self {
            Self::Sha512 => "10".to_string(),
            Self::Unsupported(code) => code.clone(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha512 => f.write_str("SHA512"),
            Self::Unsupported(code) => write!(f, "HASH{code}"),
        }
    }
}

/// OpenPGP signature type octet (RFC 4880, section 5.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureType {
    /// 0x13
    PositiveCertification,
    /// 0x18
    SubkeyBinding,
    Unsupported(u8),
}

impl SignatureType {
    pub fn from_octet(octet: u8) -> Self {
        match octet {
            0x13 => Self::PositiveCertification,
            0x18 => Self::SubkeyBinding,
            other => Self::Unsupported(other),
        }
    }

    pub fn octet(self) -> u8 {
        match self {
            Self::PositiveCertification => 0x13,
            Self::SubkeyBinding => 0x18,
            Self::Unsupported(octet) => octet,
        }
    }
}

impl CodedValue for SignatureType {
    fn code(&self) -> String {
        format!("{:02x}", self.octet())
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositiveCertification => f.write_str("Positive Certification"),
            Self::SubkeyBinding => f.write_str("Subkey Binding Signature"),
            Self::Unsupported(octet) => write!(f, "unsupported (0x{octet:02x})"),
        }
    }
}

/// Secret primary key (`sec`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub validity: TrustLevel,
    pub key_length: u32,
    pub algorithm: PublicKeyAlgorithm,
    pub key_id: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub owner_trust: TrustLevel,
    pub capabilities: String,
    pub serial_number: String,
    pub curve_name: String,
    pub origin: String,
}

/// Secret subkey (`ssb`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subkey {
    pub validity: TrustLevel,
    pub key_length: u32,
    pub algorithm: PublicKeyAlgorithm,
    pub key_id: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub capabilities: String,
    pub serial_number: String,
    pub curve_name: String,
}

/// User id (`uid`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId {
    pub validity: TrustLevel,
    pub created: DateTime<Utc>,
    pub hash: String,
    /// Raw user id, percent escapes included.
    pub user_id: String,
    pub origin: String,
}

/// Signature (`sig`) as listed with `--with-sig-list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub algorithm: PublicKeyAlgorithm,
    pub key_id: String,
    pub created: DateTime<Utc>,
    pub user_id: String,
    pub signature_type: SignatureType,
    pub issuer_fingerprint: String,
    pub hash_algorithm: HashAlgorithm,
}

/// Fingerprint (`fpr`) of the preceding key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub fingerprint: String,
}

/// Keygrip (`grp`) of the preceding key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keygrip {
    pub keygrip: String,
}

/// A validated line of the secret-key listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    PrimaryKey(PrimaryKey),
    Subkey(Subkey),
    UserId(UserId),
    Signature(Signature),
    Fingerprint(Fingerprint),
    Keygrip(Keygrip),
}

impl Record {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::PrimaryKey(_) => RecordType::PrimaryKey,
            Self::Subkey(_) => RecordType::Subkey,
            Self::UserId(_) => RecordType::UserId,
            Self::Signature(_) => RecordType::Signature,
            Self::Fingerprint(_) => RecordType::Fingerprint,
            Self::Keygrip(_) => RecordType::Keygrip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_level_from_gpg_code() {
        assert_eq!(TrustLevel::from_gpg_code("u"), TrustLevel::Ultimate);
        assert_eq!(
            TrustLevel::from_gpg_code("f"),
            TrustLevel::Unsupported("f".to_string())
        );
        assert_eq!(
            TrustLevel::from_gpg_code(""),
            TrustLevel::Unsupported(String::new())
        );
    }

    #[test]
    fn test_public_key_algorithm_from_gpg_code() {
        assert_eq!(PublicKeyAlgorithm::from_gpg_code("18"), PublicKeyAlgorithm::Ecdh);
        assert_eq!(PublicKeyAlgorithm::from_gpg_code("22"), PublicKeyAlgorithm::EdDsa);
        assert_eq!(
            PublicKeyAlgorithm::from_gpg_code("1"),
            PublicKeyAlgorithm::Unsupported("1".to_string())
        );
        assert_eq!(PublicKeyAlgorithm::EdDsa.to_string(), "EdDSA");
        assert_eq!(PublicKeyAlgorithm::Ecdh.to_string(), "ECDH");
    }

    #[test]
    fn test_hash_algorithm_from_gpg_code() {
        assert_eq!(HashAlgorithm::from_gpg_code("10"), HashAlgorithm::Sha512);
        assert_eq!(
            HashAlgorithm::from_gpg_code("8"),
            HashAlgorithm::Unsupported("8".to_string())
        );
    }

    #[test]
    fn test_signature_type_from_octet() {
        assert_eq!(
            SignatureType::from_octet(0x13),
            SignatureType::PositiveCertification
        );
        assert_eq!(SignatureType::from_octet(0x18), SignatureType::SubkeyBinding);
        assert_eq!(SignatureType::from_octet(0x10), SignatureType::Unsupported(0x10));
        assert_eq!(SignatureType::Unsupported(0x1f).code(), "1f");
    }

    #[test]
    fn test_require_accepts_allowed() {
        let algorithm = require(
            PublicKeyAlgorithm::Ecdh,
            &[PublicKeyAlgorithm::Ecdh, PublicKeyAlgorithm::EdDsa],
            "public key algorithm",
        )
        .unwrap();
        assert_eq!(algorithm, PublicKeyAlgorithm::Ecdh);
    }

    #[test]
    fn test_require_rejects_known_but_disallowed() {
        let err = require(
            PublicKeyAlgorithm::Ecdh,
            &[PublicKeyAlgorithm::EdDsa],
            "public key algorithm",
        )
        .unwrap_err();
        match err {
            Error::UnsupportedValue { field, value } => {
                assert_eq!(field, "public key algorithm");
                assert_eq!(value, "18");
            }
            other => panic!("expected UnsupportedValue, got {other:?}"),
        }
    }

    #[test]
    fn test_require_rejects_unsupported() {
        let err = require(
            TrustLevel::from_gpg_code("m"),
            &[TrustLevel::Ultimate],
            "validity",
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue { field: "validity", .. }));
    }
}
