use arch_config::{
    Error, PublicKeyAlgorithm, Record, RecordType, SecretKeyring, SignatureType, TrustLevel, audit,
};

const LISTING: &str = "\
sec:u:255:22:89ABCDEF01234567:1700000000:1800000000::u:::scESC:::+::ed25519:::0:
fpr:::::::::0123456789ABCDEF0123456789ABCDEF01234567:
grp:::::::::A1B2C3D4E5F60718293A4B5C6D7E8F9012345678:
uid:u::::1700000000::2CAEDC6E92DD5AF0E9A7C7C44E08C3C7A9E26BE4::Jane Doe <jane@example.org>::::::::::0:
sig:::22:89ABCDEF01234567:1700000000::::Jane Doe <jane@example.org>:13x::0123456789ABCDEF0123456789ABCDEF01234567:::10:
ssb:u:255:18:FEDCBA9876543210:1700000000:1800000000:::::e:::+::cv25519::
fpr:::::::::FEDCBA9876543210FEDCBA9876543210FEDCBA98:
grp:::::::::0F1E2D3C4B5A69788796A5B4C3D2E1F00F1E2D3C:
sig:::22:89ABCDEF01234567:1700000100::::Jane Doe <jane@example.org>:18x::0123456789ABCDEF0123456789ABCDEF01234567:::10:
";

const EXPECTED_REPORT: &str = "\
# Primary Key
  Validity: Ultimate
  Key Length: 255
  Public Key Algorithm: EdDSA
  Key ID: 89ABCDEF01234567
  Created: 2023-11-14T22:13:20
  Expires: 2027-01-15T08:00:00
  Owner Trust: Ultimate
  Key Capabilities: scESC
  Serial Number: +
  Curve Name: ed25519
  Origin: 0
Fingerprint: 0123456789ABCDEF0123456789ABCDEF01234567
Keygrip: A1B2C3D4E5F60718293A4B5C6D7E8F9012345678
# User ID:
  Validity: Ultimate
  Created: 2023-11-14T22:13:20
  User ID Hash: 2CAEDC6E92DD5AF0E9A7C7C44E08C3C7A9E26BE4
  User ID: Jane Doe <jane@example.org>
  Origin: 0
# Signature
  Public Key Algorithm: EdDSA
  Key ID: 89ABCDEF01234567
  Created: 2023-11-14T22:13:20
  User ID: Jane Doe <jane@example.org>
  Type: Positive Certification
  Issuer Fingerprint: 0123456789ABCDEF0123456789ABCDEF01234567
  Hash Algorithm: SHA512
# Subkey
  Validity: Ultimate
  Key Length: 255
  Public Key Algorithm: ECDH
  Key ID: FEDCBA9876543210
  Created: 2023-11-14T22:13:20
  Expires: 2027-01-15T08:00:00
  Key Capabilities: e
  Serial Number: +
  Curve Name: cv25519
Fingerprint: FEDCBA9876543210FEDCBA9876543210FEDCBA98
Keygrip: 0F1E2D3C4B5A69788796A5B4C3D2E1F00F1E2D3C
# Signature
  Public Key Algorithm: EdDSA
  Key ID: 89ABCDEF01234567
  Created: 2023-11-14T22:15:00
  User ID: Jane Doe <jane@example.org>
  Type: Subkey Binding Signature
  Issuer Fingerprint: 0123456789ABCDEF0123456789ABCDEF01234567
  Hash Algorithm: SHA512
";

fn replace_line(listing: &str, index: usize, line: &str) -> String {
    listing
        .lines()
        .enumerate()
        .map(|(i, l)| if i == index { line } else { l })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_audit_full_listing_report() {
    let report = audit(LISTING).expect("listing should pass the audit");
    assert_eq!(report.len(), 9);
    assert_eq!(report.to_string(), EXPECTED_REPORT);
}

#[test]
fn test_audit_typed_records() {
    let report = audit(LISTING).unwrap();

    match &report.records[0] {
        Record::PrimaryKey(key) => {
            assert_eq!(key.validity, TrustLevel::Ultimate);
            assert_eq!(key.algorithm, PublicKeyAlgorithm::EdDsa);
        }
        other => panic!("expected primary key, got {other:?}"),
    }

    let signature_types: Vec<SignatureType> = report
        .records
        .iter()
        .filter_map(|r| match r {
            Record::Signature(sig) => Some(sig.signature_type),
            _ => None,
        })
        .collect();
    assert_eq!(
        signature_types,
        vec![SignatureType::PositiveCertification, SignatureType::SubkeyBinding]
    );
}

#[test]
fn test_audit_four_record_sequence() {
    let listing = [0, 3, 4, 1]
        .iter()
        .map(|&i| LISTING.lines().nth(i).unwrap())
        .collect::<Vec<_>>()
        .join("\n");

    let report = audit(&listing).unwrap();
    let types: Vec<RecordType> = report.records.iter().map(Record::record_type).collect();
    assert_eq!(
        types,
        vec![
            RecordType::PrimaryKey,
            RecordType::UserId,
            RecordType::Signature,
            RecordType::Fingerprint,
        ]
    );
}

#[test]
fn test_audit_is_deterministic() {
    let first = audit(LISTING).unwrap().to_string();
    let second = audit(LISTING).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn test_audit_unknown_record_type_aborts() {
    let listing = replace_line(LISTING, 2, "xyz:::::::::whatever:");
    let err = audit(&listing).unwrap_err();
    assert!(matches!(
        err,
        Error::UnrecognizedRecordType { line: 3, ref tag } if tag == "xyz"
    ));
}

#[test]
fn test_audit_public_key_listing_is_rejected() {
    let listing = LISTING.replacen("sec:", "pub:", 1);
    assert!(matches!(
        audit(&listing),
        Err(Error::UnrecognizedRecordType { line: 1, .. })
    ));
}

#[test]
fn test_audit_format_drift() {
    let listing = replace_line(
        LISTING,
        1,
        "fpr::::::::x:0123456789ABCDEF0123456789ABCDEF01234567:",
    );
    assert!(matches!(
        audit(&listing),
        Err(Error::FormatDrift { record: "fpr", .. })
    ));
}

#[test]
fn test_audit_key_id_mismatch() {
    let listing = replace_line(
        LISTING,
        4,
        "sig:::22:89ABCDEF01234568:1700000000::::Jane Doe <jane@example.org>:13x::0123456789ABCDEF0123456789ABCDEF01234567:::10:",
    );
    assert!(matches!(
        audit(&listing),
        Err(Error::ConsistencyViolation { record: "sig", .. })
    ));
}

#[test]
fn test_audit_unsupported_signature_type() {
    let listing = LISTING.replacen(":13x:", ":10x:", 1);
    assert!(matches!(
        audit(&listing),
        Err(Error::UnsupportedValue { field: "signature type", .. })
    ));
}

#[test]
fn test_audit_local_signature_rejected() {
    let listing = LISTING.replacen(":18x:", ":18l:", 1);
    assert!(matches!(
        audit(&listing),
        Err(Error::ConsistencyViolation { record: "sig", .. })
    ));
}

#[test]
fn test_audit_marginal_validity_rejected() {
    let listing = LISTING.replacen("uid:u:", "uid:m:", 1);
    assert!(matches!(
        audit(&listing),
        Err(Error::UnsupportedValue { field: "validity", .. })
    ));
}

#[tokio::test]
#[ignore]
async fn test_audit_real_keyring() {
    let report = SecretKeyring::new()
        .audit()
        .await
        .expect("secret keyring should match the expected shape");

    assert!(
        report
            .records
            .iter()
            .any(|r| r.record_type() == RecordType::PrimaryKey),
        "keyring should contain a primary key"
    );
}

#[tokio::test]
#[ignore]
async fn test_list_secret_keys_empty_homedir() {
    let homedir = tempfile::tempdir().unwrap();
    let keyring = SecretKeyring::with_homedir(homedir.path().to_string_lossy());
    let listing = keyring
        .list_secret_keys()
        .await
        .expect("gpg should list an empty keyring");

    let report = audit(&listing).unwrap();
    assert!(report.is_empty());
}
