use tracing::{debug, error};

use crate::error::Result;
use crate::parse::parse_record;
use crate::report::Report;

/// Validates a captured secret-key listing.
///
/// Every line must be a record of a known type in the exact shape of the
/// audited key configuration. The first line that is not stops the audit
/// and its error is returned; no partial report is produced.
///
/// The function holds no state, so auditing the same text twice yields the
/// same report.
pub fn audit(listing: &str) -> Result<Report> {
    let mut records = Vec::new();

    for (index, line) in listing.lines().enumerate() {
        let line_number = index + 1;
        let record = parse_record(line_number, line).inspect_err(|e| {
            error!(line = line_number, error = %e, "key listing audit failed");
        })?;

        debug!(
            line = line_number,
            record_type = %record.record_type(),
            "validated record"
        );
        records.push(record);
    }

    debug!(records = records.len(), "key listing audit passed");
    Ok(Report { records })
}
