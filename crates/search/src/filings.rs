use crate::identifier::same_registrant;
use filings_indexer::{FilingRecord, Period, RecordCollection};

/// All filings of one registrant within a period, in collection order.
///
/// The period test is a plain substring check of the period token (the year)
/// against `date_filed`; dates are not parsed, so a date string that carries
/// the same digits elsewhere also matches.
pub fn filings_for<'a>(
    records: &'a RecordCollection,
    registrant_id: &str,
    period: &Period,
) -> Vec<&'a FilingRecord> {
    if records.is_empty() {
        return Vec::new();
    }

    let token = period.token();
    records
        .iter()
        .filter(|record| same_registrant(registrant_id, &record.registrant_id))
        .filter(|record| record.date_filed.contains(&token))
        .collect()
}
