//! Event category filter

use crate::schema::EventRecord;

/// Select the records whose root code matches the target category
///
/// A stable filter: relative input ordering is preserved, and a code
/// matching no records yields an empty collection rather than an error.
pub fn filter_by_root_code(records: &[EventRecord], code: &str) -> Vec<EventRecord> {
    records
        .iter()
        .filter(|record| record.event_root_code == code)
        .cloned()
        .collect()
}
