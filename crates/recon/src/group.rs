//! Grouping: fold one source's record stream into a [`Table`].

use crate::error::ReconError;
use crate::model::{RawRecord, Table};

/// Group records by identifier, keeping every alias in first-seen order.
///
/// Nothing is dropped here. Stops at the first extraction error.
pub fn group_records<I>(records: I) -> Result<Table, ReconError>
where
    I: IntoIterator<Item = Result<RawRecord, ReconError>>,
{
    let mut table = Table::new();
    for record in records {
        table.push_record(record?);
    }
    Ok(table)
}
