//! Alias deduplication within each identifier group.

use crate::model::{IdentifierGroup, Table};

/// Suppress repeated aliases in every group. Returns the number of slots
/// newly suppressed; a second call always returns 0.
pub fn dedup_aliases(table: &mut Table) -> usize {
    table
        .groups_mut()
        .values_mut()
        .map(dedup_group)
        .sum()
}

/// Null every slot whose name already appeared in an earlier slot, along
/// with its description. The first occurrence keeps its description even
/// when a later one carries a different text.
pub fn dedup_group(group: &mut IdentifierGroup) -> usize {
    if group.len() < 2 {
        return 0;
    }

    let mut suppressed = 0;
    for i in 0..group.len() - 1 {
        let Some(name) = group.names()[i].clone() else {
            continue;
        };
        for j in i + 1..group.len() {
            if group.names()[j].as_deref() == Some(name.as_str()) {
                group.suppress(j);
                suppressed += 1;
            }
        }
    }
    suppressed
}
