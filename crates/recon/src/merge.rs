//! Priority merge: fold a lower-priority table into the authoritative one.

use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::model::Table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Groups whose identifier was new and were taken whole.
    pub adopted: usize,
    /// Groups dropped because the identifier was already defined.
    pub discarded: usize,
}

/// Adopt every incoming group whose identifier is absent from
/// `authoritative`. Existing groups are never touched; there is no
/// field-level reconciliation.
pub fn merge_into(authoritative: &mut Table, incoming: Table) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    let groups = authoritative.groups_mut();

    for (id, group) in incoming.into_groups() {
        match groups.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(group);
                outcome.adopted += 1;
            }
            Entry::Occupied(_) => outcome.discarded += 1,
        }
    }

    outcome
}
