use std::collections::BTreeMap;

use serde::Serialize;

use crate::extract::Dialect;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw bytes of one source, tagged with the dialect used to read it.
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub label: String,
    pub dialect: Dialect,
    pub bytes: Vec<u8>,
}

/// Pre-loaded sources. `vendors` is already in priority order.
#[derive(Debug, Clone)]
pub struct MergeInput {
    pub canonical: SourceInput,
    pub vendors: Vec<SourceInput>,
}

// ---------------------------------------------------------------------------
// Records + groups
// ---------------------------------------------------------------------------

/// One declaration pulled out of a source line.
///
/// The canonical terminator is consumed by the extractor, so every record
/// that reaches the grouper carries a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Every alias recorded for one identifier, in first-seen order.
///
/// `names[i]` pairs with `descriptions[i]`. A `None` name marks a slot
/// suppressed as a duplicate; its description is then `None` too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentifierGroup {
    names: Vec<Option<String>>,
    descriptions: Vec<Option<String>>,
}

impl IdentifierGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: String, description: Option<String>) {
        self.names.push(Some(name));
        self.descriptions.push(description);
    }

    /// Number of alias slots, suppressed ones included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    pub fn descriptions(&self) -> &[Option<String>] {
        &self.descriptions
    }

    /// Null out slot `index`, name and description alike.
    pub(crate) fn suppress(&mut self, index: usize) {
        self.names[index] = None;
        self.descriptions[index] = None;
    }

    /// Surviving aliases joined with `.`.
    pub fn joined_name(&self) -> String {
        let names: Vec<&str> = self.names.iter().flatten().map(String::as_str).collect();
        names.join(".")
    }

    /// Surviving non-empty descriptions joined with ` | `, or `None` if there are none.
    pub fn joined_description(&self) -> Option<String> {
        let descriptions: Vec<&str> = self
            .names
            .iter()
            .zip(&self.descriptions)
            .filter(|(name, _)| name.is_some())
            .filter_map(|(_, desc)| desc.as_deref())
            .filter(|desc| !desc.is_empty())
            .collect();
        if descriptions.is_empty() {
            None
        } else {
            Some(descriptions.join(" | "))
        }
    }
}

/// Identifier → group. Iteration is always ascending by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Table {
    groups: BTreeMap<i64, IdentifierGroup>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&IdentifierGroup> {
        self.groups.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.groups.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &IdentifierGroup)> {
        self.groups.iter().map(|(id, group)| (*id, group))
    }

    /// Total alias slots across all groups.
    pub fn slot_count(&self) -> usize {
        self.groups.values().map(IdentifierGroup::len).sum()
    }

    /// Append a record to its identifier's group, creating the group on first sight.
    pub fn push_record(&mut self, record: RawRecord) {
        self.groups
            .entry(record.id)
            .or_default()
            .push(record.name, record.description);
    }

    pub(crate) fn groups_mut(&mut self) -> &mut BTreeMap<i64, IdentifierGroup> {
        &mut self.groups
    }

    pub(crate) fn into_groups(self) -> BTreeMap<i64, IdentifierGroup> {
        self.groups
    }
}

impl FromIterator<RawRecord> for Table {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        let mut table = Table::new();
        for record in iter {
            table.push_record(record);
        }
        table
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Per-source counters for one pass through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub label: String,
    pub dialect: Dialect,
    pub records: usize,
    pub groups: usize,
    pub suppressed: usize,
    pub adopted: usize,
    pub discarded: usize,
    pub lossy_decode: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub canonical: SourceReport,
    pub vendors: Vec<SourceReport>,
    pub total_groups: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Grouped,
    Deduplicated,
    Merged,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grouped => write!(f, "grouped"),
            Self::Deduplicated => write!(f, "deduplicated"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Copy of a table at one point of the pipeline, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct StageSnapshot {
    pub label: String,
    pub stage: Stage,
    pub table: Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeResult {
    pub table: Table,
    pub summary: MergeSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageSnapshot>,
}
