use std::iter::Enumerate;
use std::str::Lines;

use crate::error::ReconError;
use crate::model::RawRecord;

use super::literal::{decode_c_literal, parse_int_literal};

/// Line that opens the declaration block in the canonical source.
pub const DEFAULT_MARKER: &str = "struct nvdesc nvid[] = {";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    InList,
}

enum Entry {
    Record(RawRecord),
    Terminator,
}

/// Records from the canonical block, in source order.
///
/// Yields at most one error, after which the stream is exhausted.
pub struct CanonicalRecords<'a> {
    label: &'a str,
    marker: &'a str,
    lines: Enumerate<Lines<'a>>,
    state: State,
    failed: bool,
}

impl<'a> CanonicalRecords<'a> {
    pub fn new(label: &'a str, text: &'a str, marker: &'a str) -> Self {
        Self {
            label,
            marker,
            lines: text.lines().enumerate(),
            state: State::Scanning,
            failed: false,
        }
    }
}

impl Iterator for CanonicalRecords<'_> {
    type Item = Result<RawRecord, ReconError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for (idx, raw_line) in self.lines.by_ref() {
            let line = raw_line.trim();

            if line.contains(self.marker) {
                self.state = State::InList;
                continue;
            }
            if self.state == State::Scanning {
                continue;
            }

            match parse_entry(line) {
                Ok(Entry::Record(record)) => return Some(Ok(record)),
                Ok(Entry::Terminator) => self.state = State::Scanning,
                Err(reason) => {
                    self.failed = true;
                    return Some(Err(ReconError::structural(self.label, idx + 1, raw_line, reason)));
                }
            }
        }

        None
    }
}

/// Parse one `{id, name, desc},` line from inside the block.
fn parse_entry(line: &str) -> Result<Entry, String> {
    let body = line
        .trim_start_matches('{')
        .trim_end_matches(',')
        .trim_end_matches('}');

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let [id, name, description] = parts.as_slice() else {
        return Err(format!("expected 3 components, found {}", parts.len()));
    };

    let id = parse_int_literal(id).ok_or_else(|| format!("invalid identifier '{id}'"))?;
    let name = decode_c_literal(name);
    let description = decode_c_literal(description);

    match name {
        None if id == 0 && description.is_none() => Ok(Entry::Terminator),
        Some(name) if !name.is_empty() => Ok(Entry::Record(RawRecord { id, name, description })),
        _ => Err("entry must have a name".into()),
    }
}
