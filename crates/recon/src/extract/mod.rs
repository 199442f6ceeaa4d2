//! Line extractors: turn source text into [`RawRecord`]s.
//!
//! One canonical dialect (a delimited block of `{id, "name", "desc"},`
//! triples) and three vendor dialects (enum/define headers matched line by
//! line against an ordered set of patterns).

mod canonical;
mod literal;
mod vendor;

use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::model::RawRecord;

pub use canonical::{CanonicalRecords, DEFAULT_MARKER};
pub use literal::{decode_c_literal, parse_int_literal};
pub use vendor::VendorRecords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `{id, "name", "desc"},` triples inside the marker-opened block.
    Canonical,
    /// `NAME = literal`, optionally behind comment/indirection characters.
    VendorA,
    /// `NAME = literal`, falling back to `/* literal */ NAME`.
    VendorB,
    /// `NAME = literal`, falling back to `NAME, /* literal */`.
    VendorC,
}

impl Dialect {
    pub fn is_vendor(self) -> bool {
        !matches!(self, Self::Canonical)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canonical => write!(f, "canonical"),
            Self::VendorA => write!(f, "vendor_a"),
            Self::VendorB => write!(f, "vendor_b"),
            Self::VendorC => write!(f, "vendor_c"),
        }
    }
}

/// Lazy record stream for one source, dispatched on dialect.
pub enum Records<'a> {
    Canonical(CanonicalRecords<'a>),
    Vendor(VendorRecords<'a>),
}

impl Iterator for Records<'_> {
    type Item = Result<RawRecord, ReconError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Canonical(records) => records.next(),
            Self::Vendor(records) => records.next(),
        }
    }
}

/// Start extracting records from `text`.
///
/// `label` names the source in errors and logs. `marker` opens the canonical
/// declaration block and is ignored by the vendor dialects.
pub fn extract<'a>(dialect: Dialect, label: &'a str, text: &'a str, marker: &'a str) -> Records<'a> {
    match dialect {
        Dialect::Canonical => Records::Canonical(CanonicalRecords::new(label, text, marker)),
        vendor => Records::Vendor(VendorRecords::new(vendor, label, text)),
    }
}
