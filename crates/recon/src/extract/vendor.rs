use std::iter::Enumerate;
use std::str::Lines;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ReconError;
use crate::model::RawRecord;

use super::literal::parse_int_literal;
use super::Dialect;

//     en_NV_Item_Foo = 0x7530,
//     /* NV */ NV_ID_BAR = 12,
const ASSIGN_LOOSE: &str = r"(?i)^\s*/*\**\s*([^\s]*NV[^\s]+)\s*=\s*([0-9a-fx]+).*$";

//     /* 8494  */      en_NV_Item_OPERLOCK_PLMN_INFO_WHITE = 8494,
const ASSIGN: &str = r"(?i)^\s*(/\*.*\*/)?\s*([^\s]*NV[^\s]+)\s*=\s*([0-9a-fx]+).*$";

//     /* 8267  */      en_NV_Item_CustomizeSimLockPlmnInfo = GU_PS_NV_ID_MIN + 74,
const LEADING_COMMENT_ID: &str = r"(?i)^\s*/\*\s*([0-9a-fx]+)\s*\*/\s*([^\s]*NV[^\s,=]+).*$";

//     en_NV_WB_HandSet1,                                 /* 30038 */
const TRAILING_COMMENT_ID: &str =
    r"(?i)^\s*(/\*.*\*/)?\s*([^\s]*NV[^\s,=]+)\s*,\s*/\*\s*([0-9a-fx]+)\s*\*/.*$";

/// A compiled line pattern plus the capture groups holding the name and
/// the identifier literal.
pub(crate) struct LinePattern {
    regex: Regex,
    name_group: usize,
    id_group: usize,
}

impl LinePattern {
    fn new(pattern: &str, name_group: usize, id_group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("vendor line pattern must compile"),
            name_group,
            id_group,
        }
    }

    /// `(name, literal)` if the whole line matches.
    fn capture<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = self.regex.captures(line)?;
        let name = caps.get(self.name_group)?.as_str();
        let literal = caps.get(self.id_group)?.as_str();
        Some((name, literal))
    }
}

static VENDOR_A: OnceLock<Vec<LinePattern>> = OnceLock::new();
static VENDOR_B: OnceLock<Vec<LinePattern>> = OnceLock::new();
static VENDOR_C: OnceLock<Vec<LinePattern>> = OnceLock::new();

/// Patterns tried in order for `dialect`; the first match wins.
pub(crate) fn patterns_for(dialect: Dialect) -> &'static [LinePattern] {
    match dialect {
        Dialect::Canonical => &[],
        Dialect::VendorA => VENDOR_A.get_or_init(|| vec![LinePattern::new(ASSIGN_LOOSE, 1, 2)]),
        Dialect::VendorB => VENDOR_B.get_or_init(|| {
            vec![
                LinePattern::new(ASSIGN, 2, 3),
                LinePattern::new(LEADING_COMMENT_ID, 2, 1),
            ]
        }),
        Dialect::VendorC => VENDOR_C.get_or_init(|| {
            vec![
                LinePattern::new(ASSIGN, 2, 3),
                LinePattern::new(TRAILING_COMMENT_ID, 2, 3),
            ]
        }),
    }
}

/// Records from a vendor header. Lines matching no pattern are skipped;
/// this stream never yields an error.
pub struct VendorRecords<'a> {
    label: &'a str,
    patterns: &'static [LinePattern],
    lines: Enumerate<Lines<'a>>,
}

impl<'a> VendorRecords<'a> {
    pub fn new(dialect: Dialect, label: &'a str, text: &'a str) -> Self {
        Self {
            label,
            patterns: patterns_for(dialect),
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for VendorRecords<'_> {
    type Item = Result<RawRecord, ReconError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw_line) in self.lines.by_ref() {
            let line = raw_line.trim();

            let Some((name, literal)) = self.patterns.iter().find_map(|p| p.capture(line)) else {
                continue;
            };

            match parse_int_literal(literal) {
                Some(id) => {
                    return Some(Ok(RawRecord {
                        id,
                        name: name.to_string(),
                        description: None,
                    }))
                }
                None => {
                    log::debug!(
                        "{}:{}: skipping {name}: '{literal}' is not an integer literal",
                        self.label,
                        idx + 1
                    );
                }
            }
        }

        None
    }
}
