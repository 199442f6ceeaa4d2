//! CLI Exit Code Registry
//!
//! Single source of truth for `nvtable` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                               |
//! |------|-------------------------------------------------------|
//! | 0    | Success                                               |
//! | 1    | General error (unspecified)                           |
//! | 2    | CLI usage error (bad args)                            |
//! | 3    | Canonical source has a malformed declaration line     |
//! | 4    | Merge config could not be parsed or is invalid        |
//! | 5    | A source could not be read or the output not written  |

use nvtable_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// A line inside the canonical declaration block did not parse.
pub const EXIT_MERGE_PARSE: u8 = 3;

/// TOML parse error or failed config validation.
pub const EXIT_MERGE_INVALID_CONFIG: u8 = 4;

/// Source unreadable, or output path unwritable.
pub const EXIT_MERGE_IO: u8 = 5;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::StructuralParse { .. } => EXIT_MERGE_PARSE,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_MERGE_INVALID_CONFIG,
        ReconError::Io(_) => EXIT_MERGE_IO,
    }
}
