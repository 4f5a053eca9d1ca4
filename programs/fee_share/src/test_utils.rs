//! Shared helpers for unit tests.

use anchor_lang::error::Error;

/// Anchor error code carried by `err`.
pub fn code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => panic!("unexpected program error: {e:?}"),
    }
}
