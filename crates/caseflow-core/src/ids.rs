//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{8 hex chars}`, e.g. `cas-a3f8b2c1`.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_CASE: &str = "cas";
pub const PREFIX_COMMENT: &str = "cmt";

/// Every prefix in use, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_PROJECT, PREFIX_CASE, PREFIX_COMMENT];

/// Returns `true` if `id` looks like `{prefix}-{8 hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
