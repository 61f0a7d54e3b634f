//! Pack namespaces and download file names.

/// Maximum length of a namespace derived from a display name.
const DERIVED_ID_LENGTH: usize = 60;

/// Derive a mod id / namespace from a pack's display name.
///
/// The name is lowercased, any leading run of non-letters is dropped, and
/// each run of characters outside `[a-z0-9_]` becomes a single `_`. The
/// result is truncated to 60 characters. A name with no letters produces an
/// empty string, which callers must replace with their own fallback.
pub fn make_mod_id(name: &str) -> String {
    let lower = name.to_lowercase();
    let trimmed = lower.trim_start_matches(|c: char| !c.is_ascii_lowercase());
    collapse_runs(trimmed, |c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_', '_')
        .chars()
        .take(DERIVED_ID_LENGTH)
        .collect()
}

/// Check a namespace matches `[a-z][a-z0-9_]{3,63}`.
pub fn is_valid_namespace(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let rest = chars.as_str();
    first.is_ascii_lowercase()
        && (3..=63).contains(&rest.len())
        && rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Get the base file name (without extension) for a downloaded pack.
///
/// Each run of characters outside `[A-Za-z0-9_-]` becomes a `-`, then the
/// whole name is lowercased.
pub fn pack_file_name(name: &str) -> String {
    collapse_runs(name, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-', '-').to_lowercase()
}

/// Replace each maximal run of characters failing `keep` with `replacement`.
fn collapse_runs(input: &str, keep: impl Fn(char) -> bool, replacement: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if keep(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(replacement);
            in_run = true;
        }
    }
    out
}
