//! Slug tokens for composite node ids.

/// Sentinel used when a label has no usable characters, and as the default
/// for absent string fields.
pub const UNKNOWN: &str = "unknown";

/// Normalize free text into a slug: lowercase `[a-z0-9]` runs joined by single
/// hyphens, no leading/trailing hyphen.
///
/// Total and idempotent. Inputs with nothing to keep (`""`, `"   "`, `"@@@"`)
/// map to [`UNKNOWN`].
pub fn slugify(s: &str) -> String {
    let lowered = s.trim().to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if out.is_empty() {
        UNKNOWN.to_string()
    } else {
        out
    }
}
