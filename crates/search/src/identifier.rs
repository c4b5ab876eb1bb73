/// Canonical form of a registrant identifier used on both sides of a comparison.
///
/// Surrounding whitespace and leading zeros are dropped; an all-zero identifier
/// becomes `"0"`. Stored records are never rewritten, only compared through this.
pub fn normalize_registrant_id(raw: &str) -> &str {
    let trimmed = raw.trim();
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() && !trimmed.is_empty() {
        "0"
    } else {
        stripped
    }
}

/// Identifier equality under [`normalize_registrant_id`]; blank ids never match
pub fn same_registrant(a: &str, b: &str) -> bool {
    let a = normalize_registrant_id(a);
    !a.is_empty() && a == normalize_registrant_id(b)
}
