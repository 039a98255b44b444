//! PIN validation.

/// Checks a candidate PIN against the stored code list.
///
/// The candidate is trimmed and compared against each stored value (also
/// trimmed): exact equality first, then case-insensitive. Blank stored
/// cells are skipped, so an empty candidate can never match. An empty list
/// always fails — there is no "open" mode.
///
/// Every call rescans the full list; no hashing, rate limiting, or lockout.
pub fn validate_pin(candidate: &str, codes: &[String]) -> bool {
    let candidate = candidate.trim();
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .any(|code| code == candidate || code.eq_ignore_ascii_case(candidate))
}
