//! Quick-result token — a comma-separated list of role numbers.
//!
//! Only the ranking is shared, not the scores, so the token stays short
//! enough to read aloud.

use crate::catalog::{Catalog, Role};

/// Join role numbers into a token such as `"12,3,7"`.
pub fn encode_quick_token(role_numbers: &[u32]) -> String {
    role_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a token back into role numbers, dropping blank or non-numeric items.
pub fn decode_quick_token(token: &str) -> Vec<u32> {
    token
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .collect()
}

/// Resolve role numbers against the catalog, keeping order and dropping
/// numbers the catalog no longer knows.
pub fn resolve_quick_roles<'a>(catalog: &'a Catalog, role_numbers: &[u32]) -> Vec<&'a Role> {
    role_numbers
        .iter()
        .filter_map(|n| catalog.role_by_number(*n))
        .collect()
}
