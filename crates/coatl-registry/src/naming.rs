//! Collision resolution
//!
//! Names are resolved by linear numeric suffixing: `g`, then `g0`, `g1`, ...
//! The first candidate that is not taken wins.

use crate::error::RegistryError;

/// Names starting with this prefix are reserved for registry bookkeeping
pub const RESERVED_PREFIX: &str = "__";

/// Reject names a registry can never hold
///
/// # Errors
/// Returns `RegistryError::InvalidName` for the empty string or a name that
/// starts with [`RESERVED_PREFIX`]
pub fn check_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::InvalidName {
            name: String::new(),
            reason: "name cannot be empty",
        });
    }
    if name.starts_with(RESERVED_PREFIX) {
        return Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason: "name uses the reserved prefix",
        });
    }
    Ok(())
}

/// Closest free name to `requested`
///
/// Tries `requested` itself, then `requested` followed by `0`, `1`, `2`...
/// and returns the first candidate for which `is_taken` is false.
#[must_use]
pub fn resolve_name(requested: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(requested) {
        return requested.to_string();
    }
    let mut suffix: u64 = 0;
    loop {
        let candidate = format!("{requested}{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
