use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::types::TypeInfo;

/// Validate internal consistency of a type descriptor.
///
/// This checks:
/// - the simple name is not empty
/// - the type does not list itself as an ancestor
/// - no ancestor appears twice in the chain
pub fn validate_type_info(info: &TypeInfo) -> Result<()> {
    if info.simple_name().trim().is_empty() {
        return Err(Error::InvalidType(format!(
            "type '{}' has an empty simple name",
            info.key()
        )));
    }

    let mut seen = HashSet::new();
    for ancestor in info.ancestors() {
        if ancestor == info.key() {
            return Err(Error::InvalidType(format!(
                "type '{}' lists itself as an ancestor",
                info.key()
            )));
        }
        if !seen.insert(ancestor) {
            return Err(Error::InvalidType(format!(
                "type '{}' lists ancestor '{}' more than once",
                info.key(),
                ancestor
            )));
        }
    }

    Ok(())
}
