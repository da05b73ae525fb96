//! Configuration options for layout validation.

use serde::{Deserialize, Serialize};

/// Options controlling which rules [`crate::validate_with`] enforces.
///
/// Missing keys take their default when loaded from JSON, so a partial
/// options file such as `{"reject_unknown_classes": true}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Whether siblings (displays in one list, panels, saved views) must
    /// have distinct names.
    pub require_unique_names: bool,

    /// Whether displays whose class has no schema are reported.
    pub reject_unknown_classes: bool,

    /// Whether paired lower/upper bounds (intensity, value) must be ordered.
    pub check_bounds_order: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_unique_names: true,
            reject_unknown_classes: false,
            check_bounds_order: true,
        }
    }
}

impl ValidationOptions {
    /// Enables every rule.
    pub fn strict() -> Self {
        Self {
            reject_unknown_classes: true,
            ..Self::default()
        }
    }
}
