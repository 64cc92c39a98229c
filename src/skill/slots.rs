//! Slot extraction
//!
//! Flattens the platform's structured slots into name → value. Extraction
//! is total: every slot key survives, unfilled slots map to `None`.

use std::collections::HashMap;

use super::request::Intent;

/// Placeholder the platform sends for a slot it could not resolve
const UNRESOLVED: &str = "?";

/// Flat view of an intent's slots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slots {
    values: HashMap<String, Option<String>>,
}

impl Slots {
    /// Raw slot value as sent
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    /// Slot value, treating the unresolved placeholder and blanks as unfilled
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != UNRESOLVED)
    }

    /// Whether the slot key was present at all
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Slot names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for Slots {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Extract a flat slot mapping from an intent
pub fn extract_slots(intent: &Intent) -> Slots {
    intent
        .slots
        .iter()
        .map(|(name, slot)| (name.clone(), slot.value.clone()))
        .collect()
}
