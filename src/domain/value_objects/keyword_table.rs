//! Keyword table - translates keyword identifiers into symbolic names

use std::collections::HashMap;

use super::FormKey;

/// Mapping from keyword identifier to the symbolic name carried on NPC
/// snapshots.
///
/// NPC records store keywords as resolved names, while filter criteria refer
/// to them by identifier; this table bridges the two namespaces. It is built
/// once from the loaded snapshot and consulted once per resolution pass.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    names: HashMap<FormKey, String>,
}

impl KeywordTable {
    pub fn new(names: HashMap<FormKey, String>) -> Self {
        Self { names }
    }

    /// The symbolic name for a keyword identifier, if the keyword exists in
    /// the loaded universe.
    pub fn name_of(&self, key: &FormKey) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(FormKey, String)> for KeywordTable {
    fn from_iter<I: IntoIterator<Item = (FormKey, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
