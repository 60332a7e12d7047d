use std::collections::HashMap;

use crate::document::{Document, Node};
use crate::error::ExtractError;

pub const ROLE_INDEX: &str = "#index_role dt a";
pub const STATE_PROP_INDEX: &str = "#index_state_prop dt a";

/// Glossary lookup: link target → text of the `dd` following the link's `dt`.
pub struct DescriptionIndex {
    entries: HashMap<String, Option<String>>,
}

impl DescriptionIndex {
    pub fn build<D: Document>(doc: &D, criterion: &str) -> Result<Self, ExtractError> {
        let mut entries = HashMap::new();
        for link in doc.select_all(criterion)? {
            let Some(target) = link.href() else {
                continue;
            };
            let text = link
                .parent_element()
                .and_then(|dt| dt.next_element_sibling())
                .map(|dd| dd.text())
                .filter(|t| !t.is_empty());
            // first entry wins, like a linear find
            entries.entry(target).or_insert(text);
        }
        Ok(DescriptionIndex { entries })
    }

    /// `None` when the index has no usable entry for `reference`.
    pub fn describe(&self, reference: &str) -> Option<String> {
        self.entries.get(reference).cloned().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
