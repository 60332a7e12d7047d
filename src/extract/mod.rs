pub mod attributes;
pub mod index;
pub mod roles;
pub mod synonyms;
pub mod value_types;

use crate::diagnostics::Diagnostics;
use crate::document::{Document, Node};
use crate::error::ExtractError;
use crate::model::AriaData;

/// Roles → synonym fix-up → value types → attributes, one pass over `doc`.
pub fn extract_all<D: Document>(doc: &D, diag: &Diagnostics) -> Result<AriaData, ExtractError> {
    let mut roles = roles::extract(doc, diag)?;
    synonyms::link_none_to_presentation(&mut roles, doc.base_url());
    let value_types = value_types::extract(doc, diag)?;
    let attributes = attributes::extract(doc, diag)?;

    Ok(AriaData {
        roles,
        value_types,
        attributes,
    })
}

/// Nodes matching `criterion` paired with their reference, in document order.
/// Nodes without an `id` cannot be referenced and are skipped.
fn discover<'a, D: Document>(
    doc: &'a D,
    criterion: &str,
    kind: &str,
    diag: &Diagnostics,
) -> Result<Vec<(String, D::Element<'a>)>, ExtractError> {
    let mut found = Vec::new();
    for node in doc.select_all(criterion)? {
        match node.id().filter(|id| !id.is_empty()) {
            Some(id) => found.push((doc.reference(id), node)),
            None => diag.degraded(format!(
                "{} node without id skipped: \"{}\"",
                kind,
                truncate(&node.text(), 40)
            )),
        }
    }
    Ok(found)
}

/// Text of the first match, `None` when absent or blank.
fn first_text<'a, N: Node<'a>>(node: &N, criterion: &str) -> Result<Option<String>, ExtractError> {
    Ok(node
        .select_first(criterion)?
        .map(|n| n.text())
        .filter(|t| !t.is_empty()))
}

fn hrefs<'a, N: Node<'a>>(node: &N, criterion: &str) -> Result<Vec<String>, ExtractError> {
    Ok(node
        .select_all(criterion)?
        .iter()
        .filter_map(|n| n.href())
        .collect())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
