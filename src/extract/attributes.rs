use tracing::debug;

use super::index::{DescriptionIndex, STATE_PROP_INDEX};
use super::{discover, first_text};
use crate::diagnostics::Diagnostics;
use crate::document::{Document, Node};
use crate::error::ExtractError;
use crate::model::{Attribute, AttributeValue, RefMap};

const ATTRIBUTE_NODES: &str = ".property, .state";
const ATTRIBUTE_NAME: &str = ".property-name code, .state-name code";
const VALUE_TYPE_LINK: &str = ".property-value a, .state-value a";
const VALUE_ROWS: &str = ".value-descriptions tbody tr";
const VALUE_NAME: &str = ".value-name";
const VALUE_DESCRIPTION: &str = ".value-description";

const DEFAULT_MARKER: &str = "(default)";
const DEFAULT_SUFFIX: &str = " (default)";

pub fn extract<D: Document>(
    doc: &D,
    diag: &Diagnostics,
) -> Result<RefMap<Attribute>, ExtractError> {
    let index = DescriptionIndex::build(doc, STATE_PROP_INDEX)?;
    debug!("state/property index: {} entries", index.len());
    let mut attributes = RefMap::new();

    for (reference, node) in discover(doc, ATTRIBUTE_NODES, "attr", diag)? {
        let name = first_text(&node, ATTRIBUTE_NAME)?.ok_or_else(|| ExtractError::MissingName {
            kind: "attr",
            reference: reference.clone(),
        })?;

        let description = index.describe(&reference);
        if description.is_none() {
            diag.degraded(format!("attr.description could not be found for \"{}\"", reference));
        }

        let value_type = node
            .select_first(VALUE_TYPE_LINK)?
            .and_then(|link| link.href())
            .ok_or_else(|| ExtractError::MissingValueType {
                reference: reference.clone(),
            })?;

        let values = enumerated_values(&node, &reference, diag)?;

        attributes.insert(
            reference.clone(),
            Attribute {
                reference,
                name,
                description,
                value_type,
                values,
            },
        );
    }

    Ok(attributes)
}

/// `None` when the attribute has no value table at all.
fn enumerated_values<'a, N: Node<'a>>(
    node: &N,
    reference: &str,
    diag: &Diagnostics,
) -> Result<Option<Vec<AttributeValue>>, ExtractError> {
    let rows = node.select_all(VALUE_ROWS)?;
    if rows.is_empty() {
        diag.degraded(format!("attr.values could not be found for \"{}\"", reference));
        return Ok(None);
    }

    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(raw) = first_text(&row, VALUE_NAME)? else {
            diag.degraded(format!("attr.values row without a value name in \"{}\"", reference));
            continue;
        };
        let (value, is_default) = parse_value_name(&raw);
        values.push(AttributeValue {
            value,
            is_default,
            description: first_text(&row, VALUE_DESCRIPTION)?,
        });
    }
    Ok(Some(values))
}

/// `"true (default)"` → `("true", true)`, `"false"` → `("false", false)`.
///
/// Only a trailing ` (default)` is stripped from the value, but the marker
/// anywhere in the cell flags it as the default.
pub fn parse_value_name(raw: &str) -> (String, bool) {
    let value = raw.strip_suffix(DEFAULT_SUFFIX).unwrap_or(raw);
    (value.to_string(), raw.contains(DEFAULT_MARKER))
}
