use tracing::debug;

use super::index::{DescriptionIndex, ROLE_INDEX};
use super::{discover, first_text, hrefs};
use crate::diagnostics::Diagnostics;
use crate::document::{Document, Node};
use crate::error::ExtractError;
use crate::model::{RefMap, Role};

const ROLE_NODES: &str = ".role";
const ROLE_NAME: &str = ".role-name code";
const ROLE_ABSTRACT: &str = ".role-abstract";
const ROLE_PARENTS: &str = ".role-parent .role-reference";
const ROLE_ATTRIBUTES: &str =
    ".role-properties .state-reference, .role-properties .property-reference";

const ABSTRACT_MARKER: &str = "True";

pub fn extract<D: Document>(doc: &D, diag: &Diagnostics) -> Result<RefMap<Role>, ExtractError> {
    let index = DescriptionIndex::build(doc, ROLE_INDEX)?;
    debug!("role index: {} entries", index.len());
    let mut roles = RefMap::new();

    for (reference, node) in discover(doc, ROLE_NODES, "role", diag)? {
        let name = first_text(&node, ROLE_NAME)?.ok_or_else(|| ExtractError::MissingName {
            kind: "role",
            reference: reference.clone(),
        })?;

        let description = index.describe(&reference);
        if description.is_none() {
            diag.degraded(format!("role.description could not be found for \"{}\"", reference));
        }

        let is_abstract = match node.select_first(ROLE_ABSTRACT)? {
            Some(cell) => cell.text().contains(ABSTRACT_MARKER),
            None => {
                diag.degraded(format!("role.abstract could not be found for \"{}\"", reference));
                false
            }
        };

        let super_class_roles = hrefs(&node, ROLE_PARENTS)?;
        if super_class_roles.is_empty() {
            diag.degraded(format!(
                "role.superClassRoles could not be found for \"{}\"",
                reference
            ));
        }

        let attributes = hrefs(&node, ROLE_ATTRIBUTES)?;
        if attributes.is_empty() {
            diag.degraded(format!("role.attributes could not be found for \"{}\"", reference));
        }

        roles.insert(
            reference.clone(),
            Role {
                reference,
                name,
                description,
                is_abstract,
                super_class_roles,
                attributes,
            },
        );
    }

    Ok(roles)
}
