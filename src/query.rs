use crate::error::ExtractError;
use crate::model::{AriaData, Role};

pub fn find_role_by_name<'d>(data: &'d AriaData, name: &str) -> Option<&'d Role> {
    data.roles.values().find(|role| role.name == name)
}

/// Own attributes followed by each superclass's inherited attributes, in
/// `superClassRoles` order. Duplicates reachable over several paths are kept.
pub fn inherited_attributes(data: &AriaData, role_ref: &str) -> Result<Vec<String>, ExtractError> {
    let mut out = Vec::new();
    let mut stack = Vec::new();
    collect(data, role_ref, &mut stack, &mut out)?;
    Ok(out)
}

fn collect<'d>(
    data: &'d AriaData,
    reference: &'d str,
    stack: &mut Vec<&'d str>,
    out: &mut Vec<String>,
) -> Result<(), ExtractError> {
    if stack.contains(&reference) {
        return Err(ExtractError::InheritanceCycle {
            reference: reference.to_string(),
        });
    }
    let role = data
        .roles
        .get(reference)
        .ok_or_else(|| ExtractError::UnknownRole(reference.to_string()))?;

    out.extend(role.attributes.iter().cloned());
    stack.push(reference);
    for parent in &role.super_class_roles {
        collect(data, parent, stack, out)?;
    }
    stack.pop();
    Ok(())
}

/// Attribute names for `refs`; unknown references are passed through as-is.
pub fn attribute_names(data: &AriaData, refs: &[String]) -> Vec<String> {
    refs.iter()
        .map(|r| {
            data.attributes
                .get(r)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| r.clone())
        })
        .collect()
}
