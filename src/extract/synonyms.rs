//! Hand-maintained corrections that the spec markup does not express.

use crate::model::{RefMap, Role};

/// `none` is a synonym of `presentation` in ARIA 1.1, but the spec only
/// lists `structure` as its superclass. Record `presentation` as a parent so
/// inheritance queries treat them alike.
pub fn link_none_to_presentation(roles: &mut RefMap<Role>, base_url: &str) {
    let presentation = format!("{}#presentation", base_url);
    let none = format!("{}#none", base_url);

    let Some(presentation_ref) = roles.get(&presentation).map(|r| r.reference.clone()) else {
        return;
    };
    if let Some(role) = roles.get_mut(&none) {
        if !role.super_class_roles.contains(&presentation_ref) {
            role.super_class_roles.push(presentation_ref);
        }
    }
}
