use super::discover;
use crate::diagnostics::Diagnostics;
use crate::document::{Document, Node};
use crate::error::ExtractError;
use crate::model::{RefMap, ValueType};

const VALUE_TYPE_NODES: &str = "#propcharacteristic_value dt";

/// Each `dt` names a value type; the following `dd` describes it.
pub fn extract<D: Document>(
    doc: &D,
    diag: &Diagnostics,
) -> Result<RefMap<ValueType>, ExtractError> {
    let mut value_types = RefMap::new();

    for (reference, node) in discover(doc, VALUE_TYPE_NODES, "valueType", diag)? {
        let name = node.text();
        if name.is_empty() {
            return Err(ExtractError::MissingName {
                kind: "valueType",
                reference,
            });
        }

        let description = node
            .next_element_sibling()
            .map(|dd| dd.text())
            .filter(|t| !t.is_empty());
        if description.is_none() {
            diag.degraded(format!(
                "valueType.description could not be found for \"{}\"",
                reference
            ));
        }

        value_types.insert(
            reference.clone(),
            ValueType {
                reference,
                name,
                description,
            },
        );
    }

    Ok(value_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    const BASE: &str = "https://www.w3.org/TR/wai-aria-1.1/";

    #[test]
    fn reads_definition_list() {
        let html = r#"
            <dl id="propcharacteristic_value">
              <dt id="valuetype_true-false">true/false</dt>
              <dd>Value representing either true or false.</dd>
              <dt id="valuetype_idref">ID reference</dt>
            </dl>
            <dl><dt id="elsewhere">not a value type</dt></dl>
        "#;
        let doc = HtmlDocument::parse(html, BASE).unwrap();
        let diag = Diagnostics::new(false);
        let types = extract(&doc, &diag).unwrap();

        let keys: Vec<&String> = types.keys().collect();
        assert_eq!(
            keys,
            [
                &format!("{}#valuetype_true-false", BASE),
                &format!("{}#valuetype_idref", BASE)
            ]
        );
        let tf = &types[&format!("{}#valuetype_true-false", BASE)];
        assert_eq!(tf.name, "true/false");
        assert_eq!(tf.description.as_deref(), Some("Value representing either true or false."));
        assert_eq!(types[&format!("{}#valuetype_idref", BASE)].description, None);
        assert_eq!(diag.suppressed(), 1);
    }

    #[test]
    fn blank_name_is_fatal() {
        let html = r#"<dl id="propcharacteristic_value"><dt id="valuetype_x"> </dt><dd>x</dd></dl>"#;
        let doc = HtmlDocument::parse(html, BASE).unwrap();
        let err = extract(&doc, &Diagnostics::new(false)).unwrap_err();
        assert!(matches!(err, ExtractError::MissingName { kind: "valueType", .. }));
    }
}
