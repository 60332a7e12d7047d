use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from reference (`{base}#{id}`) to entity, in document order.
pub type RefMap<T> = IndexMap<String, T>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub super_class_roles: Vec<String>,
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueType {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub description: Option<String>,
    pub value_type: String,
    /// `None` when the spec has no value table for this attribute.
    /// Kept distinct from `Some(vec![])`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<AttributeValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    pub value: String,
    pub is_default: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaData {
    pub roles: RefMap<Role>,
    pub value_types: RefMap<ValueType>,
    pub attributes: RefMap<Attribute>,
}

impl AriaData {
    pub fn summary(&self) -> String {
        format!(
            "{} roles, {} value types, {} attributes",
            self.roles.len(),
            self.value_types.len(),
            self.attributes.len()
        )
    }
}
