//! Field shapes exchanged with the schema provider and the presentation layer.

use serde::{Deserialize, Serialize};

use crate::DisplayType;

/// Field exactly as the schema provider returns it.
///
/// `reference_to` and `relationship_name` are expected to be present together;
/// [`Field::from_raw`] enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub api_name: String,
    pub label: String,
    pub r#type: DisplayType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,
}

/// Target of a lookup field: the referenced object and the child-to-parent
/// relationship name used to address it in a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupTarget {
    pub reference_to: String,
    pub relationship_name: String,
}

/// Reason a raw field could not be turned into a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShapeError {
    /// Only one of `referenceTo` / `relationshipName` was supplied.
    HalfLookup { api_name: String },
}

impl std::fmt::Display for FieldShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldShapeError::HalfLookup { api_name } => {
                write!(f, "field '{api_name}' has only one of referenceTo/relationshipName")
            }
        }
    }
}

impl std::error::Error for FieldShapeError {}

/// A field ready for display, with its icon resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub api_name: String,
    pub label: String,
    pub r#type: DisplayType,
    #[serde(flatten)]
    pub lookup: Option<LookupTarget>,
    pub icon: String,
}

impl Field {
    /// Builds a regular (non-lookup) field.
    pub fn regular(api_name: impl Into<String>, label: impl Into<String>, r#type: DisplayType) -> Self {
        let icon = r#type.icon().to_string();
        Self {
            api_name: api_name.into(),
            label: label.into(),
            r#type,
            lookup: None,
            icon,
        }
    }

    /// Builds a lookup field pointing at `reference_to` through `relationship_name`.
    pub fn lookup(
        api_name: impl Into<String>,
        label: impl Into<String>,
        reference_to: impl Into<String>,
        relationship_name: impl Into<String>,
    ) -> Self {
        let mut field = Self::regular(api_name, label, DisplayType::Reference);
        field.lookup = Some(LookupTarget {
            reference_to: reference_to.into(),
            relationship_name: relationship_name.into(),
        });
        field
    }

    pub fn from_raw(raw: RawField) -> Result<Self, FieldShapeError> {
        let lookup = match (raw.reference_to, raw.relationship_name) {
            (Some(reference_to), Some(relationship_name)) => Some(LookupTarget {
                reference_to,
                relationship_name,
            }),
            (None, None) => None,
            _ => return Err(FieldShapeError::HalfLookup { api_name: raw.api_name }),
        };
        let icon = raw.r#type.icon().to_string();
        Ok(Self {
            api_name: raw.api_name,
            label: raw.label,
            r#type: raw.r#type,
            lookup,
            icon,
        })
    }

    pub fn is_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    pub fn reference_to(&self) -> Option<&str> {
        self.lookup.as_ref().map(|target| target.reference_to.as_str())
    }

    pub fn relationship_name(&self) -> Option<&str> {
        self.lookup.as_ref().map(|target| target.relationship_name.as_str())
    }
}

/// One hop in the navigation history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupStackEntry {
    pub relationship_name: String,
    pub object_api_name: String,
}

impl LookupStackEntry {
    pub fn new(relationship_name: impl Into<String>, object_api_name: impl Into<String>) -> Self {
        Self {
            relationship_name: relationship_name.into(),
            object_api_name: object_api_name.into(),
        }
    }
}

impl From<&LookupTarget> for LookupStackEntry {
    fn from(target: &LookupTarget) -> Self {
        Self {
            relationship_name: target.relationship_name.clone(),
            object_api_name: target.reference_to.clone(),
        }
    }
}

/// A selected field plus the dotted relationship path that addresses it from
/// the base object (for example `Parent__r.Owner.Email`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedField {
    #[serde(flatten)]
    pub field: Field,
    pub relationship_path: String,
}

/// Filter menu entry for one display type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub label: String,
    pub value: DisplayType,
    pub icon: String,
    pub is_disabled: bool,
    pub is_selected: bool,
}

impl FilterOption {
    /// Unselected, enabled option for `value`.
    pub fn for_type(value: &DisplayType) -> Self {
        Self {
            label: value.filter_label(),
            value: value.clone(),
            icon: value.icon().to_string(),
            is_disabled: false,
            is_selected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_lookup_field_converts_with_target() {
        let raw: RawField = serde_json::from_value(json!({
            "apiName": "OwnerId",
            "label": "Owner ID",
            "type": "REFERENCE",
            "referenceTo": "User",
            "relationshipName": "Owner"
        }))
        .expect("raw field");
        let field = Field::from_raw(raw).expect("field");
        assert_eq!(field.reference_to(), Some("User"));
        assert_eq!(field.relationship_name(), Some("Owner"));
        assert_eq!(field.icon, "utility:record_lookup");
    }

    #[test]
    fn half_lookup_is_rejected() {
        let raw = RawField {
            api_name: "Broken__c".into(),
            label: "Broken".into(),
            r#type: DisplayType::Reference,
            reference_to: Some("Account".into()),
            relationship_name: None,
        };
        assert_eq!(
            Field::from_raw(raw),
            Err(FieldShapeError::HalfLookup {
                api_name: "Broken__c".into()
            })
        );
    }

    #[test]
    fn selected_field_serializes_flat() {
        let selected = SelectedField {
            field: Field::regular("Email", "Email", DisplayType::Email),
            relationship_path: "Owner.Email".into(),
        };
        let value = serde_json::to_value(&selected).expect("encode");
        assert_eq!(value["apiName"], "Email");
        assert_eq!(value["type"], "EMAIL");
        assert_eq!(value["relationshipPath"], "Owner.Email");
        assert!(value.get("referenceTo").is_none());
    }
}
