//! Sort rules and the fixed sort menu catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key a field list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    /// Field label.
    Field,
    /// Field display type name.
    Type,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Field => "Field",
            SortBy::Type => "Type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A single `(key, direction)` ordering rule. Absence of a rule means "not sorted".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRule {
    pub sort_by: SortBy,
    pub dir: SortDirection,
}

impl SortRule {
    pub const fn new(sort_by: SortBy, dir: SortDirection) -> Self {
        Self { sort_by, dir }
    }

    /// Catalog identifier, e.g. `Field - ASC`.
    pub fn id(&self) -> String {
        format!("{} - {}", self.sort_by.as_str(), self.dir.as_str())
    }
}

/// Loosely typed sort value as supplied by configuration, validated against
/// [`SORT_OPTIONS`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortValueInput {
    pub sort_by: String,
    pub dir: String,
}

impl fmt::Display for SortValueInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"sortBy\":\"{}\",\"dir\":\"{}\"}}", self.sort_by, self.dir)
    }
}

/// Entry of the sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub value: Option<SortRule>,
}

/// Fixed sort menu in display order. The first entry is the "not sorted" default.
pub const SORT_OPTIONS: [SortOption; 5] = [
    SortOption {
        id: "Not Sorted",
        label: "Not Sorted",
        icon: "utility:sort",
        value: None,
    },
    SortOption {
        id: "Field - ASC",
        label: "Field - A to Z",
        icon: "utility:arrowup",
        value: Some(SortRule::new(SortBy::Field, SortDirection::Asc)),
    },
    SortOption {
        id: "Field - DESC",
        label: "Field - Z to A",
        icon: "utility:arrowdown",
        value: Some(SortRule::new(SortBy::Field, SortDirection::Desc)),
    },
    SortOption {
        id: "Type - ASC",
        label: "Type - A to Z",
        icon: "utility:arrowup",
        value: Some(SortRule::new(SortBy::Type, SortDirection::Asc)),
    },
    SortOption {
        id: "Type - DESC",
        label: "Type - Z to A",
        icon: "utility:arrowdown",
        value: Some(SortRule::new(SortBy::Type, SortDirection::Desc)),
    },
];

/// Looks up a catalog entry by id.
pub fn find_sort_option(id: &str) -> Option<&'static SortOption> {
    SORT_OPTIONS.iter().find(|option| option.id == id)
}

/// Matches a configuration value against the catalog.
///
/// Returns the validation message to surface when no catalog entry matches.
pub fn validate_sort_input(input: &SortValueInput) -> Result<SortRule, String> {
    SORT_OPTIONS
        .iter()
        .filter_map(|option| option.value)
        .find(|rule| rule.sort_by.as_str() == input.sort_by && rule.dir.as_str() == input.dir)
        .ok_or_else(|| {
            let allowed = SORT_OPTIONS
                .iter()
                .filter_map(|option| option.value)
                .map(|rule| format!("{{\"sortBy\":\"{}\",\"dir\":\"{}\"}}", rule.sort_by.as_str(), rule.dir.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Invalid initial sort \"{input}\". The value should be one of the following options: {allowed} or null")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_maps_back_to_its_catalog_entry() {
        for option in SORT_OPTIONS.iter().skip(1) {
            let rule = option.value.expect("sorted option");
            assert_eq!(find_sort_option(&rule.id()).map(|found| found.id), Some(option.id));
        }
    }

    #[test]
    fn invalid_input_lists_allowed_values() {
        let input = SortValueInput {
            sort_by: "Label".into(),
            dir: "ASC".into(),
        };
        let message = validate_sort_input(&input).expect_err("invalid");
        assert!(message.starts_with("Invalid initial sort \"{\"sortBy\":\"Label\""), "{message}");
        assert!(message.contains("{\"sortBy\":\"Type\",\"dir\":\"DESC\"}"), "{message}");
        assert!(message.ends_with("or null"));
    }

    #[test]
    fn valid_input_is_accepted() {
        let input = SortValueInput {
            sort_by: "Type".into(),
            dir: "DESC".into(),
        };
        assert_eq!(
            validate_sort_input(&input),
            Ok(SortRule::new(SortBy::Type, SortDirection::Desc))
        );
    }

    #[test]
    fn rule_deserializes_from_wire_shape() {
        let rule: SortRule = serde_json::from_str(r#"{"sortBy":"Field","dir":"DESC"}"#).expect("rule");
        assert_eq!(rule, SortRule::new(SortBy::Field, SortDirection::Desc));
    }
}
