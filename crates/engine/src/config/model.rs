//! Picker configuration as supplied by the host, and its validated form.

use fieldpath_types::{DEFAULT_BASE_OBJECT, DisplayType, MAXIMUM_DEPTH, SortRule, SortValueInput, validate_sort_input};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::{
    controller::NavigationEventShape,
    filter::{DisabledFilterOrder, FilterSelectionMode},
};

/// Error surfaced when reading a configuration file fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("picker config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("picker config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One type name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldTypeFilterInput {
    One(String),
    Many(Vec<String>),
}

impl FieldTypeFilterInput {
    fn names(&self) -> Vec<&str> {
        match self {
            FieldTypeFilterInput::One(name) => vec![name.as_str()],
            FieldTypeFilterInput::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Raw picker configuration.
///
/// Values are loosely typed on purpose: anything invalid is reported by
/// [`PickerConfig::resolve`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PickerConfig {
    /// Object the picker starts from. Blank or non-string values fall back to `Account`.
    pub base_object: Option<Value>,
    /// Maximum number of relationship hops, clamped to `0..=5`.
    pub depth: i64,
    /// Types that may be selected; empty means unrestricted.
    pub allowed_field_types: Vec<String>,
    /// Dotted path of a field to preselect, e.g. `Owner.Email`.
    pub initial_field_path: Option<String>,
    pub field_type_filter: Option<FieldTypeFilterInput>,
    pub field_sort: Option<SortValueInput>,
    /// Applies the initial filter but prevents the user from changing it.
    pub is_user_filtering_disabled: bool,
    pub filter_selection: FilterSelectionMode,
    pub disabled_filter_order: DisabledFilterOrder,
    pub navigation_events: NavigationEventShape,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            base_object: None,
            depth: MAXIMUM_DEPTH as i64,
            allowed_field_types: Vec::new(),
            initial_field_path: None,
            field_type_filter: None,
            field_sort: None,
            is_user_filtering_disabled: false,
            filter_selection: FilterSelectionMode::default(),
            disabled_filter_order: DisabledFilterOrder::default(),
            navigation_events: NavigationEventShape::default(),
        }
    }
}

/// Validated configuration consumed by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPickerConfig {
    pub base_object: String,
    pub depth: usize,
    pub allowed_field_types: Vec<DisplayType>,
    pub initial_field_path: Option<String>,
    pub initial_filter: Vec<DisplayType>,
    pub initial_sort: Option<SortRule>,
    pub user_filtering_disabled: bool,
    pub filter_selection: FilterSelectionMode,
    pub disabled_filter_order: DisabledFilterOrder,
    pub navigation_events: NavigationEventShape,
}

impl Default for ResolvedPickerConfig {
    fn default() -> Self {
        PickerConfig::default().resolve().0
    }
}

impl PickerConfig {
    /// Validates the configuration.
    ///
    /// Returns the usable configuration together with one message per invalid
    /// value; invalid values are dropped rather than failing the whole config.
    pub fn resolve(&self) -> (ResolvedPickerConfig, Vec<String>) {
        let mut messages = Vec::new();

        let allowed_field_types = self
            .allowed_field_types
            .iter()
            .filter_map(|name| {
                let parsed = DisplayType::parse_known(name);
                if parsed.is_none() {
                    messages.push(format!("Invalid allowed field type \"{name}\"."));
                }
                parsed
            })
            .collect();

        let initial_filter = self
            .field_type_filter
            .as_ref()
            .map(FieldTypeFilterInput::names)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|name| {
                let parsed = DisplayType::parse_known(name);
                if parsed.is_none() {
                    messages.push(format!("Invalid initial filter \"{name}\". The value should be a known field type or null"));
                }
                parsed
            })
            .collect();

        let initial_sort = self.field_sort.as_ref().and_then(|input| match validate_sort_input(input) {
            Ok(rule) => Some(rule),
            Err(message) => {
                messages.push(message);
                None
            }
        });

        let initial_field_path = self
            .initial_field_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_string);

        let resolved = ResolvedPickerConfig {
            base_object: normalize_base_object(self.base_object.as_ref()),
            depth: clamp_depth(self.depth),
            allowed_field_types,
            initial_field_path,
            initial_filter,
            initial_sort,
            user_filtering_disabled: self.is_user_filtering_disabled,
            filter_selection: self.filter_selection,
            disabled_filter_order: self.disabled_filter_order,
            navigation_events: self.navigation_events,
        };
        (resolved, messages)
    }
}

/// Clamps a configured depth into `0..=MAXIMUM_DEPTH`, warning when it had to.
pub fn clamp_depth(depth: i64) -> usize {
    let clamped = depth.clamp(0, MAXIMUM_DEPTH as i64);
    if clamped != depth {
        warn!(requested = depth, clamped, maximum = MAXIMUM_DEPTH, "picker depth out of range; clamped");
    }
    clamped as usize
}

/// Base object from an arbitrary JSON value; blank strings and non-strings
/// yield [`DEFAULT_BASE_OBJECT`].
pub fn normalize_base_object(value: Option<&Value>) -> String {
    normalize_base_object_name(value.and_then(Value::as_str))
}

pub fn normalize_base_object_name(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => DEFAULT_BASE_OBJECT.to_string(),
    }
}
