//! Field-type filter menu state.
//!
//! Every catalog type is always listed; availability is recomputed against the
//! current regular fields on each load while the user's selection is carried
//! over by matching on the option value.

use std::collections::HashSet;

use fieldpath_types::{DisplayType, Field, FilterOption, KNOWN_DISPLAY_TYPES};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Whether the menu allows one or many types to be selected at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterSelectionMode {
    #[default]
    Single,
    Multi,
}

/// Presentation order of the options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisabledFilterOrder {
    /// Catalog order, regardless of availability.
    #[default]
    Declared,
    /// Catalog order with disabled options moved after enabled ones (stable).
    DisabledLast,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("filter \"{value}\" is not a valid option")]
    UnknownOption { value: String },

    #[error("filter \"{value}\" is disabled and cannot be selected")]
    DisabledOption { value: String },

    #[error("filtering is disabled for this picker")]
    Locked,
}

/// Computes the option list for `regular_fields`.
///
/// An option is disabled when no regular field has its type, or when an
/// allow-list is configured and the type is not on it. `is_selected` is
/// carried from `previous` by value.
pub fn compute_available(
    regular_fields: &[Field],
    allowed_types: &[DisplayType],
    previous: &[FilterOption],
    order: DisabledFilterOrder,
) -> Vec<FilterOption> {
    let present: HashSet<&DisplayType> = regular_fields.iter().map(|field| &field.r#type).collect();
    let mut options: Vec<FilterOption> = KNOWN_DISPLAY_TYPES
        .iter()
        .map(|display_type| {
            let not_allowed = !allowed_types.is_empty() && !allowed_types.contains(display_type);
            let is_selected = previous
                .iter()
                .any(|option| option.value == *display_type && option.is_selected);
            FilterOption {
                is_disabled: !present.contains(display_type) || not_allowed,
                is_selected,
                ..FilterOption::for_type(display_type)
            }
        })
        .collect();

    if order == DisabledFilterOrder::DisabledLast {
        options.sort_by_key(|option| option.is_disabled);
    }
    options
}

/// Applies the type filter stage of the pipeline.
///
/// Selected options win; with nothing selected the allow-list applies; with
/// neither every field passes.
pub fn apply_type_filter(fields: Vec<Field>, options: &[FilterOption], allowed_types: &[DisplayType]) -> Vec<Field> {
    let selected: HashSet<&DisplayType> = options
        .iter()
        .filter(|option| option.is_selected)
        .map(|option| &option.value)
        .collect();
    if !selected.is_empty() {
        return fields.into_iter().filter(|field| selected.contains(&field.r#type)).collect();
    }
    if !allowed_types.is_empty() {
        return fields
            .into_iter()
            .filter(|field| allowed_types.contains(&field.r#type))
            .collect();
    }
    fields
}

/// Filter menu owned by the controller.
#[derive(Debug, Clone)]
pub struct FilterSet {
    options: Vec<FilterOption>,
    allowed_types: Vec<DisplayType>,
    mode: FilterSelectionMode,
    order: DisabledFilterOrder,
    locked: bool,
}

impl FilterSet {
    pub fn new(allowed_types: Vec<DisplayType>, mode: FilterSelectionMode, order: DisabledFilterOrder) -> Self {
        let options = compute_available(&[], &allowed_types, &[], order);
        Self {
            options,
            allowed_types,
            mode,
            order,
            locked: false,
        }
    }

    /// Prevents user toggling. Selections made through [`FilterSet::preselect`] still apply.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    pub fn allowed_types(&self) -> &[DisplayType] {
        &self.allowed_types
    }

    pub fn mode(&self) -> FilterSelectionMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_selection(&self) -> bool {
        self.options.iter().any(|option| option.is_selected)
    }

    pub fn selected_values(&self) -> Vec<DisplayType> {
        self.options
            .iter()
            .filter(|option| option.is_selected)
            .map(|option| option.value.clone())
            .collect()
    }

    /// Recomputes availability for a freshly loaded field list.
    pub fn refresh(&mut self, regular_fields: &[Field]) {
        self.options = compute_available(regular_fields, &self.allowed_types, &self.options, self.order);
    }

    /// Applies configured initial selections, bypassing the lock and
    /// availability (no fields are loaded yet when configuration is applied).
    ///
    /// Values outside the catalog or the allow-list are returned for the caller
    /// to report; the rest are selected.
    pub fn preselect(&mut self, values: &[DisplayType]) -> Vec<DisplayType> {
        let mut rejected = Vec::new();
        for value in values {
            let allowed = self.allowed_types.is_empty() || self.allowed_types.contains(value);
            let Some(position) = self.position_of(value).filter(|_| allowed) else {
                rejected.push(value.clone());
                continue;
            };
            if self.mode == FilterSelectionMode::Single {
                self.clear_selection();
            }
            self.options[position].is_selected = true;
        }
        rejected
    }

    /// Toggles the option for `value`.
    ///
    /// A disabled option cannot be selected, but an already selected one that
    /// has since become disabled can still be toggled off.
    pub fn toggle(&mut self, value: &DisplayType) -> Result<bool, FilterError> {
        if self.locked {
            warn!(value = %value, "filter toggle rejected: filtering is locked");
            return Err(FilterError::Locked);
        }
        let Some(position) = self.position_of(value) else {
            warn!(value = %value, "filter toggle rejected: unknown option");
            return Err(FilterError::UnknownOption {
                value: value.to_string(),
            });
        };
        let option = &self.options[position];
        if !option.is_selected && option.is_disabled {
            warn!(value = %value, "filter toggle rejected: option is disabled");
            return Err(FilterError::DisabledOption {
                value: value.to_string(),
            });
        }

        let now_selected = !option.is_selected;
        if now_selected && self.mode == FilterSelectionMode::Single {
            self.clear_selection();
        }
        self.options[position].is_selected = now_selected;
        debug!(value = %value, selected = now_selected, "filter toggled");
        Ok(now_selected)
    }

    /// Deselects everything. Returns whether anything changed.
    pub fn clear(&mut self) -> Result<bool, FilterError> {
        if self.locked {
            warn!("filter clear rejected: filtering is locked");
            return Err(FilterError::Locked);
        }
        let changed = self.has_selection();
        self.clear_selection();
        Ok(changed)
    }

    /// Type filter stage over `fields`.
    pub fn apply(&self, fields: Vec<Field>) -> Vec<Field> {
        apply_type_filter(fields, &self.options, &self.allowed_types)
    }

    fn clear_selection(&mut self) {
        for option in &mut self.options {
            option.is_selected = false;
        }
    }

    fn position_of(&self, value: &DisplayType) -> Option<usize> {
        self.options.iter().position(|option| option.value == *value)
    }
}
