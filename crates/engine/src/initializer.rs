//! Applying a configured initial field path such as `Parent.Owner.Email`.
//!
//! Each relationship segment is followed with an ordinary go-deeper step, so
//! the resulting history and selection are the same as if a user had clicked
//! through them.

use fieldpath_types::{Field, SelectedField};
use tracing::{info, warn};

use crate::{
    controller::{FieldSelectionController, LoadOutcome, PickerEvent, PickerState},
    error::PickerError,
};

impl FieldSelectionController {
    /// Applies the configured initial path, if any. The picker must be open.
    pub async fn apply_initial_path(&mut self) -> Option<Result<SelectedField, PickerError>> {
        let path = self.config().initial_field_path.clone()?;
        Some(self.initialize_from_path(&path).await)
    }

    /// Navigates from the base object along `path` and selects its last segment.
    ///
    /// Segments are matched case-insensitively: relationship names against the
    /// current lookup fields, the final segment against field API names.
    ///
    /// The base object is loaded first, so a rejected path still leaves the
    /// picker ready on the deepest object it reached.
    pub async fn initialize_from_path(&mut self, path: &str) -> Result<SelectedField, PickerError> {
        let request = if self.navigation().is_empty() {
            self.reload()?
        } else {
            match self.navigate_back(-1)? {
                Some(request) => request,
                None => self.reload()?,
            }
        };
        let outcome = self.run_load(request).await;
        self.expect_applied(outcome)?;

        let segments: Vec<&str> = path.split('.').map(str::trim).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(self.reject_initial_path(path, "The path contains an empty segment."));
        }
        let Some((field_name, relationships)) = segments.split_last() else {
            return Err(self.reject_initial_path(path, "The path is empty."));
        };
        if relationships.len() > self.navigation().max_depth() {
            let reason = format!("The path is deeper than the maximum depth of {}.", self.navigation().max_depth());
            return Err(self.reject_initial_path(path, &reason));
        }

        for relationship in relationships {
            let Some(lookup) = find_lookup(self.lookup_fields(), relationship) else {
                let reason = format!("\"{relationship}\" is not a relationship of {}.", self.current_object());
                return Err(self.reject_initial_path(path, &reason));
            };
            let request = self.go_deeper(&lookup)?;
            let outcome = self.run_load(request).await;
            self.expect_applied(outcome)?;
        }

        let Some(field) = find_field(self.regular_fields(), self.lookup_fields(), field_name) else {
            let reason = format!("\"{field_name}\" is not a field of {}.", self.current_object());
            return Err(self.reject_initial_path(path, &reason));
        };
        if field.is_lookup() && self.is_lookup_selection_disabled() {
            let reason = format!("\"{field_name}\" is a lookup and lookup selection is disabled.");
            return Err(self.reject_initial_path(path, &reason));
        }
        let selected = self.select_field(&field)?.clone();
        info!(path = %selected.relationship_path, "initial field path applied");
        Ok(selected)
    }

    fn expect_applied(&self, outcome: LoadOutcome) -> Result<(), PickerError> {
        match (outcome, self.state()) {
            (LoadOutcome::Applied, _) => Ok(()),
            (LoadOutcome::Failed, PickerState::Error { object_api_name, cause }) => Err(PickerError::SchemaLoad {
                object_api_name: object_api_name.clone(),
                cause: cause.clone(),
            }),
            (_, state) => Err(PickerError::NotReady { state: state.name() }),
        }
    }

    fn reject_initial_path(&self, path: &str, reason: &str) -> PickerError {
        let message = format!("Invalid initial field path \"{path}\". {reason}");
        warn!(%message, "initial field path rejected");
        self.sink().emit(PickerEvent::ValidationError(message.clone()));
        PickerError::invalid_initial_config(message)
    }
}

fn find_lookup(lookup_fields: &[Field], relationship: &str) -> Option<Field> {
    lookup_fields
        .iter()
        .find(|field| field.relationship_name().is_some_and(|name| name.eq_ignore_ascii_case(relationship)))
        .cloned()
}

fn find_field(regular_fields: &[Field], lookup_fields: &[Field], api_name: &str) -> Option<Field> {
    regular_fields
        .iter()
        .chain(lookup_fields)
        .find(|field| field.api_name.eq_ignore_ascii_case(api_name))
        .cloned()
}
