use thiserror::Error;

use crate::{config::ConfigError, filter::FilterError, navigation::NavigationError};

/// Errors returned by [`crate::FieldSelectionController`] operations.
///
/// A returned error means the operation was rejected and controller state is
/// unchanged, except for [`PickerError::SchemaLoad`], which is also reflected
/// in the controller's error state.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("field '{api_name}' is not a lookup field")]
    NotLookup { api_name: String },

    #[error("field '{api_name}' is a lookup and lookup selection is disabled")]
    LookupSelectionDisabled { api_name: String },

    #[error("picker is {state}; the operation requires loaded fields")]
    NotReady { state: &'static str },

    #[error("navigation target '{object_api_name}' does not match the stack's current object '{expected}'")]
    InconsistentNavigation { object_api_name: String, expected: String },

    #[error("unknown sort option '{id}'")]
    UnknownSortOption { id: String },

    #[error("{message}")]
    InvalidInitialConfig { message: String },

    #[error("failed to load fields for '{object_api_name}': {cause}")]
    SchemaLoad { object_api_name: String, cause: String },
}

impl PickerError {
    pub fn not_lookup(api_name: impl Into<String>) -> Self {
        Self::NotLookup { api_name: api_name.into() }
    }

    pub fn invalid_initial_config(message: impl Into<String>) -> Self {
        Self::InvalidInitialConfig { message: message.into() }
    }
}
