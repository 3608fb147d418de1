use fieldpath_types::Field;

/// Field lists for the object currently browsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLists {
    pub current_object: String,
    pub lookup_fields: Vec<Field>,
    pub regular_fields: Vec<Field>,
    /// Regular fields after filter, search, and sort.
    pub displayed_fields: Vec<Field>,
}

impl FieldLists {
    /// Splits `fields` by whether they reference another object.
    pub fn partition(current_object: impl Into<String>, fields: Vec<Field>) -> Self {
        let (lookup_fields, regular_fields) = fields.into_iter().partition(Field::is_lookup);
        Self {
            current_object: current_object.into(),
            lookup_fields,
            regular_fields,
            displayed_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    /// Hidden. Lists from the last successful load are kept for a cheap reopen.
    Closed { retained: Option<FieldLists> },
    /// Open without lists, e.g. waiting for an initial path to be applied.
    Idle,
    Loading { request: LoadRequest },
    Ready(FieldLists),
    Error { object_api_name: String, cause: String },
}

impl PickerState {
    pub fn name(&self) -> &'static str {
        match self {
            PickerState::Closed { .. } => "closed",
            PickerState::Idle => "idle",
            PickerState::Loading { .. } => "loading",
            PickerState::Ready(_) => "ready",
            PickerState::Error { .. } => "in error",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PickerState::Closed { .. })
    }

    pub fn lists(&self) -> Option<&FieldLists> {
        match self {
            PickerState::Ready(lists) => Some(lists),
            _ => None,
        }
    }
}

/// Ticket for one field load. Completing a ticket that is no longer the
/// newest one is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    generation: u64,
    object_api_name: String,
}

impl LoadRequest {
    pub(crate) fn new(generation: u64, object_api_name: impl Into<String>) -> Self {
        Self {
            generation,
            object_api_name: object_api_name.into(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn object_api_name(&self) -> &str {
        &self.object_api_name
    }
}

/// Result of completing a [`LoadRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer request or a close superseded this one; nothing changed.
    Stale,
    Failed,
}
