//! Events the controller emits to its host.

use std::sync::{Arc, Mutex, PoisonError};

use fieldpath_types::{FilterOption, LookupStackEntry, SelectedField, SortRule};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Shape of the navigation event delivered to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationEventShape {
    /// Index of the breadcrumb navigated to (`-1` for the base object).
    Index,
    /// Target object plus the complete replacement stack.
    #[default]
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Index {
        index: isize,
    },
    Stack {
        object_api_name: String,
        lookup_stack: Arc<[LookupStackEntry]>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    SelectionChanged(Option<SelectedField>),
    /// Invalid initial filter, sort, or path supplied by the host.
    ValidationError(String),
    FilterChanged(Vec<FilterOption>),
    SortChanged(Option<SortRule>),
    Navigation(NavigationEvent),
}

/// Failure of an operation against the schema provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub operation: &'static str,
    pub object_api_name: String,
    pub cause: String,
}

/// Receiver for controller events and error reports.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PickerEvent);

    fn report_error(&self, report: ErrorReport) {
        error!(
            operation = report.operation,
            object_api_name = %report.object_api_name,
            cause = %report.cause,
            "field picker operation failed"
        );
    }
}

/// Sink that only logs.
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: PickerEvent) {
        match event {
            PickerEvent::SelectionChanged(selected) => {
                info!(path = selected.as_ref().map(|s| s.relationship_path.as_str()).unwrap_or(""), "selection changed")
            }
            PickerEvent::ValidationError(message) => info!(%message, "validation error"),
            PickerEvent::FilterChanged(options) => {
                let selected = options.iter().filter(|option| option.is_selected).count();
                info!(selected, "filter changed")
            }
            PickerEvent::SortChanged(rule) => info!(sort = %rule.map(|r| r.id()).unwrap_or_default(), "sort changed"),
            PickerEvent::Navigation(navigation) => info!(?navigation, "navigation"),
        }
    }
}

/// Sink that keeps everything it receives, for hosts that poll and for tests.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<PickerEvent>>,
    errors: Mutex<Vec<ErrorReport>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the recorded events.
    pub fn take_events(&self) -> Vec<PickerEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn errors(&self) -> Vec<ErrorReport> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn validation_errors(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|event| match event {
                PickerEvent::ValidationError(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: PickerEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }

    fn report_error(&self, report: ErrorReport) {
        error!(
            operation = report.operation,
            object_api_name = %report.object_api_name,
            cause = %report.cause,
            "field picker operation failed"
        );
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).push(report);
    }
}
