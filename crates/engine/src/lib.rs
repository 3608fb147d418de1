//! # Fieldpath Engine
//!
//! The fieldpath engine drives a field picker over an object schema: it
//! follows lookup relationships from a base object, filters, searches and
//! sorts the fields of the current object, and records the dotted
//! relationship path of the selected field (for example `Owner.Email`).
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fieldpath_engine::{FieldSelectionController, LoadOutcome, NullSchemaProvider, RecordingEventSink, ResolvedPickerConfig};
//! use fieldpath_types::{DisplayType, RawField};
//!
//! let sink = Arc::new(RecordingEventSink::new());
//! let mut picker = FieldSelectionController::new(ResolvedPickerConfig::default(), Arc::new(NullSchemaProvider), sink);
//!
//! let request = picker.open().expect("first open loads the base object");
//! let fields = vec![RawField {
//!     api_name: "Name".into(),
//!     label: "Account Name".into(),
//!     r#type: DisplayType::String,
//!     reference_to: None,
//!     relationship_name: None,
//! }];
//! assert_eq!(picker.complete_load(&request, Ok(fields)), LoadOutcome::Applied);
//!
//! let name = picker.displayed_fields()[0].clone();
//! picker.select_field(&name)?;
//! assert_eq!(picker.selected_field_path(), Some("Name"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`navigation`**: Relationship history and path building
//! - **`filter`**, **`sort`**, **`pipeline`**: Displayed-list composition
//! - **`controller`**: The picker state machine and its events
//! - **`schema`**: Field metadata providers
//! - **`config`**: Host configuration and its validation

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod highlight;
mod initializer;
pub mod navigation;
pub mod pipeline;
pub mod schema;
pub mod sort;

pub use config::{PickerConfig, ResolvedPickerConfig, load_config, load_config_from_path};
pub use controller::{
    ErrorReport, EventSink, FieldLists, FieldSelectionController, LoadOutcome, LoadRequest, NavigationEvent, NavigationEventShape,
    PickerEvent, PickerState, RecordingEventSink, TracingEventSink,
};
pub use error::PickerError;
pub use filter::{DisabledFilterOrder, FilterError, FilterSelectionMode, FilterSet};
pub use navigation::{Breadcrumb, NavigationError, NavigationStack, TruncateOutcome};
pub use schema::{NullSchemaProvider, SchemaProvider, StaticSchemaProvider};
