//! Shared type definitions for the fieldpath picker.
//!
//! These types describe the schema provider contract (`RawField`), the
//! display-ready field model, navigation history entries, and the fixed
//! filter/sort catalogs. They carry no behavior beyond validation and
//! lookups so both the engine and any presentation layer can depend on them.

mod display_type;
mod field;
mod sort;

pub use display_type::{DisplayType, KNOWN_DISPLAY_TYPES, UNKNOWN_TYPE_ICON};
pub use field::{Field, FieldShapeError, FilterOption, LookupStackEntry, LookupTarget, RawField, SelectedField};
pub use sort::{SORT_OPTIONS, SortBy, SortDirection, SortOption, SortRule, SortValueInput, find_sort_option, validate_sort_input};

/// Default object browsed when no usable base object is configured.
pub const DEFAULT_BASE_OBJECT: &str = "Account";

/// Upper bound for the configurable traversal depth.
pub const MAXIMUM_DEPTH: usize = 5;
