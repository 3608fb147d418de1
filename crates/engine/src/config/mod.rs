//! Picker configuration: the raw host-facing shape, validation, and file IO.

mod io;
mod model;

pub use io::{CONFIG_PATH_ENV, default_config_path, load_config, load_config_from_path};
pub use model::{
    ConfigError, FieldTypeFilterInput, PickerConfig, ResolvedPickerConfig, clamp_depth, normalize_base_object, normalize_base_object_name,
};
