//! Helpers shared by the Visadesk crates: display formatting, file
//! metadata, path handling, and the persisted user preferences.

pub mod date_handling;
pub mod file_meta;
pub mod path_processing;
pub mod preferences;
pub mod size_format;

pub use date_handling::{format_date_mmddyyyy, format_week_range, parse_input_date};
pub use file_meta::{file_meta_from_path, mime_for_path};
pub use path_processing::{expand_tilde, split_path_list};
pub use preferences::{PreferencesError, UserPreferences};
pub use size_format::format_size;
