//! # Factory Planner I/O
//!
//! Readers and writers for the `.fl` layout format, catalog seed files and
//! the JSON editor settings file.

pub mod codec;
pub mod catalog_file;
pub mod settings;

pub use codec::{decode, encode, read_layout, write_layout, CodecError, LayoutReader, LayoutWriter};
pub use catalog_file::{parse_catalog, read_catalog};
pub use settings::{EditorSettings, SettingsError};
