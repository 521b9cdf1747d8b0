//! # Factory Planner Editor
//!
//! The interactive layout controller. It owns the live layout, the placement
//! preview, the selection and the clipboard, and turns pointer events and
//! named commands into layout mutations. Presentation layers forward platform
//! input here and render what it exposes.

pub mod command;
pub mod editor;
pub mod error;
pub mod selection;
pub mod status;

pub use command::EditorCommand;
pub use editor::{ClickOutcome, Editor, EditorMode};
pub use error::EditorError;
pub use selection::Selection;
pub use status::PointerStatus;
