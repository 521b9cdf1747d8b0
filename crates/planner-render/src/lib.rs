//! # Factory Planner Renderer
//!
//! Render-ready snapshots of the editor and the viewport math for the layout
//! canvas. A presentation layer pulls a [`RenderFrame`] after each event and
//! draws it; nothing here depends on a drawing toolkit.

pub mod viewport;
pub mod render_data;

pub use render_data::{RenderFrame, RenderInstance, RenderPreview};
pub use viewport::Viewport;
