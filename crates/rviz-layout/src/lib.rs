//! rviz-layout: load, validate, edit and save display layouts.
//!
//! A layout file records the panels, displays, camera views and window
//! geometry of a 3D visualization host. This crate reads such files into a
//! typed [`Document`], checks them against the declared value domains and
//! writes them back in a canonical form.
//!
//! # Quick Start
//!
//! ```no_run
//! use rviz_layout::*;
//!
//! fn main() -> Result<()> {
//!     let mut layout = Layout::open("segmentation.rviz")?;
//!
//!     // Add a camera feed next to the existing displays
//!     let mut color = Display::new("rviz/Image", "Color");
//!     color.set_kind(DisplayKind::Image(Image::subscribed("/camera/color/image_raw")));
//!     layout.add_display(color)?;
//!     layout.set_display_enabled("Grid", false)?;
//!
//!     // Refuses to write a layout the host would reject
//!     layout.save_checked()?;
//!     Ok(())
//! }
//! ```
//!
//! # Layers
//!
//! - [`parse`], [`validate`] and [`serialize`] work on text and in-memory
//!   documents.
//! - [`load`] and [`save`] add the file system.
//! - [`Layout`] is an editing session over one file.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod layout;

pub use layout::Layout;

// Re-export core types
pub use rviz_layout_core::{
    display::{AutoSize, FrameToggle, OcclusionCompensation, ValueBounds},
    parse, serialize, validate, validate_with, Axis, Choice, Color, DVec3, DepthCloud, Display,
    DisplayKind, DisplayList, DisplayType, DockState, Document, GlobalOptions, Grid, GridPlane,
    Group, Image, Keyword, LayoutError, LineStyle, LineStyleKind, Panel, ParseError,
    ParseErrorKind, PointStyle, Preferences, PropertyTreeWidget, Result, Tf, TfFrames, Toolbars,
    Tool, TransportHint, ValidationError, ValidationErrorKind, ValidationOptions, ViewState, Views,
    VisualizationManager, WindowGeometry,
};

use std::path::Path;

/// Reads and parses a layout file.
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let document = Document::parse(&text)?;
    log::debug!("loaded layout from {}", path.display());
    Ok(document)
}

/// Serializes a document and writes it to `path`, replacing any existing
/// file.
///
/// The document is not validated; see [`Layout::save_checked`].
pub fn save(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = document.to_yaml_string()?;
    std::fs::write(path, text)?;
    log::info!("saved layout to {}", path.display());
    Ok(())
}
