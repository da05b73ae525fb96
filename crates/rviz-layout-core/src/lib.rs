//! Core schema for rviz-layout.
//!
//! This crate models the display-layout documents a 3D visualization host
//! saves for its panels and displays:
//! - [`Document`] and its sections ([`Panel`], [`VisualizationManager`],
//!   [`WindowGeometry`], ...)
//! - [`Display`] entries with typed settings per [`DisplayKind`]
//! - [`parse`], [`validate`] and [`serialize`] for the load/save cycle
//! - [`ValidationOptions`] for choosing which rules apply

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Names like `display::DisplayKind` mirror the host's vocabulary
#![allow(clippy::module_name_repetitions)]

pub mod choice;
pub mod color;
pub mod display;
pub mod document;
pub mod error;
pub mod fields;
pub mod manager;
pub mod options;
pub mod panels;
pub mod validate;
pub mod view;
pub mod window;

pub use choice::{Axis, Choice, Keyword, TransportHint};
pub use color::Color;
pub use display::{
    DepthCloud, Display, DisplayKind, DisplayList, DisplayType, Grid, GridPlane, Group, Image,
    LineStyle, LineStyleKind, PointStyle, Tf, TfFrames,
};
pub use document::{parse, serialize, Document};
pub use error::{
    LayoutError, ParseError, ParseErrorKind, Result, ValidationError, ValidationErrorKind,
};
pub use fields::{FieldWriter, Fields, Section};
pub use manager::{GlobalOptions, Tool, VisualizationManager};
pub use options::ValidationOptions;
pub use panels::{Panel, Preferences, PropertyTreeWidget, Toolbars};
pub use validate::{validate, validate_with, Validate, Validator};
pub use view::{ViewState, Views};
pub use window::{DockState, WindowGeometry};

// Re-export glam types for convenience
pub use glam::DVec3;
