//! Main window geometry.
//!
//! The host stores its Qt window state as an opaque hex blob next to a few
//! plain layout numbers. None of it is validated; it only has to survive
//! a load/save cycle.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::error::ParseError;
use crate::fields::{read_section, FieldWriter, Fields, Section};

/// Collapse state of one dock widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DockState {
    pub collapsed: Option<bool>,
    pub extra: Mapping,
}

impl Section for DockState {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            collapsed: f.bool("collapsed")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.bool("collapsed", self.collapsed);
        out.extend(&self.extra);
    }
}

/// The `Window Geometry` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowGeometry {
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub hide_left_dock: Option<bool>,
    pub hide_right_dock: Option<bool>,
    /// Serialized `QMainWindow` state, hex-encoded by the host.
    pub main_window_state: Option<String>,
    /// Dock widgets keyed by panel name.
    pub docks: BTreeMap<String, DockState>,
    pub extra: Mapping,
}

impl WindowGeometry {
    /// Returns whether the named dock is collapsed.
    pub fn is_collapsed(&self, dock: &str) -> Option<bool> {
        self.docks.get(dock).and_then(|d| d.collapsed)
    }
}

impl Section for WindowGeometry {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        let height = f.int("Height")?;
        let width = f.int("Width")?;
        let x = f.int("X")?;
        let y = f.int("Y")?;
        let hide_left_dock = f.bool("Hide Left Dock")?;
        let hide_right_dock = f.bool("Hide Right Dock")?;
        let main_window_state = f.string("QMainWindow State")?;
        let mut docks = BTreeMap::new();
        let mut extra = Mapping::new();
        for (key, value) in f.rest() {
            match (key, value) {
                (Value::String(name), value @ Value::Mapping(_)) => {
                    let dock = read_section(&f.child_path(&name), value)?;
                    docks.insert(name, dock);
                }
                (key, value) => {
                    extra.insert(key, value);
                }
            }
        }
        Ok(Self {
            height,
            width,
            x,
            y,
            hide_left_dock,
            hide_right_dock,
            main_window_state,
            docks,
            extra,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.int("Height", self.height);
        out.int("Width", self.width);
        out.int("X", self.x);
        out.int("Y", self.y);
        out.bool("Hide Left Dock", self.hide_left_dock);
        out.bool("Hide Right Dock", self.hide_right_dock);
        out.string("QMainWindow State", self.main_window_state.as_deref());
        for (name, dock) in &self.docks {
            out.section(name, Some(dock));
        }
        out.extend(&self.extra);
    }
}
