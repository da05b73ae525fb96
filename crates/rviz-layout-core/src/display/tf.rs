//! Coordinate-frame tree display.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::error::ParseError;
use crate::fields::{read_section, FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// Visibility toggle of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameToggle {
    pub value: Option<bool>,
    pub extra: Mapping,
}

impl Section for FrameToggle {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            value: f.bool("Value")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.bool("Value", self.value);
        out.extend(&self.extra);
    }
}

/// The `Frames` block: a master toggle plus one entry per frame name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TfFrames {
    pub all_enabled: Option<bool>,
    pub frames: BTreeMap<String, FrameToggle>,
    /// Entries that are not frame mappings.
    pub extra: Mapping,
}

impl TfFrames {
    /// Returns whether a frame is shown, falling back to the master toggle.
    pub fn is_shown(&self, frame: &str) -> bool {
        self.frames
            .get(frame)
            .and_then(|t| t.value)
            .or(self.all_enabled)
            .unwrap_or(true)
    }
}

impl Section for TfFrames {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        let all_enabled = f.bool("All Enabled")?;
        let mut frames = BTreeMap::new();
        let mut extra = Mapping::new();
        for (key, value) in f.rest() {
            match (key, value) {
                (Value::String(name), value @ Value::Mapping(_)) => {
                    let toggle = read_section(&f.child_path(&name), value)?;
                    frames.insert(name, toggle);
                }
                (key, value) => {
                    extra.insert(key, value);
                }
            }
        }
        Ok(Self {
            all_enabled,
            frames,
            extra,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.bool("All Enabled", self.all_enabled);
        for (name, toggle) in &self.frames {
            out.section(name, Some(toggle));
        }
        out.extend(&self.extra);
    }
}

/// Settings of a `TF` display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tf {
    pub frame_timeout: Option<f64>,
    pub frames: Option<TfFrames>,
    pub marker_alpha: Option<f64>,
    pub marker_scale: Option<f64>,
    pub show_arrows: Option<bool>,
    pub show_axes: Option<bool>,
    pub show_names: Option<bool>,
    /// Frame hierarchy snapshot, kept as written.
    pub tree: Option<Value>,
    pub update_interval: Option<f64>,
}

impl Section for Tf {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            frame_timeout: f.float("Frame Timeout")?,
            frames: f.section("Frames")?,
            marker_alpha: f.float("Marker Alpha")?,
            marker_scale: f.float("Marker Scale")?,
            show_arrows: f.bool("Show Arrows")?,
            show_axes: f.bool("Show Axes")?,
            show_names: f.bool("Show Names")?,
            tree: f.take("Tree"),
            update_interval: f.float("Update Interval")?,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Frame Timeout", self.frame_timeout);
        out.section("Frames", self.frames.as_ref());
        out.float("Marker Alpha", self.marker_alpha);
        out.float("Marker Scale", self.marker_scale);
        out.bool("Show Arrows", self.show_arrows);
        out.bool("Show Axes", self.show_axes);
        out.bool("Show Names", self.show_names);
        if let Some(tree) = &self.tree {
            out.value("Tree", tree.clone());
        }
        out.float("Update Interval", self.update_interval);
    }
}

impl Validate for Tf {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.non_negative(path, "Frame Timeout", self.frame_timeout);
        v.unit_interval(path, "Marker Alpha", self.marker_alpha);
        v.non_negative(path, "Marker Scale", self.marker_scale);
        v.non_negative(path, "Update Interval", self.update_interval);
    }
}
