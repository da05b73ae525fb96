//! View camera state.

use glam::DVec3;
use serde_yaml::{Mapping, Value};

use crate::error::ParseError;
use crate::fields::{join_path, FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// A view controller's camera parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// View controller class, e.g. `rviz/Orbit`.
    pub class: Option<String>,
    pub name: Option<String>,
    /// Distance from the focal point.
    pub distance: Option<f64>,
    pub focal_point: Option<DVec3>,
    pub focal_shape_fixed_size: Option<bool>,
    pub focal_shape_size: Option<f64>,
    pub invert_z_axis: Option<bool>,
    pub near_clip_distance: Option<f64>,
    /// Elevation in radians.
    pub pitch: Option<f64>,
    pub target_frame: Option<String>,
    /// Controller label shown by the host, e.g. `Orbit (rviz)`.
    pub value: Option<String>,
    /// Azimuth in radians.
    pub yaw: Option<f64>,
    pub extra: Mapping,
}

impl ViewState {
    /// An orbit view looking at `focal_point`.
    pub fn orbit(focal_point: DVec3, distance: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            class: Some("rviz/Orbit".to_string()),
            name: Some("Current View".to_string()),
            distance: Some(distance),
            focal_point: Some(focal_point),
            focal_shape_fixed_size: Some(true),
            focal_shape_size: Some(0.05),
            invert_z_axis: Some(false),
            near_clip_distance: Some(0.01),
            pitch: Some(pitch),
            target_frame: Some("<Fixed Frame>".to_string()),
            value: Some("Orbit (rviz)".to_string()),
            yaw: Some(yaw),
            extra: Mapping::new(),
        }
    }
}

impl Section for ViewState {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            class: f.string("Class")?,
            name: f.string("Name")?,
            distance: f.float("Distance")?,
            focal_point: f.vec3("Focal Point")?,
            focal_shape_fixed_size: f.bool("Focal Shape Fixed Size")?,
            focal_shape_size: f.float("Focal Shape Size")?,
            invert_z_axis: f.bool("Invert Z Axis")?,
            near_clip_distance: f.float("Near Clip Distance")?,
            pitch: f.float("Pitch")?,
            target_frame: f.string("Target Frame")?,
            value: f.string("Value")?,
            yaw: f.float("Yaw")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.string("Class", self.class.as_deref());
        out.string("Name", self.name.as_deref());
        out.float("Distance", self.distance);
        out.vec3("Focal Point", self.focal_point);
        out.bool("Focal Shape Fixed Size", self.focal_shape_fixed_size);
        out.float("Focal Shape Size", self.focal_shape_size);
        out.bool("Invert Z Axis", self.invert_z_axis);
        out.float("Near Clip Distance", self.near_clip_distance);
        out.float("Pitch", self.pitch);
        out.string("Target Frame", self.target_frame.as_deref());
        out.string("Value", self.value.as_deref());
        out.float("Yaw", self.yaw);
        out.extend(&self.extra);
    }
}

impl Validate for ViewState {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.non_negative(path, "Distance", self.distance);
        if let Some(focal_point) = self.focal_point {
            let focal_path = join_path(path, "Focal Point");
            v.finite(&focal_path, "X", Some(focal_point.x));
            v.finite(&focal_path, "Y", Some(focal_point.y));
            v.finite(&focal_path, "Z", Some(focal_point.z));
        }
        v.non_negative(path, "Focal Shape Size", self.focal_shape_size);
        v.non_negative(path, "Near Clip Distance", self.near_clip_distance);
        v.finite(path, "Pitch", self.pitch);
        v.finite(path, "Yaw", self.yaw);
    }
}

/// The `Views` block: the active view plus saved ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Views {
    pub current: Option<ViewState>,
    pub saved: Vec<ViewState>,
    pub extra: Mapping,
}

impl Section for Views {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            current: f.section("Current")?,
            saved: f.sections("Saved")?.unwrap_or_default(),
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.section("Current", self.current.as_ref());
        if self.saved.is_empty() {
            out.value("Saved", Value::Null);
        } else {
            out.sections("Saved", Some(self.saved.as_slice()));
        }
        out.extend(&self.extra);
    }
}

impl Validate for Views {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.nested(path, "Current", self.current.as_ref());
        let saved_path = join_path(path, "Saved");
        v.unique_names(
            &saved_path,
            self.saved.iter().filter_map(|view| view.name.as_deref()),
        );
        for (i, view) in self.saved.iter().enumerate() {
            view.validate(&format!("{saved_path}[{i}]"), v);
        }
    }
}
