//! Depth-image point cloud display.

use serde_yaml::Mapping;

use crate::choice::{Axis, Choice, Keyword, TransportHint};
use crate::color::Color;
use crate::error::ParseError;
use crate::fields::{FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// How each point is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointStyle {
    Points,
    Squares,
    #[default]
    FlatSquares,
    Spheres,
    Boxes,
}

impl Keyword for PointStyle {
    const KEYWORDS: &'static [(&'static str, Self)] = &[
        ("Points", Self::Points),
        ("Squares", Self::Squares),
        ("Flat Squares", Self::FlatSquares),
        ("Spheres", Self::Spheres),
        ("Boxes", Self::Boxes),
    ];
}

/// The `Auto Size` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoSize {
    pub auto_size_factor: Option<f64>,
    pub value: Option<bool>,
    pub extra: Mapping,
}

impl Section for AutoSize {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            auto_size_factor: f.float("Auto Size Factor")?,
            value: f.bool("Value")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Auto Size Factor", self.auto_size_factor);
        out.bool("Value", self.value);
        out.extend(&self.extra);
    }
}

impl Validate for AutoSize {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.non_negative(path, "Auto Size Factor", self.auto_size_factor);
    }
}

/// The `Autocompute Value Bounds` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueBounds {
    pub max_value: Option<f64>,
    pub min_value: Option<f64>,
    pub value: Option<bool>,
    pub extra: Mapping,
}

impl Section for ValueBounds {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            max_value: f.float("Max Value")?,
            min_value: f.float("Min Value")?,
            value: f.bool("Value")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Max Value", self.max_value);
        out.float("Min Value", self.min_value);
        out.bool("Value", self.value);
        out.extend(&self.extra);
    }
}

impl Validate for ValueBounds {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.finite(path, "Max Value", self.max_value);
        v.finite(path, "Min Value", self.min_value);
        // While autocompute is on the host stores inverted sentinels here.
        if self.value != Some(true) {
            v.bounds(path, "Min Value", self.min_value, self.max_value);
        }
    }
}

/// The `Occlusion Compensation` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OcclusionCompensation {
    /// Seconds before an occluded point is dropped.
    pub occlusion_time_out: Option<f64>,
    pub value: Option<bool>,
    pub extra: Mapping,
}

impl Section for OcclusionCompensation {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            occlusion_time_out: f.float("Occlusion Time-Out")?,
            value: f.bool("Value")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Occlusion Time-Out", self.occlusion_time_out);
        out.bool("Value", self.value);
        out.extend(&self.extra);
    }
}

impl Validate for OcclusionCompensation {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.non_negative(path, "Occlusion Time-Out", self.occlusion_time_out);
    }
}

/// Settings of a `DepthCloud` display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepthCloud {
    pub alpha: Option<f64>,
    pub auto_size: Option<AutoSize>,
    pub autocompute_intensity_bounds: Option<bool>,
    pub autocompute_value_bounds: Option<ValueBounds>,
    pub axis: Option<Choice<Axis>>,
    pub channel_name: Option<String>,
    pub color: Option<Color>,
    pub color_image_topic: Option<String>,
    /// Name of the color transformer plugin (`RGB8`, `Intensity`, ...).
    pub color_transformer: Option<String>,
    pub color_transport_hint: Option<Choice<TransportHint>>,
    pub decay_time: Option<f64>,
    pub depth_map_topic: Option<String>,
    pub depth_map_transport_hint: Option<Choice<TransportHint>>,
    pub invert_rainbow: Option<bool>,
    pub max_color: Option<Color>,
    pub max_intensity: Option<f64>,
    pub min_color: Option<Color>,
    pub min_intensity: Option<f64>,
    pub occlusion_compensation: Option<OcclusionCompensation>,
    pub position_transformer: Option<String>,
    pub queue_size: Option<i64>,
    pub selectable: Option<bool>,
    pub size_pixels: Option<f64>,
    pub size_m: Option<f64>,
    pub style: Option<Choice<PointStyle>>,
    pub topic_filter: Option<bool>,
    pub use_fixed_frame: Option<bool>,
    pub use_rainbow: Option<bool>,
}

impl Section for DepthCloud {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            alpha: f.float("Alpha")?,
            auto_size: f.section("Auto Size")?,
            autocompute_intensity_bounds: f.bool("Autocompute Intensity Bounds")?,
            autocompute_value_bounds: f.section("Autocompute Value Bounds")?,
            axis: f.choice("Axis")?,
            channel_name: f.string("Channel Name")?,
            color: f.color("Color")?,
            color_image_topic: f.string("Color Image Topic")?,
            color_transformer: f.string("Color Transformer")?,
            color_transport_hint: f.choice("Color Transport Hint")?,
            decay_time: f.float("Decay Time")?,
            depth_map_topic: f.string("Depth Map Topic")?,
            depth_map_transport_hint: f.choice("Depth Map Transport Hint")?,
            invert_rainbow: f.bool("Invert Rainbow")?,
            max_color: f.color("Max Color")?,
            max_intensity: f.float("Max Intensity")?,
            min_color: f.color("Min Color")?,
            min_intensity: f.float("Min Intensity")?,
            occlusion_compensation: f.section("Occlusion Compensation")?,
            position_transformer: f.string("Position Transformer")?,
            queue_size: f.int("Queue Size")?,
            selectable: f.bool("Selectable")?,
            size_pixels: f.float("Size (Pixels)")?,
            size_m: f.float("Size (m)")?,
            style: f.choice("Style")?,
            topic_filter: f.bool("Topic Filter")?,
            use_fixed_frame: f.bool("Use Fixed Frame")?,
            use_rainbow: f.bool("Use rainbow")?,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Alpha", self.alpha);
        out.section("Auto Size", self.auto_size.as_ref());
        out.bool("Autocompute Intensity Bounds", self.autocompute_intensity_bounds);
        out.section("Autocompute Value Bounds", self.autocompute_value_bounds.as_ref());
        out.choice("Axis", self.axis.as_ref());
        out.string("Channel Name", self.channel_name.as_deref());
        out.color("Color", self.color);
        out.string("Color Image Topic", self.color_image_topic.as_deref());
        out.string("Color Transformer", self.color_transformer.as_deref());
        out.choice("Color Transport Hint", self.color_transport_hint.as_ref());
        out.float("Decay Time", self.decay_time);
        out.string("Depth Map Topic", self.depth_map_topic.as_deref());
        out.choice("Depth Map Transport Hint", self.depth_map_transport_hint.as_ref());
        out.bool("Invert Rainbow", self.invert_rainbow);
        out.color("Max Color", self.max_color);
        out.float("Max Intensity", self.max_intensity);
        out.color("Min Color", self.min_color);
        out.float("Min Intensity", self.min_intensity);
        out.section("Occlusion Compensation", self.occlusion_compensation.as_ref());
        out.string("Position Transformer", self.position_transformer.as_deref());
        out.int("Queue Size", self.queue_size);
        out.bool("Selectable", self.selectable);
        out.float("Size (Pixels)", self.size_pixels);
        out.float("Size (m)", self.size_m);
        out.choice("Style", self.style.as_ref());
        out.bool("Topic Filter", self.topic_filter);
        out.bool("Use Fixed Frame", self.use_fixed_frame);
        out.bool("Use rainbow", self.use_rainbow);
    }
}

impl Validate for DepthCloud {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.unit_interval(path, "Alpha", self.alpha);
        v.nested(path, "Auto Size", self.auto_size.as_ref());
        v.nested(path, "Autocompute Value Bounds", self.autocompute_value_bounds.as_ref());
        v.choice(path, "Axis", self.axis.as_ref());
        v.color(path, "Color", self.color);
        v.choice(path, "Color Transport Hint", self.color_transport_hint.as_ref());
        v.non_negative(path, "Decay Time", self.decay_time);
        v.choice(path, "Depth Map Transport Hint", self.depth_map_transport_hint.as_ref());
        v.color(path, "Max Color", self.max_color);
        v.finite(path, "Max Intensity", self.max_intensity);
        v.color(path, "Min Color", self.min_color);
        v.finite(path, "Min Intensity", self.min_intensity);
        v.bounds(path, "Min Intensity", self.min_intensity, self.max_intensity);
        v.nested(path, "Occlusion Compensation", self.occlusion_compensation.as_ref());
        v.int_range(path, "Queue Size", self.queue_size, 0, i64::from(u32::MAX));
        v.non_negative(path, "Size (Pixels)", self.size_pixels);
        v.non_negative(path, "Size (m)", self.size_m);
        v.choice(path, "Style", self.style.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseErrorKind, ValidationErrorKind};
    use crate::fields::{read_section, write_section};
    use crate::options::ValidationOptions;

    fn read(text: &str) -> Result<DepthCloud, ParseError> {
        read_section("DepthCloud", serde_yaml::from_str(text).unwrap())
    }

    fn errors(cloud: &DepthCloud) -> Vec<ValidationErrorKind> {
        let options = ValidationOptions::default();
        let mut v = Validator::new(&options);
        cloud.validate("DepthCloud", &mut v);
        v.errors().iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_intensity_bounds_validate() {
        let cloud = read("Max Intensity: 4096\nMin Intensity: 0\nStyle: Flat Squares\n").unwrap();
        assert_eq!(cloud.max_intensity, Some(4096.0));
        assert_eq!(cloud.min_intensity, Some(0.0));
        assert_eq!(cloud.style.as_ref().and_then(Choice::get), Some(PointStyle::FlatSquares));
        assert!(errors(&cloud).is_empty());
    }

    #[test]
    fn test_non_numeric_intensity_is_parse_error() {
        let err = read("Max Intensity: 4096\nMin Intensity: zero\n").unwrap_err();
        assert_eq!(err.path, "DepthCloud/Min Intensity");
        assert!(matches!(err.kind, ParseErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_transport_hints_checked() {
        let cloud = read("Color Transport Hint: raw\nDepth Map Transport Hint: jpeg\n").unwrap();
        let errors = errors(&cloud);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationErrorKind::UnknownVariant { value, .. } if value == "jpeg"
        ));
    }

    #[test]
    fn test_inverted_intensity_bounds() {
        let cloud = read("Max Intensity: 0\nMin Intensity: 4096\n").unwrap();
        assert_eq!(
            errors(&cloud),
            vec![ValidationErrorKind::InvertedBounds { min: 4096.0, max: 0.0 }]
        );
    }

    #[test]
    fn test_value_bound_sentinels_accepted() {
        let text = r"
Autocompute Value Bounds:
  Max Value: -999999
  Min Value: 999999
  Value: true
";
        assert!(errors(&read(text).unwrap()).is_empty());
        let fixed = text.replace("Value: true", "Value: false");
        assert_eq!(errors(&read(&fixed).unwrap()).len(), 1);
    }

    #[test]
    fn test_nested_blocks() {
        let cloud = read(
            r"
Auto Size:
  Auto Size Factor: 1
  Value: true
Occlusion Compensation:
  Occlusion Time-Out: -30
  Value: false
",
        )
        .unwrap();
        assert_eq!(cloud.auto_size.as_ref().and_then(|a| a.value), Some(true));
        assert_eq!(errors(&cloud).len(), 1);
    }

    #[test]
    fn test_unknown_keys_in_blocks_kept() {
        let cloud = read(
            r"
Auto Size:
  Auto Size Factor: 1
  Scale Mode: linear
  Value: true
",
        )
        .unwrap();
        let auto_size = cloud.auto_size.as_ref().unwrap();
        assert_eq!(auto_size.extra.len(), 1);

        let written = write_section(&cloud);
        assert_eq!(written["Auto Size"]["Scale Mode"], serde_yaml::Value::from("linear"));
        assert_eq!(read_section::<DepthCloud>("DepthCloud", written).unwrap(), cloud);
    }
}
