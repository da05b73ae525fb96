//! Camera image display.

use crate::choice::{Choice, TransportHint};
use crate::error::ParseError;
use crate::fields::{FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// Settings of an `Image` display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub image_topic: Option<String>,
    pub max_value: Option<f64>,
    pub median_window: Option<i64>,
    pub min_value: Option<f64>,
    pub normalize_range: Option<bool>,
    pub queue_size: Option<i64>,
    pub transport_hint: Option<Choice<TransportHint>>,
    pub unreliable: Option<bool>,
}

impl Image {
    /// Creates image settings subscribed to `topic` over raw transport.
    pub fn subscribed(topic: impl Into<String>) -> Self {
        Self {
            image_topic: Some(topic.into()),
            max_value: Some(1.0),
            median_window: Some(5),
            min_value: Some(0.0),
            normalize_range: Some(true),
            queue_size: Some(2),
            transport_hint: Some(Choice::new(TransportHint::Raw)),
            unreliable: Some(false),
        }
    }
}

impl Section for Image {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            image_topic: f.string("Image Topic")?,
            max_value: f.float("Max Value")?,
            median_window: f.int("Median window")?,
            min_value: f.float("Min Value")?,
            normalize_range: f.bool("Normalize Range")?,
            queue_size: f.int("Queue Size")?,
            transport_hint: f.choice("Transport Hint")?,
            unreliable: f.bool("Unreliable")?,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.string("Image Topic", self.image_topic.as_deref());
        out.float("Max Value", self.max_value);
        out.int("Median window", self.median_window);
        out.float("Min Value", self.min_value);
        out.bool("Normalize Range", self.normalize_range);
        out.int("Queue Size", self.queue_size);
        out.choice("Transport Hint", self.transport_hint.as_ref());
        out.bool("Unreliable", self.unreliable);
    }
}

impl Validate for Image {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.finite(path, "Max Value", self.max_value);
        v.int_range(path, "Median window", self.median_window, 0, i64::from(u32::MAX));
        v.finite(path, "Min Value", self.min_value);
        // Bounds are ignored while the range is normalized automatically.
        if self.normalize_range != Some(true) {
            v.bounds(path, "Min Value", self.min_value, self.max_value);
        }
        v.int_range(path, "Queue Size", self.queue_size, 0, i64::from(u32::MAX));
        v.choice(path, "Transport Hint", self.transport_hint.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::fields::read_section;
    use crate::options::ValidationOptions;

    fn errors(image: &Image) -> Vec<ValidationErrorKind> {
        let options = ValidationOptions::default();
        let mut v = Validator::new(&options);
        image.validate("Image", &mut v);
        v.errors().iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_subscribed_is_valid() {
        assert!(errors(&Image::subscribed("/seg_image")).is_empty());
    }

    #[test]
    fn test_read_image() {
        let image: Image = read_section(
            "Image",
            serde_yaml::from_str(
                r"
Image Topic: /seg_label
Transport Hint: compressed
Queue Size: 2
Unreliable: false
",
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(image.image_topic.as_deref(), Some("/seg_label"));
        assert_eq!(
            image.transport_hint.as_ref().and_then(Choice::get),
            Some(TransportHint::Compressed)
        );
    }

    #[test]
    fn test_unknown_transport_hint_rejected() {
        let image = Image {
            transport_hint: Some(Choice::from_raw("theora")),
            ..Image::default()
        };
        assert_eq!(errors(&image).len(), 1);
    }

    #[test]
    fn test_bounds_only_checked_without_normalization() {
        let mut image = Image {
            max_value: Some(0.0),
            min_value: Some(1.0),
            normalize_range: Some(true),
            ..Image::default()
        };
        assert!(errors(&image).is_empty());
        image.normalize_range = Some(false);
        assert_eq!(errors(&image).len(), 1);
    }
}
