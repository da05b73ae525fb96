//! Domain checks over a parsed layout.
//!
//! Parsing guarantees every known field has the right type; validation
//! checks the values themselves and collects every violation rather than
//! stopping at the first.

use std::collections::HashSet;

use crate::choice::{Choice, Keyword};
use crate::color::Color;
use crate::document::Document;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::fields::join_path;
use crate::options::ValidationOptions;

/// A layout node whose values can be checked.
pub trait Validate {
    /// Reports every violation under `path` to the validator.
    fn validate(&self, path: &str, v: &mut Validator<'_>);
}

/// Collects validation errors while walking a document.
#[derive(Debug)]
pub struct Validator<'a> {
    options: &'a ValidationOptions,
    errors: Vec<ValidationError>,
}

impl<'a> Validator<'a> {
    pub fn new(options: &'a ValidationOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        self.options
    }

    /// Records a violation.
    pub fn report(&mut self, path: impl Into<String>, kind: ValidationErrorKind) {
        self.errors.push(ValidationError::new(path, kind));
    }

    /// Checks that a number lies in `[min, max]`.
    pub fn range(&mut self, path: &str, key: &str, value: Option<f64>, min: f64, max: f64) {
        let Some(value) = value else { return };
        if !value.is_finite() {
            self.report(join_path(path, key), ValidationErrorKind::NotFinite(value));
        } else if !(min..=max).contains(&value) {
            self.report(
                join_path(path, key),
                ValidationErrorKind::OutOfRange { value, min, max },
            );
        }
    }

    /// Checks that a number lies in `[0, 1]`.
    pub fn unit_interval(&mut self, path: &str, key: &str, value: Option<f64>) {
        self.range(path, key, value, 0.0, 1.0);
    }

    /// Checks that a number is finite and not negative.
    pub fn non_negative(&mut self, path: &str, key: &str, value: Option<f64>) {
        self.range(path, key, value, 0.0, f64::INFINITY);
    }

    /// Checks that a number is finite.
    pub fn finite(&mut self, path: &str, key: &str, value: Option<f64>) {
        self.range(path, key, value, f64::NEG_INFINITY, f64::INFINITY);
    }

    /// Checks that an integer lies in `[min, max]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn int_range(&mut self, path: &str, key: &str, value: Option<i64>, min: i64, max: i64) {
        let Some(value) = value else { return };
        if !(min..=max).contains(&value) {
            self.report(
                join_path(path, key),
                ValidationErrorKind::OutOfRange {
                    value: value as f64,
                    min: min as f64,
                    max: max as f64,
                },
            );
        }
    }

    /// Checks that every color component lies in 0-255.
    pub fn color(&mut self, path: &str, key: &str, value: Option<Color>) {
        let Some(color) = value else { return };
        for component in color.components() {
            if !(0..=255).contains(&component) {
                self.report(
                    join_path(path, key),
                    ValidationErrorKind::ColorComponent(component),
                );
            }
        }
    }

    /// Checks that an enumerated field holds a known keyword.
    pub fn choice<T: Keyword>(&mut self, path: &str, key: &str, value: Option<&Choice<T>>) {
        let Some(choice) = value else { return };
        if !choice.is_known() {
            self.report(
                join_path(path, key),
                ValidationErrorKind::UnknownVariant {
                    value: choice.raw().to_string(),
                    allowed: T::allowed(),
                },
            );
        }
    }

    /// Checks that a lower bound does not exceed its upper bound.
    pub fn bounds(&mut self, path: &str, min_key: &str, min: Option<f64>, max: Option<f64>) {
        if !self.options.check_bounds_order {
            return;
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                self.report(
                    join_path(path, min_key),
                    ValidationErrorKind::InvertedBounds { min, max },
                );
            }
        }
    }

    /// Reports each repeated name in a sibling list.
    pub fn unique_names<'n>(&mut self, path: &str, names: impl IntoIterator<Item = &'n str>) {
        if !self.options.require_unique_names {
            return;
        }
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                self.report(
                    join_path(path, name),
                    ValidationErrorKind::DuplicateName(name.to_string()),
                );
            }
        }
    }

    /// Validates an optional nested section under `path/key`.
    pub fn nested<T: Validate>(&mut self, path: &str, key: &str, value: Option<&T>) {
        if let Some(section) = value {
            section.validate(&join_path(path, key), self);
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns `Ok` if nothing was reported.
    pub fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validates a document with default options.
pub fn validate(document: &Document) -> Result<(), Vec<ValidationError>> {
    validate_with(document, &ValidationOptions::default())
}

/// Validates a document, collecting every violation.
pub fn validate_with(
    document: &Document,
    options: &ValidationOptions,
) -> Result<(), Vec<ValidationError>> {
    let mut validator = Validator::new(options);
    document.validate("", &mut validator);
    let result = validator.finish();
    match &result {
        Ok(()) => log::debug!("layout validated"),
        Err(errors) => log::debug!("layout has {} validation error(s)", errors.len()),
    }
    result
}
