//! Typed access to the YAML mappings that make up a layout.
//!
//! [`Fields`] consumes known keys from a mapping one at a time, checking
//! each value's type. Whatever is left afterwards is returned by
//! [`Fields::rest`] and kept verbatim by the owning section. [`FieldWriter`]
//! performs the reverse, emitting keys in sorted order.

use glam::DVec3;
use serde_yaml::{Mapping, Value};

use crate::choice::{Choice, Keyword};
use crate::color::Color;
use crate::error::{ParseError, ParseErrorKind};

/// A node of the layout tree that maps to one YAML mapping.
pub trait Section: Sized {
    /// Reads the section's known fields. Unknown fields must be collected
    /// with [`Fields::rest`] after every known key has been taken.
    fn read(fields: &mut Fields) -> Result<Self, ParseError>;

    /// Writes the section's fields, including any preserved unknown ones.
    fn write(&self, out: &mut FieldWriter);
}

/// Reads a section from a value, using `path` for error reporting.
pub fn read_section<T: Section>(path: &str, value: Value) -> Result<T, ParseError> {
    let mut fields = Fields::new(path, value)?;
    T::read(&mut fields)
}

/// Writes a section into a standalone mapping value.
pub fn write_section<T: Section>(section: &T) -> Value {
    let mut out = FieldWriter::new();
    section.write(&mut out);
    out.into_value()
}

/// Joins a parent path and a key.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}/{key}")
    }
}

/// Describes a value's type for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string '{s}'"),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(t) => format!("tagged value {}", t.tag),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Converts a value into a mapping or fails with `ExpectedMapping`.
pub fn expect_mapping(path: &str, value: Value) -> Result<Mapping, ParseError> {
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(ParseError::new(
            path,
            ParseErrorKind::ExpectedMapping(kind_name(&other)),
        )),
    }
}

/// Converts a value into a sequence or fails with `ExpectedSequence`.
///
/// A null value (`Saved: ~`) is read as an empty sequence.
pub fn expect_sequence(path: &str, value: Value) -> Result<Vec<Value>, ParseError> {
    match value {
        Value::Sequence(seq) => Ok(seq),
        Value::Null => Ok(Vec::new()),
        other => Err(ParseError::new(
            path,
            ParseErrorKind::ExpectedSequence(kind_name(&other)),
        )),
    }
}

/// Reader over the keys of one mapping.
#[derive(Debug)]
pub struct Fields {
    path: String,
    map: Mapping,
}

impl Fields {
    /// Wraps a value that must be a mapping.
    pub fn new(path: impl Into<String>, value: Value) -> Result<Self, ParseError> {
        let path = path.into();
        let map = expect_mapping(&path, value)?;
        Ok(Self { path, map })
    }

    pub fn from_mapping(path: impl Into<String>, map: Mapping) -> Self {
        Self {
            path: path.into(),
            map,
        }
    }

    /// Returns the path of this mapping.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path of a key inside this mapping.
    pub fn child_path(&self, key: &str) -> String {
        join_path(&self.path, key)
    }

    /// Returns a value without consuming it.
    pub fn peek(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Removes and returns a raw value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key)
    }

    /// Removes and returns all keys not yet taken.
    pub fn rest(&mut self) -> Mapping {
        std::mem::take(&mut self.map)
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &Value) -> ParseError {
        ParseError::new(
            self.child_path(key),
            ParseErrorKind::TypeMismatch {
                expected,
                found: describe(found),
            },
        )
    }

    /// Fails with `MissingField` if `value` is `None`.
    pub fn require<T>(&self, key: &'static str, value: Option<T>) -> Result<T, ParseError> {
        value.ok_or_else(|| ParseError::new(self.path.clone(), ParseErrorKind::MissingField(key)))
    }

    pub fn bool(&mut self, key: &str) -> Result<Option<bool>, ParseError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(other) => Err(self.mismatch(key, "a boolean", &other)),
        }
    }

    /// Reads a number; integers are widened.
    pub fn float(&mut self, key: &str) -> Result<Option<f64>, ParseError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) => Ok(Some(f)),
                None => Err(self.mismatch(key, "a number", &Value::Number(n))),
            },
            Some(other) => Err(self.mismatch(key, "a number", &other)),
        }
    }

    pub fn int(&mut self, key: &str) -> Result<Option<i64>, ParseError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Some(i)),
                None => Err(self.mismatch(key, "an integer", &Value::Number(n))),
            },
            Some(other) => Err(self.mismatch(key, "an integer", &other)),
        }
    }

    /// Reads a string. Numbers and booleans are accepted in their textual
    /// form since plain YAML scalars like `Name: 1` decode as numbers.
    pub fn string(&mut self, key: &str) -> Result<Option<String>, ParseError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(self.mismatch(key, "a string", &other)),
        }
    }

    pub fn color(&mut self, key: &str) -> Result<Option<Color>, ParseError> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => s.parse::<Color>().map(Some).map_err(|_| {
                ParseError::new(self.child_path(key), ParseErrorKind::MalformedColor(s))
            }),
            Some(other) => Err(self.mismatch(key, "a color string", &other)),
        }
    }

    pub fn choice<T: Keyword>(&mut self, key: &str) -> Result<Option<Choice<T>>, ParseError> {
        Ok(self.string(key)?.map(Choice::from_raw))
    }

    /// Reads a `{X, Y, Z}` mapping. All three axes are required and no
    /// other key is allowed.
    pub fn vec3(&mut self, key: &str) -> Result<Option<DVec3>, ParseError> {
        let Some(value) = self.take(key) else {
            return Ok(None);
        };
        let mut axes = Fields::new(self.child_path(key), value)?;
        let x = axes.float("X")?;
        let y = axes.float("Y")?;
        let z = axes.float("Z")?;
        if let Some((extra, _)) = axes.rest().into_iter().next() {
            let name = match extra {
                Value::String(s) => s,
                other => describe(&other),
            };
            return Err(ParseError::new(
                axes.child_path(&name),
                ParseErrorKind::UnexpectedField(name),
            ));
        }
        Ok(Some(DVec3::new(
            axes.require("X", x)?,
            axes.require("Y", y)?,
            axes.require("Z", z)?,
        )))
    }

    /// Reads a nested section.
    pub fn section<T: Section>(&mut self, key: &str) -> Result<Option<T>, ParseError> {
        match self.take(key) {
            None => Ok(None),
            Some(value) => read_section(&self.child_path(key), value).map(Some),
        }
    }

    /// Reads a sequence of nested sections.
    pub fn sections<T: Section>(&mut self, key: &str) -> Result<Option<Vec<T>>, ParseError> {
        let Some(value) = self.take(key) else {
            return Ok(None);
        };
        let path = self.child_path(key);
        expect_sequence(&path, value)?
            .into_iter()
            .enumerate()
            .map(|(i, item)| read_section(&format!("{path}[{i}]"), item))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Reads a sequence of strings.
    pub fn strings(&mut self, key: &str) -> Result<Option<Vec<String>>, ParseError> {
        let Some(value) = self.take(key) else {
            return Ok(None);
        };
        let path = self.child_path(key);
        expect_sequence(&path, value)?
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(ParseError::new(
                    format!("{path}[{i}]"),
                    ParseErrorKind::TypeMismatch {
                        expected: "a string",
                        found: describe(&other),
                    },
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Converts a float to a YAML number, writing integral values without a
/// fractional part the way the host does (`Alpha: 1`).
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn number(value: f64) -> Value {
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Builder for one output mapping.
#[derive(Debug, Default)]
pub struct FieldWriter {
    entries: Vec<(Value, Value)>,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw value.
    pub fn value(&mut self, key: &str, value: Value) {
        self.entries.push((Value::String(key.to_string()), value));
    }

    pub fn bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(b) = value {
            self.value(key, Value::Bool(b));
        }
    }

    pub fn float(&mut self, key: &str, value: Option<f64>) {
        if let Some(f) = value {
            self.value(key, number(f));
        }
    }

    pub fn int(&mut self, key: &str, value: Option<i64>) {
        if let Some(i) = value {
            self.value(key, Value::from(i));
        }
    }

    pub fn string(&mut self, key: &str, value: Option<&str>) {
        if let Some(s) = value {
            self.value(key, Value::String(s.to_string()));
        }
    }

    pub fn color(&mut self, key: &str, value: Option<Color>) {
        if let Some(c) = value {
            self.value(key, Value::String(c.to_string()));
        }
    }

    pub fn choice<T: Keyword>(&mut self, key: &str, value: Option<&Choice<T>>) {
        self.string(key, value.map(Choice::raw));
    }

    pub fn vec3(&mut self, key: &str, value: Option<DVec3>) {
        if let Some(v) = value {
            let mut axes = FieldWriter::new();
            axes.float("X", Some(v.x));
            axes.float("Y", Some(v.y));
            axes.float("Z", Some(v.z));
            self.value(key, axes.into_value());
        }
    }

    pub fn section<T: Section>(&mut self, key: &str, value: Option<&T>) {
        if let Some(s) = value {
            self.value(key, write_section(s));
        }
    }

    pub fn sections<T: Section>(&mut self, key: &str, value: Option<&[T]>) {
        if let Some(items) = value {
            self.value(
                key,
                Value::Sequence(items.iter().map(write_section).collect()),
            );
        }
    }

    pub fn strings(&mut self, key: &str, value: Option<&[String]>) {
        if let Some(items) = value {
            self.value(
                key,
                Value::Sequence(items.iter().cloned().map(Value::String).collect()),
            );
        }
    }

    /// Adds preserved unknown keys.
    pub fn extend(&mut self, extra: &Mapping) {
        self.entries
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Finishes the mapping with keys in sorted order.
    pub fn into_value(mut self) -> Value {
        self.entries
            .sort_by(|(a, _), (b, _)| sort_key(a).cmp(sort_key(b)));
        Value::Mapping(self.entries.into_iter().collect())
    }
}

fn sort_key(key: &Value) -> &str {
    key.as_str().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fields(text: &str) -> Fields {
        Fields::new("Test", serde_yaml::from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn test_typed_reads() {
        let mut f = fields("Enabled: true\nAlpha: 0.5\nQueue Size: 5\nTopic: /points\n");
        assert_eq!(f.bool("Enabled").unwrap(), Some(true));
        assert_eq!(f.float("Alpha").unwrap(), Some(0.5));
        assert_eq!(f.int("Queue Size").unwrap(), Some(5));
        assert_eq!(f.string("Topic").unwrap().as_deref(), Some("/points"));
        assert!(f.rest().is_empty());
    }

    #[test]
    fn test_missing_keys_are_none() {
        let mut f = fields("{}");
        assert_eq!(f.bool("Enabled").unwrap(), None);
        assert_eq!(f.color("Color").unwrap(), None);
    }

    #[test]
    fn test_integer_widens_to_float() {
        let mut f = fields("Max Intensity: 4096");
        assert_eq!(f.float("Max Intensity").unwrap(), Some(4096.0));
    }

    #[test]
    fn test_float_rejects_string() {
        let mut f = fields("Min Intensity: abc");
        let err = f.float("Min Intensity").unwrap_err();
        assert_eq!(err.path, "Test/Min Intensity");
        assert!(matches!(err.kind, ParseErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_int_rejects_float() {
        let mut f = fields("Queue Size: 2.5");
        assert!(f.int("Queue Size").is_err());
    }

    #[test]
    fn test_bool_rejects_string() {
        let mut f = fields("Enabled: yes please");
        assert!(f.bool("Enabled").is_err());
    }

    #[test]
    fn test_string_accepts_numbers() {
        let mut f = fields("Name: 42");
        assert_eq!(f.string("Name").unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn test_malformed_color() {
        let mut f = fields("Color: 255; abc; 0");
        let err = f.color("Color").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MalformedColor("255; abc; 0".to_string())
        );
    }

    #[test]
    fn test_vec3_requires_all_axes() {
        let mut f = fields("Offset: {X: 1, Y: 2}");
        let err = f.vec3("Offset").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingField("Z"));
        assert_eq!(err.path, "Test/Offset");
    }

    #[test]
    fn test_vec3_rejects_extra_axes() {
        let mut f = fields("Offset: {X: 1, Y: 2, Z: 3, W: 4}");
        let err = f.vec3("Offset").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedField("W".to_string()));
        assert_eq!(err.path, "Test/Offset/W");
    }

    #[test]
    fn test_rest_keeps_unknown_keys() {
        let mut f = fields("Alpha: 1\nCustom: value\n");
        f.float("Alpha").unwrap();
        let rest = f.rest();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest.get("Custom"), Some(&Value::String("value".into())));
    }

    #[test]
    fn test_number_writes_integral_floats_as_ints() {
        assert_eq!(number(1.0), Value::from(1_i64));
        assert_eq!(number(0.5), Value::from(0.5));
        assert!(number(f64::NAN).as_f64().unwrap().is_nan());
    }

    #[test]
    fn test_writer_sorts_keys() {
        let mut w = FieldWriter::new();
        w.string("Name", Some("Grid"));
        w.float("Alpha", Some(0.5));
        w.bool("Value", None);
        let Value::Mapping(map) = w.into_value() else {
            panic!("expected mapping");
        };
        let keys: Vec<_> = map.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Alpha", "Name"]);
    }

    proptest! {
        #[test]
        fn test_written_floats_read_back(
            value in prop_oneof![
                -1.0e12f64..1.0e12,
                (-1_000_000i32..1_000_000).prop_map(f64::from),
            ]
        ) {
            let mut out = FieldWriter::new();
            out.float("Alpha", Some(value));
            let text = serde_yaml::to_string(&out.into_value()).unwrap();
            prop_assert_eq!(fields(&text).float("Alpha").unwrap(), Some(value));
        }
    }
}
