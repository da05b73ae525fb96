//! Grid overlay display.

use glam::DVec3;
use serde_yaml::Mapping;

use crate::choice::{Choice, Keyword};
use crate::color::Color;
use crate::error::ParseError;
use crate::fields::{FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// Plane the grid is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPlane {
    #[default]
    XY,
    XZ,
    YZ,
}

impl Keyword for GridPlane {
    const KEYWORDS: &'static [(&'static str, Self)] =
        &[("XY", Self::XY), ("XZ", Self::XZ), ("YZ", Self::YZ)];
}

/// How grid lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyleKind {
    #[default]
    Lines,
    Billboards,
}

impl Keyword for LineStyleKind {
    const KEYWORDS: &'static [(&'static str, Self)] =
        &[("Lines", Self::Lines), ("Billboards", Self::Billboards)];
}

/// The `Line Style` block of a grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineStyle {
    /// Line width in meters, used by billboard lines.
    pub line_width: Option<f64>,
    pub value: Option<Choice<LineStyleKind>>,
    pub extra: Mapping,
}

impl Section for LineStyle {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            line_width: f.float("Line Width")?,
            value: f.choice("Value")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Line Width", self.line_width);
        out.choice("Value", self.value.as_ref());
        out.extend(&self.extra);
    }
}

impl Validate for LineStyle {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.non_negative(path, "Line Width", self.line_width);
        v.choice(path, "Value", self.value.as_ref());
    }
}

/// Settings of a `Grid` display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    pub alpha: Option<f64>,
    pub cell_size: Option<f64>,
    pub color: Option<Color>,
    pub line_style: Option<LineStyle>,
    pub normal_cell_count: Option<i64>,
    pub offset: Option<DVec3>,
    pub plane: Option<Choice<GridPlane>>,
    pub plane_cell_count: Option<i64>,
    pub reference_frame: Option<String>,
}

impl Grid {
    /// Returns the settings the host writes for a freshly added grid.
    pub fn host_defaults() -> Self {
        Self {
            alpha: Some(0.5),
            cell_size: Some(1.0),
            color: Some(Color::new(160, 160, 164)),
            line_style: Some(LineStyle {
                line_width: Some(0.03),
                value: Some(Choice::new(LineStyleKind::Lines)),
                extra: Mapping::new(),
            }),
            normal_cell_count: Some(0),
            offset: Some(DVec3::ZERO),
            plane: Some(Choice::new(GridPlane::XY)),
            plane_cell_count: Some(10),
            reference_frame: Some("<Fixed Frame>".to_string()),
        }
    }
}

impl Section for Grid {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            alpha: f.float("Alpha")?,
            cell_size: f.float("Cell Size")?,
            color: f.color("Color")?,
            line_style: f.section("Line Style")?,
            normal_cell_count: f.int("Normal Cell Count")?,
            offset: f.vec3("Offset")?,
            plane: f.choice("Plane")?,
            plane_cell_count: f.int("Plane Cell Count")?,
            reference_frame: f.string("Reference Frame")?,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.float("Alpha", self.alpha);
        out.float("Cell Size", self.cell_size);
        out.color("Color", self.color);
        out.section("Line Style", self.line_style.as_ref());
        out.int("Normal Cell Count", self.normal_cell_count);
        out.vec3("Offset", self.offset);
        out.choice("Plane", self.plane.as_ref());
        out.int("Plane Cell Count", self.plane_cell_count);
        out.string("Reference Frame", self.reference_frame.as_deref());
    }
}

impl Validate for Grid {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.unit_interval(path, "Alpha", self.alpha);
        v.range(path, "Cell Size", self.cell_size, 0.0001, f64::INFINITY);
        v.color(path, "Color", self.color);
        v.nested(path, "Line Style", self.line_style.as_ref());
        v.int_range(path, "Normal Cell Count", self.normal_cell_count, 0, 100_000);
        if let Some(offset) = self.offset {
            v.finite(path, "Offset/X", Some(offset.x));
            v.finite(path, "Offset/Y", Some(offset.y));
            v.finite(path, "Offset/Z", Some(offset.z));
        }
        v.choice(path, "Plane", self.plane.as_ref());
        v.int_range(path, "Plane Cell Count", self.plane_cell_count, 1, 100_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{read_section, write_section};
    use crate::options::ValidationOptions;

    fn check(grid: &Grid) -> usize {
        let options = ValidationOptions::default();
        let mut v = Validator::new(&options);
        grid.validate("Grid", &mut v);
        v.errors().len()
    }

    #[test]
    fn test_read_grid() {
        let value = serde_yaml::from_str(
            r"
Alpha: 0.5
Cell Size: 1
Color: 160; 160; 164
Line Style:
  Line Width: 0.03
  Value: Lines
Offset:
  X: 0
  Y: 0
  Z: 0
Plane: XY
Plane Cell Count: 10
",
        )
        .unwrap();
        let grid: Grid = read_section("Grid", value).unwrap();
        assert_eq!(grid.alpha, Some(0.5));
        assert_eq!(grid.color, Some(Color::new(160, 160, 164)));
        assert_eq!(grid.offset, Some(DVec3::ZERO));
        assert_eq!(grid.plane.as_ref().and_then(Choice::get), Some(GridPlane::XY));
        assert_eq!(check(&grid), 0);
    }

    #[test]
    fn test_host_defaults_are_valid() {
        assert_eq!(check(&Grid::host_defaults()), 0);
    }

    #[test]
    fn test_invalid_values() {
        let grid = Grid {
            alpha: Some(2.0),
            plane: Some(Choice::from_raw("XW")),
            plane_cell_count: Some(0),
            line_style: Some(LineStyle {
                line_width: Some(-1.0),
                value: Some(Choice::from_raw("Dashes")),
                extra: Mapping::new(),
            }),
            ..Grid::default()
        };
        assert_eq!(check(&grid), 5);
    }

    #[test]
    fn test_write_then_read_is_identity() {
        let grid = Grid::host_defaults();
        let back: Grid = read_section("Grid", write_section(&grid)).unwrap();
        assert_eq!(back, grid);
    }
}
