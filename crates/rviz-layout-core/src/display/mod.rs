//! Display entries and ordered display lists.
//!
//! A [`Display`] is one visual layer of the host: a common header (class,
//! name, toggles) plus kind-specific settings in [`DisplayKind`]. Displays
//! live in a [`DisplayList`] whose order is the host's tree/z-order.

mod depth_cloud;
mod grid;
mod image;
mod tf;

pub use depth_cloud::{AutoSize, DepthCloud, OcclusionCompensation, PointStyle, ValueBounds};
pub use grid::{Grid, GridPlane, LineStyle, LineStyleKind};
pub use image::Image;
pub use tf::{FrameToggle, Tf, TfFrames};

use serde_yaml::{Mapping, Value};

use crate::error::{LayoutError, ParseError, Result, ValidationErrorKind};
use crate::fields::{expect_sequence, join_path, write_section, FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// Display kinds that have a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayType {
    Grid,
    DepthCloud,
    Image,
    Tf,
    Group,
}

impl DisplayType {
    /// Resolves a class such as `rviz/Grid` or `rviz_default_plugins/TF`
    /// by its last path segment.
    pub fn from_class(class: &str) -> Option<Self> {
        match class.rsplit('/').next()? {
            "Grid" => Some(Self::Grid),
            "DepthCloud" => Some(Self::DepthCloud),
            "Image" => Some(Self::Image),
            "TF" => Some(Self::Tf),
            "Group" => Some(Self::Group),
            _ => None,
        }
    }

    /// Returns the class written for new displays of this type.
    pub fn default_class(self) -> &'static str {
        match self {
            Self::Grid => "rviz/Grid",
            Self::DepthCloud => "rviz/DepthCloud",
            Self::Image => "rviz/Image",
            Self::Tf => "rviz/TF",
            Self::Group => "rviz/Group",
        }
    }
}

/// Kind-specific settings of a display.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayKind {
    Grid(Grid),
    DepthCloud(DepthCloud),
    Image(Image),
    Tf(Tf),
    Group(Group),
    /// A class without a schema; all of its fields are kept in
    /// [`Display::extra`].
    Other,
}

impl DisplayKind {
    pub fn display_type(&self) -> Option<DisplayType> {
        match self {
            Self::Grid(_) => Some(DisplayType::Grid),
            Self::DepthCloud(_) => Some(DisplayType::DepthCloud),
            Self::Image(_) => Some(DisplayType::Image),
            Self::Tf(_) => Some(DisplayType::Tf),
            Self::Group(_) => Some(DisplayType::Group),
            Self::Other => None,
        }
    }

    fn read(
        display_type: Option<DisplayType>,
        f: &mut Fields,
    ) -> std::result::Result<Self, ParseError> {
        Ok(match display_type {
            Some(DisplayType::Grid) => Self::Grid(Grid::read(f)?),
            Some(DisplayType::DepthCloud) => Self::DepthCloud(DepthCloud::read(f)?),
            Some(DisplayType::Image) => Self::Image(Image::read(f)?),
            Some(DisplayType::Tf) => Self::Tf(Tf::read(f)?),
            Some(DisplayType::Group) => Self::Group(Group::read(f)?),
            None => Self::Other,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        match self {
            Self::Grid(grid) => grid.write(out),
            Self::DepthCloud(cloud) => cloud.write(out),
            Self::Image(image) => image.write(out),
            Self::Tf(tf) => tf.write(out),
            Self::Group(group) => group.write(out),
            Self::Other => {}
        }
    }
}

impl Validate for DisplayKind {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        match self {
            Self::Grid(grid) => grid.validate(path, v),
            Self::DepthCloud(cloud) => cloud.validate(path, v),
            Self::Image(image) => image.validate(path, v),
            Self::Tf(tf) => tf.validate(path, v),
            Self::Group(group) => group.validate(path, v),
            Self::Other => {}
        }
    }
}

/// One entry of a `Displays` list.
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    class: String,
    /// Name shown in the host's display tree; unique among siblings.
    pub name: String,
    /// Whether the display is active.
    pub enabled: Option<bool>,
    /// The tree checkbox state, stored independently of `enabled`.
    pub value: Option<bool>,
    kind: DisplayKind,
    /// Fields without a schema, kept verbatim.
    pub extra: Mapping,
}

impl Display {
    /// Creates a display of an arbitrary class. Classes with a schema get
    /// empty settings of the matching kind.
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        let class = class.into();
        let kind = match DisplayType::from_class(&class) {
            Some(DisplayType::Grid) => DisplayKind::Grid(Grid::default()),
            Some(DisplayType::DepthCloud) => DisplayKind::DepthCloud(DepthCloud::default()),
            Some(DisplayType::Image) => DisplayKind::Image(Image::default()),
            Some(DisplayType::Tf) => DisplayKind::Tf(Tf::default()),
            Some(DisplayType::Group) => DisplayKind::Group(Group::default()),
            None => DisplayKind::Other,
        };
        Self {
            class,
            name: name.into(),
            enabled: Some(true),
            value: Some(true),
            kind,
            extra: Mapping::new(),
        }
    }

    /// Creates an enabled display from typed settings, using the type's
    /// default class. Returns `None` for [`DisplayKind::Other`], which has
    /// no class; use [`Display::new`] for those.
    pub fn from_kind(name: impl Into<String>, kind: DisplayKind) -> Option<Self> {
        let display_type = kind.display_type()?;
        Some(Self {
            class: display_type.default_class().to_string(),
            name: name.into(),
            enabled: Some(true),
            value: Some(true),
            kind,
            extra: Mapping::new(),
        })
    }

    /// Sets both toggles.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self.value = Some(enabled);
        self
    }

    /// Returns the plugin class, e.g. `rviz/Grid`.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn kind(&self) -> &DisplayKind {
        &self.kind
    }

    /// Mutable access to the settings. Replacing the variant with one of a
    /// different type leaves the class unchanged; use [`Display::set_kind`]
    /// for that.
    pub fn kind_mut(&mut self) -> &mut DisplayKind {
        &mut self.kind
    }

    /// Replaces the settings, updating the class if the type changes.
    pub fn set_kind(&mut self, kind: DisplayKind) {
        if let Some(display_type) = kind.display_type() {
            if DisplayType::from_class(&self.class) != Some(display_type) {
                self.class = display_type.default_class().to_string();
            }
        }
        self.kind = kind;
    }

    pub fn display_type(&self) -> Option<DisplayType> {
        self.kind.display_type()
    }

    /// Returns true if the display is enabled; absent means enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Returns the nested displays of a group.
    pub fn children(&self) -> Option<&DisplayList> {
        match &self.kind {
            DisplayKind::Group(group) => Some(&group.displays),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut DisplayList> {
        match &mut self.kind {
            DisplayKind::Group(group) => Some(&mut group.displays),
            _ => None,
        }
    }
}

impl Section for Display {
    fn read(f: &mut Fields) -> std::result::Result<Self, ParseError> {
        let class = f.string("Class")?;
        let class = f.require("Class", class)?;
        let name = f.string("Name")?;
        let name = f.require("Name", name)?;
        let enabled = f.bool("Enabled")?;
        let value = f.bool("Value")?;
        let display_type = DisplayType::from_class(&class);
        if display_type.is_none() {
            log::debug!("{}: class '{class}' has no schema, keeping fields as written", f.path());
        }
        let kind = DisplayKind::read(display_type, f)?;
        Ok(Self {
            class,
            name,
            enabled,
            value,
            kind,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.string("Class", Some(&self.class));
        out.string("Name", Some(&self.name));
        out.bool("Enabled", self.enabled);
        out.bool("Value", self.value);
        self.kind.write(out);
        out.extend(&self.extra);
    }
}

impl Validate for Display {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        if self.name.trim().is_empty() {
            v.report(join_path(path, "Name"), ValidationErrorKind::EmptyName);
        }
        if self.kind.display_type().is_none() && v.options().reject_unknown_classes {
            v.report(
                join_path(path, "Class"),
                ValidationErrorKind::UnknownClass(self.class.clone()),
            );
        }
        self.kind.validate(path, v);
    }
}

/// A `Group` display: a nested list of displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub displays: DisplayList,
}

impl Section for Group {
    fn read(f: &mut Fields) -> std::result::Result<Self, ParseError> {
        Ok(Self {
            displays: DisplayList::read_field(f, "Displays")?,
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.value("Displays", self.displays.to_value());
    }
}

impl Validate for Group {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        self.displays.validate(&join_path(path, "Displays"), v);
    }
}

/// An ordered list of sibling displays.
///
/// Parsing accepts duplicate names so that they can be reported by
/// validation; the editing methods refuse to create them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayList {
    entries: Vec<Display>,
}

impl DisplayList {
    /// Creates a new empty list.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Reads a list from `key` of a mapping; a missing key is an empty list.
    pub fn read_field(f: &mut Fields, key: &str) -> std::result::Result<Self, ParseError> {
        let path = f.child_path(key);
        match f.take(key) {
            None => Ok(Self::new()),
            Some(value) => Self::read(&path, value),
        }
    }

    /// Reads a list from a sequence value.
    pub fn read(path: &str, value: Value) -> std::result::Result<Self, ParseError> {
        let entries = expect_sequence(path, value)?
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = match item.get("Name").and_then(Value::as_str) {
                    Some(name) => join_path(path, name),
                    None => format!("{path}[{i}]"),
                };
                let mut fields = Fields::new(item_path, item)?;
                Display::read(&mut fields)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Serializes the list as a YAML sequence.
    pub fn to_value(&self) -> Value {
        Value::Sequence(self.entries.iter().map(write_section).collect())
    }

    /// Appends a display.
    ///
    /// Returns an error if a sibling with the same name already exists.
    pub fn register(&mut self, display: Display) -> Result<()> {
        let index = self.entries.len();
        self.insert(index, display)
    }

    /// Inserts a display at `index`, clamped to the list length.
    ///
    /// Returns an error if a sibling with the same name already exists.
    pub fn insert(&mut self, index: usize, display: Display) -> Result<()> {
        if self.contains(&display.name) {
            return Err(LayoutError::DisplayExists(display.name));
        }
        let index = index.min(self.entries.len());
        self.entries.insert(index, display);
        Ok(())
    }

    /// Gets a display by name.
    pub fn get(&self, name: &str) -> Option<&Display> {
        self.entries.iter().find(|d| d.name == name)
    }

    /// Gets a mutable display by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Display> {
        self.entries.iter_mut().find(|d| d.name == name)
    }

    /// Checks if a display with the given name exists in this list.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the position of a display in this list.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|d| d.name == name)
    }

    /// Removes a display by name.
    pub fn remove(&mut self, name: &str) -> Option<Display> {
        let index = self.position(name)?;
        Some(self.entries.remove(index))
    }

    /// Moves a display to `index` (clamped), shifting the others.
    pub fn move_to(&mut self, name: &str, index: usize) -> Result<()> {
        let display = self
            .remove(name)
            .ok_or_else(|| LayoutError::DisplayNotFound(name.to_string()))?;
        let index = index.min(self.entries.len());
        self.entries.insert(index, display);
        Ok(())
    }

    /// Finds a display by name in this list or any nested group,
    /// depth-first in list order.
    pub fn find(&self, name: &str) -> Option<&Display> {
        self.entries.iter().find_map(|d| {
            if d.name == name {
                Some(d)
            } else {
                d.children().and_then(|c| c.find(name))
            }
        })
    }

    /// Mutable variant of [`DisplayList::find`].
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Display> {
        for display in &mut self.entries {
            if display.name == name {
                return Some(display);
            }
            if let Some(found) = display.children_mut().and_then(|c| c.find_mut(name)) {
                return Some(found);
            }
        }
        None
    }

    /// Returns an iterator over the displays in order.
    pub fn iter(&self) -> impl Iterator<Item = &Display> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over the displays in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Display> {
        self.entries.iter_mut()
    }

    /// Returns the number of displays in this list, not counting nested ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts displays in this list and every nested group.
    pub fn total_len(&self) -> usize {
        self.entries
            .iter()
            .map(|d| 1 + d.children().map_or(0, DisplayList::total_len))
            .sum()
    }
}

impl FromIterator<Display> for DisplayList {
    /// Collects displays without checking names.
    fn from_iter<I: IntoIterator<Item = Display>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a Display;
    type IntoIter = std::slice::Iter<'a, Display>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Validate for DisplayList {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.unique_names(path, self.entries.iter().map(|d| d.name.as_str()));
        for display in &self.entries {
            display.validate(&join_path(path, &display.name), v);
        }
    }
}
