//! Dock panels, toolbars and preferences.

use serde_yaml::Mapping;

use crate::error::ParseError;
use crate::fields::{join_path, FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};

/// The `Property Tree Widget` block of a panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyTreeWidget {
    /// Paths of expanded tree nodes, e.g. `/Global Options1`.
    pub expanded: Option<Vec<String>>,
    pub splitter_ratio: Option<f64>,
    pub extra: Mapping,
}

impl Section for PropertyTreeWidget {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            expanded: f.strings("Expanded")?,
            splitter_ratio: f.float("Splitter Ratio")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.strings("Expanded", self.expanded.as_deref());
        out.float("Splitter Ratio", self.splitter_ratio);
        out.extend(&self.extra);
    }
}

impl Validate for PropertyTreeWidget {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.unit_interval(path, "Splitter Ratio", self.splitter_ratio);
    }
}

/// One dock panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    /// Panel plugin class, e.g. `rviz/Displays`.
    pub class: String,
    pub name: Option<String>,
    pub help_height: Option<i64>,
    pub property_tree_widget: Option<PropertyTreeWidget>,
    pub splitter_ratio: Option<f64>,
    pub tree_height: Option<i64>,
    pub extra: Mapping,
}

impl Panel {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Section for Panel {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        let class = f.string("Class")?;
        Ok(Self {
            class: f.require("Class", class)?,
            name: f.string("Name")?,
            help_height: f.int("Help Height")?,
            property_tree_widget: f.section("Property Tree Widget")?,
            splitter_ratio: f.float("Splitter Ratio")?,
            tree_height: f.int("Tree Height")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.string("Class", Some(&self.class));
        out.string("Name", self.name.as_deref());
        out.int("Help Height", self.help_height);
        out.section("Property Tree Widget", self.property_tree_widget.as_ref());
        out.float("Splitter Ratio", self.splitter_ratio);
        out.int("Tree Height", self.tree_height);
        out.extend(&self.extra);
    }
}

impl Validate for Panel {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.int_range(path, "Help Height", self.help_height, 0, i64::from(i32::MAX));
        v.nested(path, "Property Tree Widget", self.property_tree_widget.as_ref());
        v.unit_interval(path, "Splitter Ratio", self.splitter_ratio);
        v.int_range(path, "Tree Height", self.tree_height, 0, i64::from(i32::MAX));
    }
}

/// Validates the `Panels` list, including name uniqueness.
pub(crate) fn validate_panels(panels: &[Panel], path: &str, v: &mut Validator<'_>) {
    v.unique_names(path, panels.iter().filter_map(|p| p.name.as_deref()));
    for (i, panel) in panels.iter().enumerate() {
        let panel_path = match &panel.name {
            Some(name) => join_path(path, name),
            None => format!("{path}[{i}]"),
        };
        panel.validate(&panel_path, v);
    }
}

/// The `Preferences` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    pub prompt_save_on_exit: Option<bool>,
    pub extra: Mapping,
}

impl Section for Preferences {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            prompt_save_on_exit: f.bool("PromptSaveOnExit")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.bool("PromptSaveOnExit", self.prompt_save_on_exit);
        out.extend(&self.extra);
    }
}

/// The `Toolbars` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Toolbars {
    /// Qt tool button style, 0 (icon only) to 4 (follow style).
    pub tool_button_style: Option<i64>,
    pub extra: Mapping,
}

impl Section for Toolbars {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            tool_button_style: f.int("toolButtonStyle")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.int("toolButtonStyle", self.tool_button_style);
        out.extend(&self.extra);
    }
}

impl Validate for Toolbars {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.int_range(path, "toolButtonStyle", self.tool_button_style, 0, 4);
    }
}
