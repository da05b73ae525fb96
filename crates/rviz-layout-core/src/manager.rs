//! The `Visualization Manager` section: global options, displays, tools
//! and views.

use serde_yaml::{Mapping, Value};

use crate::color::Color;
use crate::display::DisplayList;
use crate::error::ParseError;
use crate::fields::{join_path, FieldWriter, Fields, Section};
use crate::validate::{Validate, Validator};
use crate::view::Views;

/// The `Global Options` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalOptions {
    pub background_color: Option<Color>,
    pub default_light: Option<bool>,
    /// Frame all displays are transformed into.
    pub fixed_frame: Option<String>,
    /// Target render rate in frames per second.
    pub frame_rate: Option<i64>,
    pub extra: Mapping,
}

impl Section for GlobalOptions {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            background_color: f.color("Background Color")?,
            default_light: f.bool("Default Light")?,
            fixed_frame: f.string("Fixed Frame")?,
            frame_rate: f.int("Frame Rate")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.color("Background Color", self.background_color);
        out.bool("Default Light", self.default_light);
        out.string("Fixed Frame", self.fixed_frame.as_deref());
        out.int("Frame Rate", self.frame_rate);
        out.extend(&self.extra);
    }
}

impl Validate for GlobalOptions {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        v.color(path, "Background Color", self.background_color);
        v.int_range(path, "Frame Rate", self.frame_rate, 1, 1000);
    }
}

/// An interaction tool on the toolbar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tool {
    /// Tool plugin class, e.g. `rviz/SetGoal`.
    pub class: String,
    /// Topic the tool publishes on, for tools that publish. Newer hosts
    /// write the topic as a mapping with QoS settings; that form is kept
    /// in `extra` and this field stays `None`.
    pub topic: Option<String>,
    pub extra: Mapping,
}

impl Section for Tool {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        let class = f.string("Class")?;
        let topic = match f.peek("Topic") {
            Some(Value::Mapping(_)) => None,
            _ => f.string("Topic")?,
        };
        Ok(Self {
            class: f.require("Class", class)?,
            topic,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.string("Class", Some(&self.class));
        out.string("Topic", self.topic.as_deref());
        out.extend(&self.extra);
    }
}

/// The `Visualization Manager` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualizationManager {
    pub class: Option<String>,
    pub displays: DisplayList,
    pub enabled: Option<bool>,
    pub global_options: Option<GlobalOptions>,
    pub name: Option<String>,
    pub tools: Option<Vec<Tool>>,
    pub value: Option<bool>,
    pub views: Option<Views>,
    pub extra: Mapping,
}

impl Section for VisualizationManager {
    fn read(f: &mut Fields) -> Result<Self, ParseError> {
        Ok(Self {
            class: f.string("Class")?,
            displays: DisplayList::read_field(f, "Displays")?,
            enabled: f.bool("Enabled")?,
            global_options: f.section("Global Options")?,
            name: f.string("Name")?,
            tools: f.sections("Tools")?,
            value: f.bool("Value")?,
            views: f.section("Views")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.string("Class", self.class.as_deref());
        out.value("Displays", self.displays.to_value());
        out.bool("Enabled", self.enabled);
        out.section("Global Options", self.global_options.as_ref());
        out.string("Name", self.name.as_deref());
        out.sections("Tools", self.tools.as_deref());
        out.bool("Value", self.value);
        out.section("Views", self.views.as_ref());
        out.extend(&self.extra);
    }
}

impl Validate for VisualizationManager {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        self.displays.validate(&join_path(path, "Displays"), v);
        v.nested(path, "Global Options", self.global_options.as_ref());
        v.nested(path, "Views", self.views.as_ref());
    }
}
