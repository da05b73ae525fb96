//! The layout document: parsing and serialization.

use std::str::FromStr;

use serde_yaml::{Mapping, Value};

use crate::display::DisplayList;
use crate::error::{ParseError, Result};
use crate::fields::{read_section, FieldWriter, Fields, Section};
use crate::manager::VisualizationManager;
use crate::panels::{validate_panels, Panel, Preferences, Toolbars};
use crate::validate::{Validate, Validator};
use crate::window::WindowGeometry;

/// A complete display layout.
///
/// Every section is optional. Unknown top-level keys are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub panels: Option<Vec<Panel>>,
    pub preferences: Option<Preferences>,
    pub toolbars: Option<Toolbars>,
    pub visualization_manager: Option<VisualizationManager>,
    pub window_geometry: Option<WindowGeometry>,
    pub extra: Mapping,
}

impl Document {
    /// Parses layout text.
    ///
    /// Fails on the first structural or type error.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| ParseError::syntax(&e))?;
        let document: Self = read_section("", value)?;
        log::debug!(
            "parsed layout with {} display(s)",
            document.displays().map_or(0, DisplayList::total_len)
        );
        Ok(document)
    }

    /// Converts the document to a YAML value tree.
    pub fn to_value(&self) -> Value {
        let mut out = FieldWriter::new();
        self.write(&mut out);
        out.into_value()
    }

    /// Serializes the document as layout text.
    ///
    /// Output is deterministic: keys are sorted and parsing it again yields
    /// a document equal to `self`.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_value())?)
    }

    /// Returns the top-level display list, if the document has a
    /// `Visualization Manager` section.
    pub fn displays(&self) -> Option<&DisplayList> {
        self.visualization_manager.as_ref().map(|m| &m.displays)
    }

    /// Returns the top-level display list, creating an empty
    /// `Visualization Manager` section if needed.
    pub fn displays_mut(&mut self) -> &mut DisplayList {
        &mut self
            .visualization_manager
            .get_or_insert_with(VisualizationManager::default)
            .displays
    }
}

impl Section for Document {
    fn read(f: &mut Fields) -> std::result::Result<Self, ParseError> {
        Ok(Self {
            panels: f.sections("Panels")?,
            preferences: f.section("Preferences")?,
            toolbars: f.section("Toolbars")?,
            visualization_manager: f.section("Visualization Manager")?,
            window_geometry: f.section("Window Geometry")?,
            extra: f.rest(),
        })
    }

    fn write(&self, out: &mut FieldWriter) {
        out.sections("Panels", self.panels.as_deref());
        out.section("Preferences", self.preferences.as_ref());
        out.section("Toolbars", self.toolbars.as_ref());
        out.section("Visualization Manager", self.visualization_manager.as_ref());
        out.section("Window Geometry", self.window_geometry.as_ref());
        out.extend(&self.extra);
    }
}

impl Validate for Document {
    fn validate(&self, path: &str, v: &mut Validator<'_>) {
        if let Some(panels) = &self.panels {
            validate_panels(panels, &crate::fields::join_path(path, "Panels"), v);
        }
        v.nested(path, "Toolbars", self.toolbars.as_ref());
        v.nested(path, "Visualization Manager", self.visualization_manager.as_ref());
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses layout text into a document.
pub fn parse(text: &str) -> std::result::Result<Document, ParseError> {
    Document::parse(text)
}

/// Serializes a document to layout text.
pub fn serialize(document: &Document) -> Result<String> {
    document.to_yaml_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_syntax_error_has_location() {
        let err = Document::parse("Visualization Manager:\n  Displays: [\n").unwrap_err();
        assert!(err.path.is_empty());
        let ParseErrorKind::Syntax { line, .. } = err.kind else {
            panic!("expected a syntax error, got {:?}", err.kind);
        };
        assert!(line.is_some());
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = Document::parse("- one\n- two\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedMapping("a sequence"));
        assert!(Document::parse("").is_err());
    }

    #[test]
    fn test_section_shape_checked() {
        let err = Document::parse("Visualization Manager: 3\n").unwrap_err();
        assert_eq!(err.path, "Visualization Manager");
        let err = Document::parse("Panels: {Class: rviz/Displays}\n").unwrap_err();
        assert_eq!(err.path, "Panels");
        assert!(matches!(err.kind, ParseErrorKind::ExpectedSequence(_)));
    }

    #[test]
    fn test_unknown_sections_preserved() {
        let text = r"
Toolbars:
  toolButtonStyle: 2
Custom Section:
  a: 1
";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.extra.len(), 1);
        let text = doc.to_yaml_string().unwrap();
        assert!(text.contains("Custom Section"));
        assert_eq!(Document::parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_displays_mut_creates_manager() {
        let mut doc = Document::default();
        assert!(doc.displays().is_none());
        doc.displays_mut();
        assert!(doc.displays().is_some_and(DisplayList::is_empty));
    }

    #[test]
    fn test_output_is_stable() {
        let doc = Document::parse(
            "Window Geometry:\n  Width: 1200\n  Height: 800\nToolbars:\n  toolButtonStyle: 2\n",
        )
        .unwrap();
        let first = doc.to_yaml_string().unwrap();
        let second = Document::parse(&first).unwrap().to_yaml_string().unwrap();
        assert_eq!(first, second);
        assert!(first.find("Toolbars").unwrap() < first.find("Window Geometry").unwrap());
    }
}
