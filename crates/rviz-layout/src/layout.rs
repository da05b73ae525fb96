//! Editing session over one layout file.

use std::path::{Path, PathBuf};

use rviz_layout_core::{
    validate_with, Display, DisplayList, Document, LayoutError, Result, ValidationError,
    ValidationOptions,
};

/// A layout document bound to the file it was loaded from.
///
/// Mutations through the session mark it dirty; a successful save clears
/// the flag. Changes made through [`Layout::document_mut`] or
/// [`Layout::displays_mut`] are assumed to modify the document.
#[derive(Debug, Clone)]
pub struct Layout {
    path: PathBuf,
    document: Document,
    options: ValidationOptions,
    dirty: bool,
}

impl Layout {
    /// Loads the layout at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = crate::load(&path)?;
        log::info!(
            "opened layout {} ({} display(s))",
            path.display(),
            document.displays().map_or(0, DisplayList::total_len)
        );
        Ok(Self {
            path,
            document,
            options: ValidationOptions::default(),
            dirty: false,
        })
    }

    /// Wraps an in-memory document. Nothing is read from `path`; the session
    /// starts dirty since the file does not hold this document yet.
    pub fn from_document(document: Document, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document,
            options: ValidationOptions::default(),
            dirty: true,
        }
    }

    /// Sets the rules used by [`Layout::validate`] and [`Layout::save_checked`].
    #[must_use]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.dirty = true;
        &mut self.document
    }

    /// Consumes the session, returning the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Returns true if the document changed since it was loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the top-level displays, or an empty list if the document has
    /// no `Visualization Manager`.
    pub fn displays(&self) -> &DisplayList {
        static EMPTY: DisplayList = DisplayList::new();
        self.document.displays().unwrap_or(&EMPTY)
    }

    pub fn displays_mut(&mut self) -> &mut DisplayList {
        self.dirty = true;
        self.document.displays_mut()
    }

    /// Appends a display to the top level.
    pub fn add_display(&mut self, display: Display) -> Result<()> {
        let name = display.name.clone();
        self.document.displays_mut().register(display)?;
        self.dirty = true;
        log::debug!("added display '{name}'");
        Ok(())
    }

    /// Inserts a display at `index` of the top level, clamped to its length.
    pub fn insert_display(&mut self, index: usize, display: Display) -> Result<()> {
        let name = display.name.clone();
        self.document.displays_mut().insert(index, display)?;
        self.dirty = true;
        log::debug!("inserted display '{name}' at {index}");
        Ok(())
    }

    /// Removes a top-level display by name.
    pub fn remove_display(&mut self, name: &str) -> Result<Display> {
        let display = self
            .document
            .visualization_manager
            .as_mut()
            .and_then(|m| m.displays.remove(name))
            .ok_or_else(|| LayoutError::DisplayNotFound(name.to_string()))?;
        self.dirty = true;
        log::debug!("removed display '{name}'");
        Ok(display)
    }

    /// Moves a top-level display to `index`, changing its draw order.
    pub fn move_display(&mut self, name: &str, index: usize) -> Result<()> {
        let displays = self
            .document
            .visualization_manager
            .as_mut()
            .map(|m| &mut m.displays)
            .ok_or_else(|| LayoutError::DisplayNotFound(name.to_string()))?;
        displays.move_to(name, index)?;
        self.dirty = true;
        Ok(())
    }

    /// Sets both toggles of the first display named `name`, searching
    /// nested groups depth-first.
    pub fn set_display_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let display = self
            .document
            .visualization_manager
            .as_mut()
            .and_then(|m| m.displays.find_mut(name))
            .ok_or_else(|| LayoutError::DisplayNotFound(name.to_string()))?;
        display.enabled = Some(enabled);
        display.value = Some(enabled);
        self.dirty = true;
        log::debug!(
            "{} display '{name}'",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Finds a display by name anywhere in the tree.
    pub fn find_display(&self, name: &str) -> Option<&Display> {
        self.document.displays().and_then(|d| d.find(name))
    }

    /// Validates the document with the session's options.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        validate_with(&self.document, &self.options)
    }

    /// Writes the document back to its file.
    pub fn save(&mut self) -> Result<()> {
        crate::save(&self.document, &self.path)?;
        self.dirty = false;
        Ok(())
    }

    /// Writes the document to `path` and rebinds the session to it.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        crate::save(&self.document, &path)?;
        self.path = path;
        self.dirty = false;
        Ok(())
    }

    /// Validates, then saves. Nothing is written if validation fails.
    pub fn save_checked(&mut self) -> Result<()> {
        if let Err(errors) = self.validate() {
            log::warn!(
                "not saving {}: {} validation error(s)",
                self.path.display(),
                errors.len()
            );
            return Err(LayoutError::Invalid(errors));
        }
        self.save()
    }
}
