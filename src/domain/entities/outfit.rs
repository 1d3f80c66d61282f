//! Outfit records - the assignable outfits offered by the authoring picker

use crate::domain::value_objects::FormKey;

/// An outfit record from the loaded snapshot.
#[derive(Debug, Clone)]
pub struct OutfitRecord {
    pub form_key: FormKey,
    pub editor_id: Option<String>,
}

impl OutfitRecord {
    pub fn new(form_key: FormKey) -> Self {
        Self {
            form_key,
            editor_id: None,
        }
    }

    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    /// Name for display: editor id, then the form key.
    pub fn display_name(&self) -> String {
        self.editor_id
            .clone()
            .unwrap_or_else(|| self.form_key.to_string())
    }
}
