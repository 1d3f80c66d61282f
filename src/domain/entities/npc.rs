//! NPC records - flattened snapshots of filterable NPC attributes

use std::collections::HashSet;

use crate::domain::value_objects::FormKey;

/// A read-only view of one NPC's filterable attributes.
///
/// Built once when the snapshot is loaded and never mutated afterwards; a
/// reload replaces the whole universe. The form key is unique within the
/// loaded universe (the data-access layer owns that precondition).
#[derive(Debug, Clone)]
pub struct NpcRecord {
    /// Record identifier; its plugin component names the owning source file
    pub form_key: FormKey,
    /// In-game display name
    pub name: Option<String>,
    /// Editor-facing symbolic name
    pub editor_id: Option<String>,
    pub is_female: bool,
    pub is_unique: bool,
    /// Template reference; an NPC carrying one is considered templated
    pub template: Option<FormKey>,
    pub is_child: bool,
    pub is_summonable: bool,
    pub is_leveled: bool,
    pub level: u16,
    /// Factions the NPC belongs to
    pub factions: HashSet<FormKey>,
    /// Keywords the NPC carries, as resolved symbolic names
    pub keywords: HashSet<String>,
    /// Race identifier, when the record declares one
    pub race: Option<FormKey>,
}

impl NpcRecord {
    pub fn new(form_key: FormKey) -> Self {
        Self {
            form_key,
            name: None,
            editor_id: None,
            is_female: false,
            is_unique: false,
            template: None,
            is_child: false,
            is_summonable: false,
            is_leveled: false,
            level: 1,
            factions: HashSet::new(),
            keywords: HashSet::new(),
            race: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    pub fn with_template(mut self, template: FormKey) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_level(mut self, level: u16) -> Self {
        self.level = level;
        self
    }

    pub fn with_faction(mut self, faction: FormKey) -> Self {
        self.factions.insert(faction);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    pub fn with_race(mut self, race: FormKey) -> Self {
        self.race = Some(race);
        self
    }

    pub fn female(mut self) -> Self {
        self.is_female = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn child(mut self) -> Self {
        self.is_child = true;
        self
    }

    pub fn summonable(mut self) -> Self {
        self.is_summonable = true;
        self
    }

    pub fn leveled(mut self) -> Self {
        self.is_leveled = true;
        self
    }

    /// True when the record carries a template reference.
    pub fn is_templated(&self) -> bool {
        self.template.is_some()
    }

    /// The source file that owns this record.
    pub fn source_file(&self) -> &str {
        self.form_key.plugin()
    }

    /// Name for display: in-game name, then editor id, then the form key.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.editor_id.clone())
            .unwrap_or_else(|| self.form_key.to_string())
    }
}
