//! In-place editing of the personal info fields.
//!
//! All fields switch between viewing and editing together. Drafts live here
//! while editing; `save_changes` commits every draft at once and persists the
//! full mapping under `personalData`.

use folio_storage::{KeyValueStore, StorageAdapter};
use folio_types::{FieldName, keys};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Fields saved empty and therefore reset to their default text.
    pub reset_to_default: Vec<FieldName>,
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub struct EditController {
    mode: EditMode,
    values: BTreeMap<FieldName, String>,
    drafts: BTreeMap<FieldName, String>,
}

/// Read the stored mapping, keeping only recognised fields.
pub fn load_personal_data<S: KeyValueStore>(
    storage: &StorageAdapter<S>,
) -> BTreeMap<FieldName, String> {
    let raw: BTreeMap<String, String> = storage.get_json(keys::PERSONAL_DATA).unwrap_or_default();
    raw.into_iter()
        .filter_map(|(name, value)| match name.parse::<FieldName>() {
            Ok(field) => Some((field, value)),
            Err(err) => {
                warn!(error = %err, "ignoring stored field");
                None
            }
        })
        .collect()
}

impl EditController {
    pub fn load<S: KeyValueStore>(storage: &StorageAdapter<S>) -> Self {
        let mut stored = load_personal_data(storage);
        let values = FieldName::ALL
            .into_iter()
            .map(|field| {
                let value = stored
                    .remove(&field)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| field.default_text().to_owned());
                (field, value)
            })
            .collect();
        Self {
            mode: EditMode::Viewing,
            values,
            drafts: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.values
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.default_text())
    }

    pub fn draft(&self, field: FieldName) -> Option<&str> {
        self.drafts.get(&field).map(String::as_str)
    }

    /// Enter edit mode, seeding a draft per field from its current text.
    /// Returns `false` if already editing.
    pub fn enable_editing(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.drafts = self.values.clone();
        self.mode = EditMode::Editing;
        true
    }

    pub fn set_draft(&mut self, field: FieldName, text: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.drafts.insert(field, text.into());
        true
    }

    /// Enter pressed in a field: the draft stays as typed and focus moves on.
    /// Returns the field to focus next, if any.
    pub fn confirm_field(&self, field: FieldName) -> Option<FieldName> {
        if !self.is_editing() {
            return None;
        }
        FieldName::ALL
            .into_iter()
            .skip_while(|f| *f != field)
            .nth(1)
    }

    /// Escape pressed in a field: drop its pending edit. Returns the restored
    /// text.
    pub fn revert_field(&mut self, field: FieldName) -> Option<&str> {
        if !self.is_editing() {
            return None;
        }
        let original = self.value(field).to_owned();
        self.drafts.insert(field, original);
        self.draft(field)
    }

    /// Commit every draft and return to viewing. Empty drafts reset their
    /// field to its default; empty strings are never stored.
    pub fn save_changes<S: KeyValueStore>(
        &mut self,
        storage: &StorageAdapter<S>,
    ) -> Option<SaveOutcome> {
        if !self.is_editing() {
            return None;
        }

        let mut drafts = std::mem::take(&mut self.drafts);
        let mut reset_to_default = Vec::new();
        for field in FieldName::ALL {
            let text = drafts
                .remove(&field)
                .map(|draft| draft.trim().to_owned())
                .unwrap_or_default();
            let committed = if text.is_empty() {
                reset_to_default.push(field);
                field.default_text().to_owned()
            } else {
                text
            };
            self.values.insert(field, committed);
        }

        let mapping: BTreeMap<&str, &str> = self
            .values
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();
        let persisted = match storage.set_json(keys::PERSONAL_DATA, &mapping) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to persist personal data");
                false
            }
        };

        self.mode = EditMode::Viewing;
        info!(reset = reset_to_default.len(), "personal data saved");
        Some(SaveOutcome {
            reset_to_default,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_storage::InMemoryStore;

    fn stored_mapping(storage: &StorageAdapter<InMemoryStore>) -> BTreeMap<String, String> {
        storage
            .get_json(keys::PERSONAL_DATA)
            .expect("personal data should be stored")
    }

    #[test]
    fn save_persists_and_reload_displays() {
        let storage = StorageAdapter::new(InMemoryStore::default());
        let mut editor = EditController::load(&storage);
        assert!(editor.enable_editing());
        editor.set_draft(FieldName::Occupation, "Engineer");
        let outcome = editor.save_changes(&storage).expect("was editing");
        assert!(outcome.persisted);
        assert!(outcome.reset_to_default.is_empty());
        assert_eq!(editor.mode(), EditMode::Viewing);

        let mapping = stored_mapping(&storage);
        assert_eq!(mapping.get("occupation").map(String::as_str), Some("Engineer"));

        let reloaded = EditController::load(&storage);
        assert_eq!(reloaded.value(FieldName::Occupation), "Engineer");
    }

    #[test]
    fn empty_field_saves_default_not_empty_string() {
        let storage = StorageAdapter::new(InMemoryStore::default());
        let mut editor = EditController::load(&storage);
        editor.enable_editing();
        editor.set_draft(FieldName::Occupation, "   ");
        let outcome = editor.save_changes(&storage).expect("was editing");

        assert_eq!(outcome.reset_to_default, vec![FieldName::Occupation]);
        assert_eq!(editor.value(FieldName::Occupation), FieldName::Occupation.default_text());
        let mapping = stored_mapping(&storage);
        assert_eq!(
            mapping.get("occupation").map(String::as_str),
            Some(FieldName::Occupation.default_text())
        );
        assert!(mapping.values().all(|v| !v.is_empty()));
    }

    #[test]
    fn enable_is_guarded_and_save_requires_editing() {
        let storage = StorageAdapter::new(InMemoryStore::default());
        let mut editor = EditController::load(&storage);
        assert!(editor.save_changes(&storage).is_none());
        assert!(storage.get(keys::PERSONAL_DATA).is_none());

        assert!(editor.enable_editing());
        editor.set_draft(FieldName::Name, "Trần Thị Bình");
        assert!(!editor.enable_editing());
        assert_eq!(editor.draft(FieldName::Name), Some("Trần Thị Bình"));
    }

    #[test]
    fn escape_reverts_pending_edit() {
        let storage = StorageAdapter::new(InMemoryStore::default());
        let mut editor = EditController::load(&storage);
        editor.enable_editing();
        editor.set_draft(FieldName::Email, "new@example.com");
        assert_eq!(
            editor.revert_field(FieldName::Email),
            Some(FieldName::Email.default_text())
        );
        editor.save_changes(&storage);
        assert_eq!(editor.value(FieldName::Email), FieldName::Email.default_text());
    }

    #[test]
    fn enter_moves_to_next_field() {
        let storage = StorageAdapter::new(InMemoryStore::default());
        let mut editor = EditController::load(&storage);
        assert_eq!(editor.confirm_field(FieldName::Name), None);
        editor.enable_editing();
        assert_eq!(editor.confirm_field(FieldName::Name), Some(FieldName::Title));
        assert_eq!(editor.confirm_field(FieldName::Phone), None);
    }

    #[test]
    fn unknown_stored_fields_are_ignored() {
        let storage = StorageAdapter::new(InMemoryStore::with_items([(
            keys::PERSONAL_DATA,
            r#"{"nickname":"An","location":"Đà Nẵng"}"#,
        )]));
        let data = load_personal_data(&storage);
        assert_eq!(data.len(), 1);
        let editor = EditController::load(&storage);
        assert_eq!(editor.value(FieldName::Location), "Đà Nẵng");
        assert_eq!(editor.value(FieldName::Name), FieldName::Name.default_text());
    }
}
