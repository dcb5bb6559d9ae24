use tracing::debug;

use crate::{
    entities::skill::{FieldErrors, SkillDraft, SkillField, SkillId, SkillPayload, SkillRecord},
    errors::AppError,
    repositories::skill::SkillRepository,
};

/// Whether a submit creates a new record or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(SkillId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; field errors are set and nothing was sent.
    Invalid,
    /// The backend accepted the record and returned it.
    Saved(SkillRecord),
}

/// Form state for adding or editing one skill.
#[derive(Debug, Clone)]
pub struct SkillEditor {
    mode: EditorMode,
    draft: SkillDraft,
    errors: FieldErrors,
}

impl SkillEditor {
    pub fn new(existing: Option<&SkillRecord>) -> Self {
        let mut editor = SkillEditor {
            mode: EditorMode::Create,
            draft: SkillDraft::template(),
            errors: FieldErrors::new(),
        };
        editor.bind(existing);
        editor
    }

    /// Rebinds the form to a record (or to the empty template), discarding
    /// unsaved edits and every field error.
    pub fn bind(&mut self, existing: Option<&SkillRecord>) {
        match existing {
            Some(record) => {
                self.mode = EditorMode::Edit(record.id);
                self.draft = SkillDraft::from(record);
            }
            None => {
                self.mode = EditorMode::Create;
                self.draft = SkillDraft::template();
            }
        }
        self.errors.clear();
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &SkillDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: SkillField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add Skill",
            EditorMode::Edit(_) => "Update Skill",
        }
    }

    /// Sets one field and clears that field's error only.
    pub fn change(&mut self, field: SkillField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.remove(&field);
    }

    pub fn validate(&self) -> FieldErrors {
        self.draft.field_errors()
    }

    /// Validates, then creates or updates through `repo`.
    ///
    /// On a backend failure the working copy is left exactly as it was and
    /// the error is returned to the caller for reporting.
    pub async fn submit<R>(&mut self, repo: &R) -> Result<SubmitOutcome, AppError>
    where
        R: SkillRepository + ?Sized,
    {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "skill form rejected");
            self.errors = errors;
            return Ok(SubmitOutcome::Invalid);
        }
        self.errors.clear();

        let payload = SkillPayload::try_from(&self.draft)?;

        let saved = match self.mode {
            EditorMode::Create => repo.create_skill(&payload).await?,
            EditorMode::Edit(id) => repo.update_skill(id, &payload.with_id(id)).await?,
        };

        if self.mode == EditorMode::Create {
            self.draft = SkillDraft::template();
        }

        Ok(SubmitOutcome::Saved(saved))
    }
}

impl Default for SkillEditor {
    fn default() -> Self {
        Self::new(None)
    }
}
