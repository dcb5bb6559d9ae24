use tracing::{error, info, warn};

use crate::{
    constants::{DELETE_FAILED_ALERT, SAVE_FAILED_ALERT},
    entities::{
        skill::{SkillField, SkillId, SkillRecord},
        summary::SummaryView,
    },
    errors::AppError,
    notifier::Notifier,
    repositories::skill::SkillRepository,
    use_cases::editor::{SkillEditor, SubmitOutcome},
};

/// Owns the skill list, the summary and the form, and reloads after every
/// successful mutation.
pub struct Dashboard<R, N>
where
    R: SkillRepository,
    N: Notifier,
{
    pub skill_repo: R,
    notifier: N,
    skills: Vec<SkillRecord>,
    summary: Option<SummaryView>,
    editing: Option<SkillId>,
    editor: SkillEditor,
}

impl<R, N> Dashboard<R, N>
where
    R: SkillRepository,
    N: Notifier,
{
    pub fn new(skill_repo: R, notifier: N) -> Self {
        Dashboard {
            skill_repo,
            notifier,
            skills: Vec::new(),
            summary: None,
            editing: None,
            editor: SkillEditor::new(None),
        }
    }

    /// Skills in the order the backend returned them.
    pub fn skills(&self) -> &[SkillRecord] {
        &self.skills
    }

    pub fn summary(&self) -> Option<&SummaryView> {
        self.summary.as_ref()
    }

    pub fn editing(&self) -> Option<SkillId> {
        self.editing
    }

    pub fn editor(&self) -> &SkillEditor {
        &self.editor
    }

    /// Fetches the list and the summary concurrently and replaces local
    /// state. A failed read keeps whatever was there before.
    pub async fn load(&mut self) {
        let (skills, summary) = tokio::join!(
            self.skill_repo.list_skills(),
            self.skill_repo.get_summary()
        );

        match skills {
            Ok(skills) => self.skills = skills,
            Err(e) => warn!("Failed to load skills: {}", e),
        }
        match summary {
            Ok(summary) => self.summary = Some(summary),
            Err(e) => warn!("Failed to load summary: {}", e),
        }
    }

    /// Points the form at an existing record. Unknown ids are ignored.
    pub fn select_for_edit(&mut self, id: SkillId) -> bool {
        let Some(record) = self.skills.iter().find(|s| s.id == id) else {
            warn!("Skill {} is not in the current list", id);
            return false;
        };
        self.editor.bind(Some(record));
        self.editing = Some(id);
        true
    }

    pub fn change_field(&mut self, field: SkillField, value: impl Into<String>) {
        self.editor.change(field, value);
    }

    /// Submits the form. Backend failures are alerted once and leave every
    /// piece of state untouched.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        match self.editor.submit(&self.skill_repo).await {
            Ok(SubmitOutcome::Saved(record)) => {
                self.on_saved(&record).await;
                Ok(SubmitOutcome::Saved(record))
            }
            Ok(SubmitOutcome::Invalid) => Ok(SubmitOutcome::Invalid),
            Err(e) => {
                error!("Failed to save skill: {}", e);
                self.notifier.alert(SAVE_FAILED_ALERT);
                Err(e)
            }
        }
    }

    async fn on_saved(&mut self, record: &SkillRecord) {
        info!("Saved skill {} ({})", record.id, record.name);
        self.editing = None;
        self.editor.bind(None);
        self.load().await;
    }

    /// Deletes on the backend, then reloads. Nothing is removed locally
    /// before the backend confirms.
    pub async fn delete(&mut self, id: SkillId) -> Result<(), AppError> {
        if let Err(e) = self.skill_repo.delete_skill(id).await {
            error!("Failed to delete skill {}: {}", id, e);
            self.notifier.alert(DELETE_FAILED_ALERT);
            return Err(e);
        }

        info!("Deleted skill {}", id);
        self.load().await;
        Ok(())
    }
}
