//! Text rendering of the dashboard for a terminal.
//!
//! Status values map onto three fixed badge styles: completed is green,
//! in-progress is yellow and anything else is grey.

use colored::{ColoredString, Colorize};

use crate::{
    constants::NO_DATA_PLACEHOLDER,
    entities::{
        skill::{SkillField, SkillRecord, SkillStatus, StatusCategory},
        summary::SummaryView,
    },
    notifier::Notifier,
    repositories::skill::SkillRepository,
    use_cases::{dashboard::Dashboard, editor::SkillEditor},
};

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub label: String,
    pub count: Option<u64>,
    pub category: StatusCategory,
}

impl StatusBadge {
    pub fn for_status(status: &SkillStatus) -> Self {
        StatusBadge {
            label: status.to_string(),
            count: None,
            category: status.category(),
        }
    }

    pub fn for_count(status: &str, count: u64) -> Self {
        StatusBadge {
            label: status.to_string(),
            count: Some(count),
            category: StatusCategory::for_key(status),
        }
    }

    pub fn text(&self) -> String {
        match self.count {
            Some(count) => format!("{}: {}", self.label, count),
            None => self.label.clone(),
        }
    }

    pub fn paint(&self) -> ColoredString {
        let text = format!(" {} ", self.text());
        match self.category {
            StatusCategory::Success => text.black().on_green(),
            StatusCategory::Warning => text.black().on_yellow(),
            StatusCategory::Neutral => text.white().on_bright_black(),
        }
    }
}

/// One badge per status present in the summary. `None` when there is no
/// summary or it carries no status breakdown.
pub fn summary_badges(summary: Option<&SummaryView>) -> Option<Vec<StatusBadge>> {
    let counts = summary?.status_counts.as_ref()?;
    Some(
        counts
            .iter()
            .map(|(status, count)| StatusBadge::for_count(status, *count))
            .collect(),
    )
}

pub fn render_summary(summary: Option<&SummaryView>) -> String {
    let total_skills = summary.map_or(0, |s| s.total_skills);
    let total_hours = summary.map_or(0.0, |s| s.total_hours);

    let mut out = format!("{}\n", "Summary".bold());
    out.push_str(&format!("  Total Skills: {}\n", total_skills.to_string().bold()));
    out.push_str(&format!("  Total Hours: {}\n", total_hours.to_string().bold()));

    let status_line = match summary_badges(summary) {
        Some(badges) => badges
            .iter()
            .map(|b| b.paint().to_string())
            .collect::<Vec<_>>()
            .join(" "),
        None => NO_DATA_PLACEHOLDER.dimmed().to_string(),
    };
    out.push_str(&format!("  Status: {}\n", status_line));
    out
}

pub fn render_skill_card(skill: &SkillRecord, editing: bool) -> String {
    let marker = if editing { " (editing)".cyan().to_string() } else { String::new() };

    let mut out = format!("#{} {}{}\n", skill.id, skill.name.bold(), marker);
    out.push_str(&format!(
        "   {} — {}\n",
        skill.resource_type.dimmed(),
        skill.platform.dimmed()
    ));
    out.push_str(&format!("   {}\n", StatusBadge::for_status(&skill.status).paint()));
    out.push_str(&format!("   Hours: {} | Difficulty: {}\n", skill.hours, skill.difficulty));
    if !skill.notes.is_empty() {
        out.push_str(&format!("   {}\n", skill.notes.dimmed()));
    }
    out
}

/// The form as it currently stands, with inline field errors.
pub fn render_editor(editor: &SkillEditor) -> String {
    let mut out = format!("{}\n", editor.submit_label().bold());
    for field in SkillField::ALL {
        out.push_str(&format!("  {}: {}\n", field.label(), editor.draft().get(field)));
        if let Some(message) = editor.error_for(field) {
            out.push_str(&format!("    {}\n", message.red()));
        }
    }
    out
}

pub fn render_dashboard<R, N>(dashboard: &Dashboard<R, N>) -> String
where
    R: SkillRepository,
    N: Notifier,
{
    let mut out = format!("{}\n\n", "SkillStack Dashboard".bold().underline());
    out.push_str(&render_summary(dashboard.summary()));

    out.push_str(&format!("\n{}\n", "All Skills".bold()));
    if dashboard.skills().is_empty() {
        out.push_str(&format!("  {}\n", "No skills yet".dimmed()));
    }
    for skill in dashboard.skills() {
        out.push_str(&render_skill_card(skill, dashboard.editing() == Some(skill.id)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::skill::SkillId, repositories::skill::MockSkillRepository};

    fn plain() {
        colored::control::set_override(false);
    }

    fn summary() -> SummaryView {
        serde_json::from_str(
            r#"{"total_skills":3,"total_hours":7.5,"status_counts":{"started":1,"completed":2}}"#,
        )
        .unwrap()
    }

    #[test]
    fn summary_badges_follow_counts() {
        let summary = summary();
        let badges = summary_badges(Some(&summary)).unwrap();

        assert_eq!(
            badges,
            vec![
                StatusBadge {
                    label: "completed".into(),
                    count: Some(2),
                    category: StatusCategory::Success,
                },
                StatusBadge {
                    label: "started".into(),
                    count: Some(1),
                    category: StatusCategory::Neutral,
                },
            ]
        );
        assert!(badges.iter().all(|b| b.label != "in-progress"));
    }

    #[test]
    fn missing_summary_renders_placeholder() {
        plain();
        assert!(summary_badges(None).is_none());

        let text = render_summary(None);

        assert!(text.contains("Total Skills: 0"));
        assert!(text.contains("Total Hours: 0"));
        assert!(text.contains("Status: No data"));
    }

    #[test]
    fn summary_without_breakdown_renders_placeholder_and_totals() {
        plain();
        for body in [
            r#"{"total_skills":2,"total_hours":3.0}"#,
            r#"{"total_skills":2,"total_hours":3.0,"status_counts":null}"#,
        ] {
            let summary: SummaryView = serde_json::from_str(body).unwrap();
            assert!(summary_badges(Some(&summary)).is_none());

            let text = render_summary(Some(&summary));

            assert!(text.contains("Total Skills: 2"), "{text}");
            assert!(text.contains("Total Hours: 3"), "{text}");
            assert!(text.contains("Status: No data"), "{text}");
        }
    }

    #[test]
    fn empty_breakdown_renders_no_badges() {
        plain();
        let summary: SummaryView = serde_json::from_str(r#"{"status_counts":{}}"#).unwrap();

        assert_eq!(summary_badges(Some(&summary)), Some(vec![]));
        assert!(!render_summary(Some(&summary)).contains("No data"));
    }

    #[test]
    fn summary_text_shows_totals_and_badges() {
        plain();
        let text = render_summary(Some(&summary()));

        assert!(text.contains("Total Skills: 3"));
        assert!(text.contains("Total Hours: 7.5"));
        assert!(text.contains(" completed: 2 "));
        assert!(text.contains(" started: 1 "));
        assert!(!text.contains("in-progress"));
    }

    #[test]
    fn skill_card_lists_every_field() {
        plain();
        let skill = SkillRecord {
            id: SkillId(8),
            name: "Kubernetes".into(),
            resource_type: "Video".into(),
            platform: "YouTube".into(),
            status: SkillStatus::InProgress,
            hours: 2.5,
            difficulty: 4,
            notes: "pods".into(),
        };

        let text = render_skill_card(&skill, true);

        assert!(text.starts_with("#8 Kubernetes (editing)"));
        assert!(text.contains("Video — YouTube"));
        assert!(text.contains(" in-progress "));
        assert!(text.contains("Hours: 2.5 | Difficulty: 4"));
        assert!(text.contains("pods"));
        assert_eq!(StatusBadge::for_status(&skill.status).category, StatusCategory::Warning);
    }

    #[tokio::test]
    async fn editor_shows_inline_errors() {
        plain();
        let repo = MockSkillRepository::new();
        let mut editor = SkillEditor::new(None);
        editor.change(SkillField::Name, "Rust");
        editor.submit(&repo).await.unwrap();

        let text = render_editor(&editor);

        assert!(text.starts_with("Add Skill"));
        assert!(text.contains("Skill Name: Rust"));
        assert!(text.contains("Status: started"));
        assert!(text.contains("Platform is required"));
        assert!(!text.contains("Skill Name is required"));
    }
}
