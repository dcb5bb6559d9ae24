use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use crate::{
    entities::skill::{SkillField, SkillId, SkillRecord, SkillStatus},
    errors::AppError,
    notifier::{Notifier, TerminalNotifier},
    render::{render_dashboard, render_editor, render_skill_card, render_summary},
    repositories::skill::SkillRepository,
    use_cases::{dashboard::Dashboard, editor::SubmitOutcome},
};

#[derive(Parser, Debug, Clone)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track learning activities against a SkillStack backend", long_about = None)]
pub struct Cli {
    /// Backend base URL, overrides APP_API_BASE_URL
    #[arg(long, env = "SKILLSTACK_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Interactive dashboard (default)
    #[default]
    Dashboard,
    /// Print every skill and exit
    List,
    /// Print the summary and exit
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Form,
    Edit,
    Delete,
    Refresh,
    Quit,
}

pub async fn run<R>(command: Command, skill_repo: R) -> Result<(), AppError>
where
    R: SkillRepository,
{
    match command {
        Command::List => {
            let skills = skill_repo.list_skills().await?;
            if skills.is_empty() {
                println!("No skills yet");
            }
            for skill in &skills {
                print!("{}", render_skill_card(skill, false));
            }
            Ok(())
        }
        Command::Summary => {
            let summary = skill_repo.get_summary().await?;
            print!("{}", render_summary(Some(&summary)));
            Ok(())
        }
        Command::Dashboard => {
            let mut dashboard = Dashboard::new(skill_repo, TerminalNotifier);
            run_dashboard(&mut dashboard).await
        }
    }
}

/// Render, ask for an action, apply it, repeat until the user quits.
pub async fn run_dashboard<R, N>(dashboard: &mut Dashboard<R, N>) -> Result<(), AppError>
where
    R: SkillRepository,
    N: Notifier,
{
    dashboard.load().await;

    loop {
        println!("\n{}", render_dashboard(dashboard));

        match prompt_action(dashboard)? {
            MenuAction::Form => fill_and_submit(dashboard).await?,
            MenuAction::Edit => {
                if let Some(id) = pick_skill(dashboard.skills(), "Edit which skill?")? {
                    dashboard.select_for_edit(id);
                    fill_and_submit(dashboard).await?;
                }
            }
            MenuAction::Delete => {
                if let Some(id) = pick_skill(dashboard.skills(), "Delete which skill?")? {
                    let confirmed = Confirm::new()
                        .with_prompt(format!("Delete skill #{}?", id))
                        .default(false)
                        .interact()?;
                    if confirmed {
                        if let Err(e) = dashboard.delete(id).await {
                            debug!("delete abandoned: {}", e);
                        }
                    }
                }
            }
            MenuAction::Refresh => dashboard.load().await,
            MenuAction::Quit => return Ok(()),
        }
    }
}

fn prompt_action<R, N>(dashboard: &Dashboard<R, N>) -> Result<MenuAction, AppError>
where
    R: SkillRepository,
    N: Notifier,
{
    let mut actions = vec![(dashboard.editor().submit_label(), MenuAction::Form)];
    if !dashboard.skills().is_empty() {
        actions.push(("Edit a skill", MenuAction::Edit));
        actions.push(("Delete a skill", MenuAction::Delete));
    }
    actions.push(("Refresh", MenuAction::Refresh));
    actions.push(("Quit", MenuAction::Quit));

    let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
    let choice = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(actions[choice].1)
}

fn pick_skill(skills: &[SkillRecord], prompt: &str) -> Result<Option<SkillId>, AppError> {
    if skills.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = skills
        .iter()
        .map(|s| format!("#{} {} ({})", s.id, s.name, s.status))
        .collect();

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| skills[i].id))
}

/// Walks every field with its current value prefilled, then submits.
/// On validation failure the errors are shown and the user may retry.
async fn fill_and_submit<R, N>(dashboard: &mut Dashboard<R, N>) -> Result<(), AppError>
where
    R: SkillRepository,
    N: Notifier,
{
    loop {
        println!("\n{}", dashboard.editor().submit_label().bold());

        for field in SkillField::ALL {
            let current = dashboard.editor().draft().get(field).to_string();
            let value = prompt_field(field, &current, dashboard.editor().error_for(field))?;
            if value != current {
                dashboard.change_field(field, value);
            }
        }

        match dashboard.submit().await {
            Ok(SubmitOutcome::Saved(record)) => {
                println!("{} {}", "Saved".green().bold(), record.name);
                return Ok(());
            }
            Ok(SubmitOutcome::Invalid) => {
                print!("\n{}", render_editor(dashboard.editor()));
                let retry = Confirm::new()
                    .with_prompt("Fix the highlighted fields?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Ok(());
                }
            }
            Err(e) => {
                debug!("save abandoned: {}", e);
                return Ok(());
            }
        }
    }
}

fn prompt_field(field: SkillField, current: &str, error: Option<&str>) -> Result<String, AppError> {
    if let Some(message) = error {
        eprintln!("  {}", message.red());
    }

    if field == SkillField::Status {
        let (labels, default) = status_choices(current);
        let choice = Select::new()
            .with_prompt(field.label())
            .items(&labels)
            .default(default)
            .interact()?;
        return Ok(labels[choice].clone());
    }

    let value = Input::<String>::new()
        .with_prompt(field.label())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Status options for the picker and the index to preselect. A status the
/// backend knows but the picker doesn't is offered as-is so it survives an
/// edit that never touches it.
fn status_choices(current: &str) -> (Vec<String>, usize) {
    let mut labels: Vec<String> = SkillStatus::CHOICES.iter().map(|s| s.to_string()).collect();
    let current = current.trim();

    let default = match labels.iter().position(|l| l == current) {
        Some(index) => index,
        None if current.is_empty() => 0,
        None => {
            labels.push(current.to_string());
            labels.len() - 1
        }
    };
    (labels, default)
}
