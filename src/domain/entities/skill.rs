use std::{collections::BTreeMap, fmt, str::FromStr};

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    constants::{MAX_DIFFICULTY, MIN_DIFFICULTY, TEMPLATE_DIFFICULTY, TEMPLATE_HOURS, TEMPLATE_STATUS},
    errors::AppError,
};

// ───── Identifiers & Status ─────────────────────────────────────────

/// Backend-assigned key of a skill record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct SkillId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillStatus {
    #[default]
    Started,
    InProgress,
    Completed,
    Other(String),
}

impl SkillStatus {
    pub const CHOICES: [SkillStatus; 3] = [
        SkillStatus::Started,
        SkillStatus::InProgress,
        SkillStatus::Completed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SkillStatus::Started => "started",
            SkillStatus::InProgress => "in-progress",
            SkillStatus::Completed => "completed",
            SkillStatus::Other(s) => s.as_str(),
        }
    }

    pub fn category(&self) -> StatusCategory {
        match self {
            SkillStatus::Completed => StatusCategory::Success,
            SkillStatus::InProgress => StatusCategory::Warning,
            _ => StatusCategory::Neutral,
        }
    }
}

impl From<String> for SkillStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "started" => SkillStatus::Started,
            "in-progress" => SkillStatus::InProgress,
            "completed" => SkillStatus::Completed,
            _ => SkillStatus::Other(value),
        }
    }
}

impl From<&str> for SkillStatus {
    fn from(value: &str) -> Self {
        SkillStatus::from(value.to_string())
    }
}

impl From<SkillStatus> for String {
    fn from(status: SkillStatus) -> Self {
        match status {
            SkillStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for SkillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three visual categories a status badge can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusCategory {
    #[display("success")]
    Success,
    #[display("warning")]
    Warning,
    #[display("neutral")]
    Neutral,
}

impl StatusCategory {
    /// Category for a raw status key, as found in summary counts.
    pub fn for_key(key: &str) -> Self {
        SkillStatus::from(key).category()
    }
}

// ───── API Models ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: SkillId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SkillStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

/// Request body for `POST /skills` and `PUT /skills/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SkillId>,
    pub name: String,
    pub resource_type: String,
    pub platform: String,
    pub status: SkillStatus,
    pub hours: f64,
    pub difficulty: i32,
    pub notes: String,
}

impl SkillPayload {
    pub fn with_id(mut self, id: SkillId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_record(self, id: SkillId) -> SkillRecord {
        SkillRecord {
            id,
            name: self.name,
            resource_type: self.resource_type,
            platform: self.platform,
            status: self.status,
            hours: self.hours,
            difficulty: self.difficulty,
            notes: self.notes,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ───── Form Fields ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum SkillField {
    #[display("name")]
    Name,
    #[display("resource_type")]
    ResourceType,
    #[display("platform")]
    Platform,
    #[display("status")]
    Status,
    #[display("hours")]
    Hours,
    #[display("difficulty")]
    Difficulty,
    #[display("notes")]
    Notes,
}

impl SkillField {
    /// Fields in the order the form presents them.
    pub const ALL: [SkillField; 7] = [
        SkillField::Name,
        SkillField::ResourceType,
        SkillField::Platform,
        SkillField::Status,
        SkillField::Difficulty,
        SkillField::Hours,
        SkillField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillField::Name => "Skill Name",
            SkillField::ResourceType => "Resource Type",
            SkillField::Platform => "Platform",
            SkillField::Status => "Status",
            SkillField::Hours => "Hours",
            SkillField::Difficulty => "Difficulty (1–5)",
            SkillField::Notes => "Notes",
        }
    }
}

impl FromStr for SkillField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SkillField::Name),
            "resource_type" => Ok(SkillField::ResourceType),
            "platform" => Ok(SkillField::Platform),
            "status" => Ok(SkillField::Status),
            "hours" => Ok(SkillField::Hours),
            "difficulty" => Ok(SkillField::Difficulty),
            "notes" => Ok(SkillField::Notes),
            other => Err(AppError::InvalidInput(format!("Unknown field: {}", other))),
        }
    }
}

/// Validation messages keyed by field; only failing fields are present.
pub type FieldErrors = BTreeMap<SkillField, String>;

/// Collapses validator output into one message per field.
pub fn field_errors_from(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            let field = field.parse::<SkillField>().ok()?;
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid value".to_string());
            Some((field, message))
        })
        .collect()
}

// ───── Working Copy & Validation ────────────────────────────────────

/// Editable working copy of a skill, holding exactly what the user typed.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SkillDraft {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_resource_type"))]
    pub resource_type: String,

    #[validate(custom(function = "validate_platform"))]
    pub platform: String,

    #[validate(custom(function = "validate_status"))]
    pub status: String,

    #[validate(custom(function = "validate_hours"))]
    pub hours: String,

    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: String,

    #[validate(custom(function = "validate_notes"))]
    pub notes: String,
}

impl SkillDraft {
    /// The empty "new skill" template. Never valid for submission.
    pub fn template() -> Self {
        Self {
            name: String::new(),
            resource_type: String::new(),
            platform: String::new(),
            status: TEMPLATE_STATUS.to_string(),
            hours: TEMPLATE_HOURS.to_string(),
            difficulty: TEMPLATE_DIFFICULTY.to_string(),
            notes: String::new(),
        }
    }

    pub fn get(&self, field: SkillField) -> &str {
        match field {
            SkillField::Name => &self.name,
            SkillField::ResourceType => &self.resource_type,
            SkillField::Platform => &self.platform,
            SkillField::Status => &self.status,
            SkillField::Hours => &self.hours,
            SkillField::Difficulty => &self.difficulty,
            SkillField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: SkillField, value: impl Into<String>) {
        let slot = match field {
            SkillField::Name => &mut self.name,
            SkillField::ResourceType => &mut self.resource_type,
            SkillField::Platform => &mut self.platform,
            SkillField::Status => &mut self.status,
            SkillField::Hours => &mut self.hours,
            SkillField::Difficulty => &mut self.difficulty,
            SkillField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Runs every field rule and returns the failing fields.
    pub fn field_errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => field_errors_from(&errors),
        }
    }
}

impl Default for SkillDraft {
    fn default() -> Self {
        Self::template()
    }
}

impl From<&SkillRecord> for SkillDraft {
    fn from(record: &SkillRecord) -> Self {
        Self {
            name: record.name.clone(),
            resource_type: record.resource_type.clone(),
            platform: record.platform.clone(),
            status: record.status.as_str().to_string(),
            hours: record.hours.to_string(),
            difficulty: record.difficulty.to_string(),
            notes: record.notes.clone(),
        }
    }
}

impl TryFrom<&SkillDraft> for SkillPayload {
    type Error = AppError;

    fn try_from(draft: &SkillDraft) -> Result<Self, Self::Error> {
        draft.validate()?;

        let hours = parse_hours(&draft.hours)
            .ok_or_else(|| AppError::InternalError("hours passed validation but did not parse".into()))?;
        let difficulty = parse_difficulty(&draft.difficulty)
            .ok_or_else(|| AppError::InternalError("difficulty passed validation but did not parse".into()))?;

        Ok(SkillPayload {
            id: None,
            name: draft.name.clone(),
            resource_type: draft.resource_type.clone(),
            platform: draft.platform.clone(),
            status: SkillStatus::from(draft.status.trim()),
            hours,
            difficulty,
            notes: draft.notes.clone(),
        })
    }
}

pub fn parse_hours(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|h| h.is_finite())
}

pub fn parse_difficulty(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn new_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn require_text(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", message));
    }
    Ok(())
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Skill Name is required")
}

fn validate_resource_type(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Resource Type is required")
}

fn validate_platform(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Platform is required")
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Status is required")
}

fn validate_notes(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Notes cannot be empty")
}

fn validate_hours(value: &str) -> Result<(), ValidationError> {
    match parse_hours(value) {
        None => Err(new_validation_error("hours_not_numeric", "Hours must be a number")),
        Some(h) if h < 0.0 => Err(new_validation_error("hours_negative", "Hours cannot be negative")),
        Some(_) => Ok(()),
    }
}

fn validate_difficulty(value: &str) -> Result<(), ValidationError> {
    match parse_difficulty(value) {
        Some(d) if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&d) => Ok(()),
        _ => Err(new_validation_error("difficulty_range", "Difficulty must be 1–5")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> SkillDraft {
        SkillDraft {
            name: "Rust".into(),
            resource_type: "Book".into(),
            platform: "No Starch".into(),
            status: "in-progress".into(),
            hours: "4.5".into(),
            difficulty: "3".into(),
            notes: "ownership chapter".into(),
        }
    }

    #[test]
    fn template_is_never_submittable() {
        let errors = SkillDraft::template().field_errors();

        let failing: Vec<_> = errors.keys().copied().collect();
        assert_eq!(
            failing,
            vec![SkillField::Name, SkillField::ResourceType, SkillField::Platform, SkillField::Notes]
        );
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let mut draft = valid_draft();
        draft.platform = "   \t".into();

        let errors = draft.field_errors();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&SkillField::Platform], "Platform is required");
    }

    #[test]
    fn negative_and_non_numeric_hours_are_rejected() {
        let mut draft = valid_draft();
        draft.hours = "-0.5".into();
        assert_eq!(draft.field_errors()[&SkillField::Hours], "Hours cannot be negative");

        draft.hours = "lots".into();
        assert_eq!(draft.field_errors()[&SkillField::Hours], "Hours must be a number");

        draft.hours = " 0 ".into();
        assert!(draft.field_errors().is_empty());
    }

    #[test]
    fn difficulty_must_be_an_integer_between_one_and_five() {
        let mut draft = valid_draft();
        for bad in ["0", "6", "-1", "2.5", "3.0", ""] {
            draft.difficulty = bad.into();
            assert_eq!(
                draft.field_errors().get(&SkillField::Difficulty).map(String::as_str),
                Some("Difficulty must be 1–5"),
                "difficulty {bad:?} should fail"
            );
        }
        for good in ["1", "5"] {
            draft.difficulty = good.into();
            assert!(draft.field_errors().is_empty());
        }
    }

    #[test]
    fn payload_coerces_numbers_and_keeps_text_as_typed() {
        let mut draft = valid_draft();
        draft.name = " Rust ".into();
        draft.hours = " 4.5".into();

        let payload = SkillPayload::try_from(&draft).unwrap();

        assert_eq!(payload.name, " Rust ");
        assert_eq!(payload.hours, 4.5);
        assert_eq!(payload.difficulty, 3);
        assert_eq!(payload.status, SkillStatus::InProgress);
        assert_eq!(payload.id, None);
    }

    #[test]
    fn payload_from_invalid_draft_is_a_validation_error() {
        let err = SkillPayload::try_from(&SkillDraft::template()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn create_body_omits_id_and_update_body_carries_it() {
        let payload = SkillPayload::try_from(&valid_draft()).unwrap();

        let create = serde_json::to_value(&payload).unwrap();
        assert!(create.get("id").is_none());
        assert_eq!(create["hours"], serde_json::json!(4.5));
        assert_eq!(create["difficulty"], serde_json::json!(3));
        assert_eq!(create["status"], "in-progress");

        let update = serde_json::to_value(payload.with_id(SkillId(9))).unwrap();
        assert_eq!(update["id"], 9);
    }

    #[test]
    fn record_tolerates_nulls_and_unknown_statuses() {
        let record: SkillRecord = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "SQL",
            "resource_type": null,
            "platform": null,
            "status": "paused",
            "hours": null,
            "notes": "",
            "difficulty": 2
        }))
        .unwrap();

        assert_eq!(record.id, SkillId(4));
        assert_eq!(record.resource_type, "");
        assert_eq!(record.hours, 0.0);
        assert_eq!(record.status, SkillStatus::Other("paused".into()));
        assert_eq!(record.status.category(), StatusCategory::Neutral);
    }

    #[test]
    fn draft_from_record_round_trips_numbers_as_text() {
        let record = SkillRecord {
            id: SkillId(1),
            name: "Go".into(),
            resource_type: "Course".into(),
            platform: "Udemy".into(),
            status: SkillStatus::Completed,
            hours: 2.0,
            difficulty: 4,
            notes: "done".into(),
        };

        let draft = SkillDraft::from(&record);

        assert_eq!(draft.hours, "2");
        assert_eq!(draft.difficulty, "4");
        assert_eq!(draft.status, "completed");
    }

    #[test]
    fn status_categories() {
        assert_eq!(StatusCategory::for_key("completed"), StatusCategory::Success);
        assert_eq!(StatusCategory::for_key("in-progress"), StatusCategory::Warning);
        assert_eq!(StatusCategory::for_key("started"), StatusCategory::Neutral);
        assert_eq!(StatusCategory::for_key("anything"), StatusCategory::Neutral);
    }
}
