pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub const SKILLS_PATH: &str = "skills";
pub const SUMMARY_PATH: &str = "summary";

// Values of the empty "new skill" template.
pub const TEMPLATE_STATUS: &str = "started";
pub const TEMPLATE_HOURS: &str = "0";
pub const TEMPLATE_DIFFICULTY: &str = "1";

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

pub const SAVE_FAILED_ALERT: &str = "Error saving skill. Check backend server.";
pub const DELETE_FAILED_ALERT: &str = "Error deleting skill. Check backend server.";
pub const NO_DATA_PLACEHOLDER: &str = "No data";
