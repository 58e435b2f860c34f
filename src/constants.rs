pub const APP_TITLE: &str = "GameStoreLite Management System";
pub const FOOTER: &str = "© 2025 GameStoreLite - Video game store management";
pub const KEY_HELP: &str =
    "Tab/↑↓ move · Enter activate · PgUp/PgDn tabs · ^S save · ^U update · ^D delete · ^L clear · ^Q quit";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// dialog titles
pub const TITLE_WARNING: &str = "Warning";
pub const TITLE_SUCCESS: &str = "Success";
pub const TITLE_DB_ERROR: &str = "Database Error";
pub const TITLE_CONFIRM: &str = "Confirm";

pub const MSG_ALL_REQUIRED: &str = "All fields are required";
pub const MSG_VALID_ID: &str = "Enter a valid ID";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure you want to delete this record?";
pub const MSG_SAVED: &str = "Record saved successfully";
pub const MSG_UPDATED: &str = "Record updated successfully";
pub const MSG_DELETED: &str = "Record deleted successfully";
