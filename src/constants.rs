//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Line navigation constants.
pub mod navigator {
    /// Lines starting with this prefix are skipped when advancing.
    pub const DEFAULT_COMMENT_PREFIX: &str = "-";
}

/// Song model constants.
pub mod song {
    /// Highest song number the editor accepts.
    pub const MAX_NUMBER: u32 = 999;

    /// Part names offered by the editor's quick-add key, in order.
    pub const COMMON_PARTS: &[&str] = &["V1", "V2", "V3", "V4", "V5", "V6", "C", "B"];
}

/// Settings persistence constants.
pub mod settings {
    /// Directory name under the platform config dir.
    pub const APP_DIR: &str = "ezlyric";

    /// Settings file name.
    pub const SETTINGS_FILE: &str = "settings.json";
}

/// Environment variable names.
pub mod env {
    /// Default output file path.
    pub const OUTPUT: &str = "EZLYRIC_OUTPUT";
    /// Comment prefix override.
    pub const COMMENT_PREFIX: &str = "EZLYRIC_COMMENT_PREFIX";
    /// Log file path; logging is off when unset.
    pub const LOG: &str = "EZLYRIC_LOG";
}

/// UI layout constants.
pub mod ui {
    /// Width of the help modal.
    pub const HELP_WIDTH: u16 = 60;

    /// Width of the text prompt modal.
    pub const PROMPT_WIDTH: u16 = 70;

    /// Percentage of the editor width given to the field and part column.
    pub const EDITOR_SIDE_PERCENT: u16 = 35;
}
