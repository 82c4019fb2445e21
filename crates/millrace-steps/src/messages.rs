//! Catalog of user-facing messages for the utility steps.
//!
//! Display names and validation messages live here so the steps share
//! one wording and tooling can surface it verbatim.

use std::fmt::Display;
use std::path::Path;

/// Display name for the `readJSON` step.
pub fn read_json_display_name() -> String {
    "Read JSON from files in the workspace.".to_string()
}

/// Display name for the `writeJSON` step.
pub fn write_json_display_name() -> String {
    "Write JSON to a file in the workspace.".to_string()
}

/// Neither `file` nor `text` was provided.
pub fn missing_file_or_text(function_name: &str) -> String {
    format!(
        "At least one of file or text needs to be provided to {}.",
        function_name
    )
}

/// Both `file` and `text` were provided.
pub fn file_and_text_both_set(function_name: &str) -> String {
    format!("Use either file or text, not both, in {}.", function_name)
}

/// The configured file does not exist.
pub fn file_not_found(path: &Path) -> String {
    format!("No such file: {}", path.display())
}

/// The configured file is a directory.
pub fn path_is_directory(path: &Path) -> String {
    format!("{} is a directory, expected a file.", path.display())
}

/// The mandatory `json` parameter was not provided.
pub fn missing_json(function_name: &str) -> String {
    format!("Mandatory parameter json missing in {}.", function_name)
}

/// Neither `file` nor `returnText` was provided.
pub fn write_missing_target(function_name: &str) -> String {
    format!(
        "At least one of file or returnText needs to be provided to {}.",
        function_name
    )
}

/// Both `file` and `returnText` were provided.
pub fn write_both_targets(function_name: &str) -> String {
    format!(
        "Use either file or returnText, not both, in {}.",
        function_name
    )
}

/// Invocation arguments did not bind to the step's parameters.
pub fn invalid_arguments(function_name: &str, detail: impl Display) -> String {
    format!("Invalid arguments for {}: {}", function_name, detail)
}
