//! Config validator
//!
//! Checks that the toggle hotkey parses, that re-assertion has something to
//! trigger on, and that the two minimap anchors are distinct.

use crate::config::{parse_key_string, Config};
use crate::core::events::TriggerScripts;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    InvalidHotkey {
        value: String,
        default: String,
    },
    NoTriggerScripts,
    DuplicateTriggerScript {
        script_id: i32,
    },
    SameAnchors {
        anchor: String,
    },
}

impl ValidationIssue {
    pub fn severity(&self) -> ValidationSeverity {
        match self {
            ValidationIssue::InvalidHotkey { .. } => ValidationSeverity::Error,
            ValidationIssue::SameAnchors { .. } => ValidationSeverity::Error,
            ValidationIssue::NoTriggerScripts => ValidationSeverity::Warning,
            ValidationIssue::DuplicateTriggerScript { .. } => ValidationSeverity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::InvalidHotkey { value, default } => {
                format!(
                    "Toggle hotkey '{}' is not a valid key. Default: {}",
                    value, default
                )
            }
            ValidationIssue::NoTriggerScripts => {
                "No trigger scripts configured; hidden widgets will not be re-hidden after redraws"
                    .to_string()
            }
            ValidationIssue::DuplicateTriggerScript { script_id } => {
                format!("Trigger script {} is listed more than once", script_id)
            }
            ValidationIssue::SameAnchors { anchor } => {
                format!("Minimap anchors are both '{}'; one layout is never found", anchor)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Warning))
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Error))
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Warning))
            .collect()
    }
}

/// Validate a loaded configuration
pub fn validate_config(config: &Config) -> ValidationResult {
    let mut issues = Vec::new();
    let defaults = Config::default();

    if parse_key_string(&config.toggle.hotkey).is_none() {
        issues.push(ValidationIssue::InvalidHotkey {
            value: config.toggle.hotkey.clone(),
            default: defaults.toggle.hotkey,
        });
    }

    if TriggerScripts::new(config.triggers.scripts.iter().copied()).is_empty() {
        issues.push(ValidationIssue::NoTriggerScripts);
    }
    let mut seen = HashSet::new();
    for script_id in &config.triggers.scripts {
        if !seen.insert(*script_id) {
            issues.push(ValidationIssue::DuplicateTriggerScript {
                script_id: *script_id,
            });
        }
    }

    if config.anchors.modern_minimap == config.anchors.classic_minimap {
        issues.push(ValidationIssue::SameAnchors {
            anchor: config.anchors.modern_minimap.to_string(),
        });
    }

    ValidationResult { issues }
}

/// Reset fields with errors to their defaults. Returns the number of fixes.
pub fn auto_fix_config(config: &mut Config, issues: &[ValidationIssue]) -> usize {
    let defaults = Config::default();
    let mut fixed = 0;

    for issue in issues {
        match issue {
            ValidationIssue::InvalidHotkey { default, .. } => {
                config.toggle.hotkey = default.clone();
                fixed += 1;
            }
            ValidationIssue::SameAnchors { .. } => {
                config.anchors = defaults.anchors.clone();
                fixed += 1;
            }
            ValidationIssue::NoTriggerScripts | ValidationIssue::DuplicateTriggerScript { .. } => {}
        }
    }

    fixed
}
