//! Configuration loader/writer plus strongly typed settings structures.
//!
//! One TOML file drives the subsystem: the toggle hotkey, the redraw scripts
//! that trigger re-assertion, the minimap anchors and the excluded content
//! type. The file lives in the data directory and is written from the embedded
//! default on first run.

use crate::core::input_router::KeyBinding;
use crate::data::{ComponentId, ContentType, RENDER_SURFACE_CONTENT_TYPE};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod validator;

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub toggle: ToggleConfig,
    #[serde(default)]
    pub triggers: TriggerConfig,
    #[serde(default)]
    pub anchors: AnchorConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleConfig {
    #[serde(default = "default_hotkey")]
    pub hotkey: String, // e.g. "h", "ctrl+w", "f12"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default = "default_trigger_scripts")]
    pub scripts: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorConfig {
    #[serde(default = "default_modern_minimap")]
    pub modern_minimap: ComponentId,
    #[serde(default = "default_classic_minimap")]
    pub classic_minimap: ComponentId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    #[serde(default = "default_excluded_content_type")]
    pub excluded_content_type: ContentType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64, // Event poll timeout in milliseconds (one host tick)
    #[serde(default = "default_show_help")]
    pub show_help: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            scripts: default_trigger_scripts(),
        }
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            modern_minimap: default_modern_minimap(),
            classic_minimap: default_classic_minimap(),
        }
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            excluded_content_type: default_excluded_content_type(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            show_help: default_show_help(),
        }
    }
}

impl Config {
    /// Load config.toml from the data directory, writing the default on first run
    pub fn load() -> Result<Self> {
        Self::extract_defaults()?;
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::parse_file(path)?;

        let validation = validator::validate_config(&config);
        if validation.has_errors() {
            tracing::warn!(
                "Config validation found {} errors",
                validation.errors().len()
            );
            for error in validation.errors() {
                tracing::warn!("  {}", error.message());
            }

            let fixed = validator::auto_fix_config(&mut config, &validation.issues);
            if fixed > 0 {
                tracing::info!("Auto-fixed {} config issues", fixed);
            }
        }
        if validation.has_warnings() {
            for warning in validation.warnings() {
                tracing::warn!("Config warning: {}", warning.message());
            }
        }

        Ok(config)
    }

    /// Read and deserialize without validation
    pub fn parse_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Overwrite config.toml in the data directory with the embedded default
    pub fn reset() -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        Self::write_defaults_to(&config_path)?;
        Ok(config_path)
    }

    /// Write the embedded default (comments included) to `path`
    pub fn write_defaults_to(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)
            .context(format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Parsed toggle hotkey, falling back to the default key
    pub fn toggle_binding(&self) -> KeyBinding {
        KeyBinding::parse(&self.toggle.hotkey)
            .unwrap_or_else(|| KeyBinding::new(KeyCode::Char('h'), KeyModifiers::empty()))
    }

    /// Write config.toml if it does not exist yet (idempotent)
    fn extract_defaults() -> Result<()> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::write_defaults_to(&config_path)?;
            tracing::info!("Extracted config.toml to {:?}", config_path);
        }
        Ok(())
    }

    /// Get the base directory (~/.hide-widgets/)
    /// Can be overridden with HIDE_WIDGETS_DIR environment variable
    fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("HIDE_WIDGETS_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".hide-widgets"))
    }

    /// Returns: ~/.hide-widgets/config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

/// Parse a key string like "ctrl+h" or "f12" into KeyCode and KeyModifiers
pub fn parse_key_string(key_str: &str) -> Option<(KeyCode, KeyModifiers)> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    // A bare "+" is the plus key, not a separator
    let parts: Vec<&str> = if key_str.ends_with("++") || key_str == "+" {
        let (mods, _) = key_str.split_at(key_str.len() - 1);
        let mut parts: Vec<&str> = mods.split('+').filter(|p| !p.is_empty()).collect();
        parts.push("+");
        parts
    } else {
        key_str.split('+').collect()
    };

    let mut modifiers = KeyModifiers::empty();
    for part in &parts[..parts.len() - 1] {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }
    let key_part = parts[parts.len() - 1];

    let key_code = match key_part.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "page_up" | "pageup" => KeyCode::PageUp,
        "page_down" | "pagedown" => KeyCode::PageDown,

        // Function keys
        f if f.len() > 1 && f.starts_with('f') => {
            let n = f[1..].parse::<u8>().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }

        // Single character (case preserved)
        _ => {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };

    Some((key_code, modifiers))
}

fn default_hotkey() -> String {
    "h".to_string()
}

fn default_trigger_scripts() -> Vec<i32> {
    vec![
        crate::core::events::TOPLEVEL_REDRAW,
        crate::core::events::INVENTORY_PANEL_REDRAW,
    ]
}

fn default_modern_minimap() -> ComponentId {
    crate::core::locator::MODERN_RESIZABLE_MINIMAP
}

fn default_classic_minimap() -> ComponentId {
    crate::core::locator::CLASSIC_RESIZABLE_MINIMAP
}

fn default_excluded_content_type() -> ContentType {
    RENDER_SURFACE_CONTENT_TYPE
}

fn default_poll_timeout_ms() -> u64 {
    50
}

fn default_show_help() -> bool {
    true
}
