// SPDX-License-Identifier: MPL-2.0
//! Curtain configuration: partial options, defaults merging, and loading
//! the global `curtain.toml` file.
//!
//! # Path Resolution
//!
//! The global config file is searched in:
//! 1. An explicit override passed to [`load_with_override`]
//! 2. The `ICED_CURTAIN_CONFIG_DIR` environment variable
//! 3. The platform config directory (via `dirs`)
//!
//! # Examples
//!
//! ```
//! use iced_curtain::config::{CurtainOptions, Theme};
//!
//! let options = CurtainOptions {
//!     title: Some("Grand Opening".to_string()),
//!     theme: Some(Theme::Gold),
//!     ..CurtainOptions::default()
//! };
//!
//! let config = options.resolve();
//! assert_eq!(config.title, "Grand Opening");
//! assert_eq!(config.subtitle, "Click to Enter");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CONFIG_FILE: &str = "curtain.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "IcedCurtain";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_CURTAIN_CONFIG_DIR";

// =============================================================================
// Theme
// =============================================================================

/// Color scheme modifier applied to the overlay. Only one is active at a time.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    Royal,
    Elegant,
    Gold,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Royal, Theme::Elegant, Theme::Gold];

    /// Parses a theme name, case-insensitively.
    ///
    /// Unknown names fall back to [`Theme::Default`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "default" => Theme::Default,
            "royal" => Theme::Royal,
            "elegant" => Theme::Elegant,
            "gold" => Theme::Gold,
            other => {
                log::warn!("Unknown curtain theme '{other}', using default");
                Theme::Default
            }
        }
    }

    /// Name of the modifier carried by the overlay, `None` for the default look.
    #[must_use]
    pub fn modifier(self) -> Option<&'static str> {
        match self {
            Theme::Default => None,
            Theme::Royal => Some("curtain-theme-royal"),
            Theme::Elegant => Some("curtain-theme-elegant"),
            Theme::Gold => Some("curtain-theme-gold"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::Default => "default",
            Theme::Royal => "royal",
            Theme::Elegant => "elegant",
            Theme::Gold => "gold",
        };
        f.write_str(name)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Theme::parse(&raw))
    }
}

// =============================================================================
// Callbacks
// =============================================================================

/// Lifecycle hook invoked by the controller (on open, on complete).
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// =============================================================================
// Options and resolved config
// =============================================================================

/// Caller-supplied, possibly partial configuration.
///
/// Unknown keys in a TOML source are ignored. Callbacks can only be attached
/// in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CurtainOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_open: Option<bool>,
    /// Milliseconds before the automatic opening.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_open_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparkles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<bool>,
    /// Milliseconds taken by the panel transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_curtain_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_curtain_image: Option<String>,
    #[serde(skip)]
    pub on_open: Option<Callback>,
    #[serde(skip)]
    pub on_complete: Option<Callback>,
}

impl CurtainOptions {
    /// Attaches a hook fired right before the opening transition starts.
    #[must_use]
    pub fn on_open(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_open = Some(Callback::new(f));
        self
    }

    /// Attaches a hook fired right after the overlay has been removed.
    #[must_use]
    pub fn on_complete(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Callback::new(f));
        self
    }

    /// Overlays the supplied fields onto the defaults.
    ///
    /// Numeric values are taken as-is, including negative ones.
    #[must_use]
    pub fn resolve(self) -> CurtainConfig {
        CurtainConfig {
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: self.subtitle.unwrap_or_else(|| DEFAULT_SUBTITLE.to_string()),
            button_text: self
                .button_text
                .unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()),
            theme: self.theme.unwrap_or_default(),
            auto_open: self.auto_open.unwrap_or(DEFAULT_AUTO_OPEN),
            auto_open_delay_ms: self.auto_open_delay.unwrap_or(DEFAULT_AUTO_OPEN_DELAY_MS),
            sparkles: self.sparkles.unwrap_or(DEFAULT_SPARKLES),
            sound: self.sound.unwrap_or(DEFAULT_SOUND),
            speed_ms: self.speed.unwrap_or(DEFAULT_SPEED_MS),
            left_image: image_reference(self.left_curtain_image),
            right_image: image_reference(self.right_curtain_image),
            on_open: self.on_open,
            on_complete: self.on_complete,
        }
    }
}

/// Complete configuration, immutable once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CurtainConfig {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub theme: Theme,
    pub auto_open: bool,
    pub auto_open_delay_ms: i64,
    pub sparkles: bool,
    pub sound: bool,
    pub speed_ms: i64,
    pub left_image: Option<String>,
    pub right_image: Option<String>,
    pub on_open: Option<Callback>,
    pub on_complete: Option<Callback>,
}

impl Default for CurtainConfig {
    fn default() -> Self {
        CurtainOptions::default().resolve()
    }
}

/// Blank references mean "no image".
pub(crate) fn image_reference(raw: Option<String>) -> Option<String> {
    raw.filter(|path| !path.trim().is_empty())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring the explicit override first and
/// the environment variable second.
pub fn config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = base_dir {
        return Some(dir);
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the global options from the default location.
///
/// Returns `(None, None)` when no file exists, and `(None, Some(warning))` when
/// a file exists but cannot be used.
pub fn load() -> (Option<CurtainOptions>, Option<String>) {
    load_with_override(None)
}

/// Loads the global options from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Option<CurtainOptions>, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(options) => (Some(options), None),
                Err(err) => (None, Some(format!("{}: {err}", path.display()))),
            };
        }
    }
    (None, None)
}

/// Loads options from a specific TOML file.
pub fn load_from_path(path: &Path) -> Result<CurtainOptions> {
    let content = fs::read_to_string(path)?;
    let options: CurtainOptions = toml::from_str(&content)?;
    Ok(options)
}

/// Saves options to a specific TOML file, creating parent directories.
pub fn save_to_path(options: &CurtainOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_options_resolve_to_documented_defaults() {
        let config = CurtainOptions::default().resolve();

        assert_eq!(config.title, "Welcome");
        assert_eq!(config.subtitle, "Click to Enter");
        assert_eq!(config.button_text, "Open Curtains");
        assert_eq!(config.theme, Theme::Default);
        assert!(!config.auto_open);
        assert_eq!(config.auto_open_delay_ms, 5000);
        assert!(config.sparkles);
        assert!(!config.sound);
        assert_eq!(config.speed_ms, 2000);
        assert!(config.left_image.is_none());
        assert!(config.right_image.is_none());
        assert!(config.on_open.is_none());
        assert!(config.on_complete.is_none());
    }

    #[test]
    fn supplied_fields_override_only_themselves() {
        let config = CurtainOptions {
            subtitle: Some("Step inside".into()),
            speed: Some(750),
            sound: Some(true),
            ..CurtainOptions::default()
        }
        .resolve();

        assert_eq!(config.subtitle, "Step inside");
        assert_eq!(config.speed_ms, 750);
        assert!(config.sound);
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.auto_open_delay_ms, DEFAULT_AUTO_OPEN_DELAY_MS);
        assert!(config.sparkles);
    }

    #[test]
    fn negative_speed_is_accepted_as_is() {
        let config = CurtainOptions {
            speed: Some(-300),
            ..CurtainOptions::default()
        }
        .resolve();
        assert_eq!(config.speed_ms, -300);
    }

    #[test]
    fn blank_image_references_mean_no_image() {
        let config = CurtainOptions {
            left_curtain_image: Some("   ".into()),
            right_curtain_image: Some("right.png".into()),
            ..CurtainOptions::default()
        }
        .resolve();
        assert!(config.left_image.is_none());
        assert_eq!(config.right_image.as_deref(), Some("right.png"));
    }

    #[test]
    fn theme_parse_is_lenient() {
        assert_eq!(Theme::parse("ROYAL"), Theme::Royal);
        assert_eq!(Theme::parse(" gold "), Theme::Gold);
        assert_eq!(Theme::parse("elegant"), Theme::Elegant);
        assert_eq!(Theme::parse("neon"), Theme::Default);
        assert_eq!(Theme::parse(""), Theme::Default);
    }

    #[test]
    fn only_non_default_themes_carry_a_modifier() {
        assert_eq!(Theme::Default.modifier(), None);
        assert_eq!(Theme::Gold.modifier(), Some("curtain-theme-gold"));
    }

    #[test]
    fn toml_unknown_keys_are_ignored() {
        let options: CurtainOptions = toml::from_str(
            r#"
            title = "Premiere"
            theme = "elegant"
            auto-open = true
            auto-open-delay = 0
            confetti = "lots"
            "#,
        )
        .expect("valid toml");

        assert_eq!(options.title.as_deref(), Some("Premiere"));
        assert_eq!(options.theme, Some(Theme::Elegant));
        assert_eq!(options.auto_open, Some(true));
        assert_eq!(options.auto_open_delay, Some(0));
        assert!(options.speed.is_none());
    }

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let options = CurtainOptions {
            title: Some("Gala".into()),
            theme: Some(Theme::Royal),
            speed: Some(1200),
            left_curtain_image: Some("left.jpg".into()),
            ..CurtainOptions::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&options, &path).expect("failed to save options");
        let loaded = load_from_path(&path).expect("failed to load options");

        assert_eq!(loaded, options);
    }

    #[test]
    fn load_with_override_reports_missing_file_as_absent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (options, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(options.is_none());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_warns_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = valid = toml")
            .expect("failed to write invalid toml");

        let (options, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(options.is_none());
        assert!(warning.is_some());
    }

    #[test]
    fn callbacks_are_carried_through_resolution() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = CurtainOptions::default()
            .on_complete(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .resolve();

        config.on_complete.as_ref().expect("callback kept").call();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
