// SPDX-License-Identifier: MPL-2.0
//! Auto-initialization: locating the page configuration and retrying until
//! the controller surface is available.
//!
//! Configuration is taken from the first source present:
//! 1. A marker (`data-curtain-*` attributes, present iff `data-curtain-auto` is)
//! 2. The global options (`curtain.toml`)
//! 3. Defaults

use crate::config::{
    CurtainOptions, Theme, DEFAULT_AUTO_OPEN_DELAY_MS, DEFAULT_BUTTON_TEXT, DEFAULT_SPEED_MS,
    DEFAULT_SUBTITLE, DEFAULT_TITLE,
};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Delay before the first attempt.
pub const FIRST_ATTEMPT_DELAY: Duration = Duration::from_millis(100);

/// Delay between attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(500);

pub const MAX_ATTEMPTS: u32 = 10;

const ATTR_PREFIX: &str = "data-curtain-";

// =============================================================================
// Marker
// =============================================================================

/// `data-curtain-*` attributes of the marker element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerAttributes {
    attrs: BTreeMap<String, String>,
}

impl MarkerAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `name=value` pairs. Names may omit the `data-curtain-` prefix;
    /// a pair without `=` sets an empty value.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut marker = Self::new();
        for pair in pairs {
            let (name, value) = pair
                .as_ref()
                .split_once('=')
                .unwrap_or((pair.as_ref(), ""));
            marker.set(name, value);
        }
        marker
    }

    /// Sets one attribute.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.trim();
        let key = name.strip_prefix(ATTR_PREFIX).unwrap_or(name);
        self.attrs.insert(key.to_lowercase(), value.to_string());
    }

    /// Attribute value by short name (`"title"` for `data-curtain-title`).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the attributes form a marker.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.attrs.contains_key("auto")
    }

    /// Non-empty attribute value.
    fn text(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Maps the marker onto a complete set of options, or `None` when no
    /// marker is present.
    ///
    /// Every field is filled: missing or empty attributes use the default.
    #[must_use]
    pub fn to_options(&self) -> Option<CurtainOptions> {
        if !self.is_present() {
            return None;
        }

        let number = |name: &str, default: i64| {
            self.get(name)
                .and_then(parse_int_prefix)
                .filter(|value| *value != 0)
                .unwrap_or(default)
        };

        Some(CurtainOptions {
            title: Some(self.text("title").unwrap_or(DEFAULT_TITLE).to_string()),
            subtitle: Some(self.text("subtitle").unwrap_or(DEFAULT_SUBTITLE).to_string()),
            button_text: Some(
                self.text("button")
                    .unwrap_or(DEFAULT_BUTTON_TEXT)
                    .to_string(),
            ),
            theme: Some(Theme::parse(self.text("theme").unwrap_or("default"))),
            auto_open: Some(self.get("auto") == Some("true")),
            auto_open_delay: Some(number("delay", DEFAULT_AUTO_OPEN_DELAY_MS)),
            sparkles: Some(self.get("sparkles") != Some("false")),
            sound: Some(self.get("sound") == Some("true")),
            speed: Some(number("speed", DEFAULT_SPEED_MS)),
            left_curtain_image: self.text("left-image").map(str::to_string),
            right_curtain_image: self.text("right-image").map(str::to_string),
            ..CurtainOptions::default()
        })
    }
}

/// Parses the leading integer of `raw`: optional whitespace and sign, then
/// digits. Trailing garbage is ignored; no digits yields `None`.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Source Resolution
// =============================================================================

/// Where the options used for `init` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Marker,
    Global,
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Marker => write!(f, "marker attributes"),
            ConfigSource::Global => write!(f, "global configuration"),
            ConfigSource::Defaults => write!(f, "default settings"),
        }
    }
}

/// Picks the options to initialize with: marker, then global, then defaults.
#[must_use]
pub fn resolve_options(
    marker: &MarkerAttributes,
    global: Option<CurtainOptions>,
) -> (CurtainOptions, ConfigSource) {
    if let Some(options) = marker.to_options() {
        return (options, ConfigSource::Marker);
    }
    match global {
        Some(options) => (options, ConfigSource::Global),
        None => (CurtainOptions::default(), ConfigSource::Defaults),
    }
}

// =============================================================================
// Retry
// =============================================================================

/// Outcome of one initialization attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Attempt<T> {
    /// The controller surface was found.
    Ready(T),
    /// Not available yet; try again after the delay.
    RetryIn(Duration),
    /// Every attempt failed.
    GaveUp,
}

/// Bounded retry loop for locating the controller surface.
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    attempts: u32,
    done: bool,
}

impl Bootstrap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts made so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the protocol has finished, successfully or not.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Runs one attempt. `locate` returns the controller surface when it is
    /// available.
    pub fn attempt<T>(&mut self, locate: impl FnOnce() -> Option<T>) -> Attempt<T> {
        if self.done {
            return Attempt::GaveUp;
        }

        self.attempts += 1;
        log::debug!("Initialization attempt {}/{MAX_ATTEMPTS}", self.attempts);

        if let Some(surface) = locate() {
            log::info!("Curtain controller found, initializing");
            self.done = true;
            return Attempt::Ready(surface);
        }

        log::warn!("Curtain controller not available yet (attempt {})", self.attempts);
        if self.attempts < MAX_ATTEMPTS {
            return Attempt::RetryIn(RETRY_INTERVAL);
        }

        log::error!(
            "Failed to initialize the curtain after {MAX_ATTEMPTS} attempts; \
             check that the window opened and the curtain assets are accessible"
        );
        self.done = true;
        Attempt::GaveUp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(pairs: &[&str]) -> MarkerAttributes {
        MarkerAttributes::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn marker_requires_auto_attribute() {
        assert!(!marker(&["data-curtain-title=Hi"]).is_present());
        assert!(marker(&["data-curtain-auto=false"]).is_present());
        assert!(marker(&["auto"]).is_present());
    }

    #[test]
    fn marker_without_values_uses_defaults() {
        let options = marker(&["data-curtain-auto="]).to_options().unwrap();
        let config = options.resolve();

        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.subtitle, DEFAULT_SUBTITLE);
        assert_eq!(config.button_text, DEFAULT_BUTTON_TEXT);
        assert_eq!(config.theme, Theme::Default);
        assert!(!config.auto_open);
        assert_eq!(config.auto_open_delay_ms, 5000);
        assert!(config.sparkles);
        assert!(!config.sound);
        assert_eq!(config.speed_ms, 2000);
        assert_eq!(config.left_image, None);
    }

    #[test]
    fn marker_maps_every_attribute() {
        let config = marker(&[
            "data-curtain-auto=true",
            "data-curtain-title=Gala",
            "data-curtain-subtitle=Tonight",
            "data-curtain-button=Enter",
            "data-curtain-theme=royal",
            "data-curtain-delay=750",
            "data-curtain-sparkles=false",
            "data-curtain-sound=true",
            "data-curtain-speed=1200ms",
            "data-curtain-left-image=left.png",
            "data-curtain-right-image=right.png",
        ])
        .to_options()
        .unwrap()
        .resolve();

        assert_eq!(config.title, "Gala");
        assert_eq!(config.subtitle, "Tonight");
        assert_eq!(config.button_text, "Enter");
        assert_eq!(config.theme, Theme::Royal);
        assert!(config.auto_open);
        assert_eq!(config.auto_open_delay_ms, 750);
        assert!(!config.sparkles);
        assert!(config.sound);
        assert_eq!(config.speed_ms, 1200);
        assert_eq!(config.left_image.as_deref(), Some("left.png"));
        assert_eq!(config.right_image.as_deref(), Some("right.png"));
    }

    #[test]
    fn boolean_attributes_only_match_exact_literals() {
        let config = marker(&["auto=TRUE", "sound=yes", "sparkles=no"])
            .to_options()
            .unwrap()
            .resolve();
        assert!(!config.auto_open);
        assert!(!config.sound);
        assert!(config.sparkles);
    }

    #[test]
    fn zero_or_garbage_numbers_fall_back_to_defaults() {
        let config = marker(&["auto=true", "delay=0", "speed=fast"])
            .to_options()
            .unwrap()
            .resolve();
        assert_eq!(config.auto_open_delay_ms, DEFAULT_AUTO_OPEN_DELAY_MS);
        assert_eq!(config.speed_ms, DEFAULT_SPEED_MS);
    }

    #[test]
    fn negative_numbers_are_kept() {
        let config = marker(&["auto=true", "speed=-300"])
            .to_options()
            .unwrap()
            .resolve();
        assert_eq!(config.speed_ms, -300);
    }

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  42px"), Some(42));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        assert_eq!(parse_int_prefix("-15.5"), Some(-15));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("abc"), None);
    }

    #[test]
    fn marker_takes_priority_over_global() {
        let global = CurtainOptions {
            title: Some("Global".into()),
            ..CurtainOptions::default()
        };
        let (options, source) = resolve_options(&marker(&["auto=false"]), Some(global));
        assert_eq!(source, ConfigSource::Marker);
        assert_eq!(options.title.as_deref(), Some(DEFAULT_TITLE));
    }

    #[test]
    fn global_used_without_marker() {
        let global = CurtainOptions {
            title: Some("Global".into()),
            ..CurtainOptions::default()
        };
        let (options, source) = resolve_options(&MarkerAttributes::new(), Some(global));
        assert_eq!(source, ConfigSource::Global);
        assert_eq!(options.title.as_deref(), Some("Global"));
    }

    #[test]
    fn defaults_used_without_marker_or_global() {
        let (options, source) = resolve_options(&MarkerAttributes::new(), None);
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(options, CurtainOptions::default());
    }

    #[test]
    fn bootstrap_succeeds_on_first_available_attempt() {
        let mut bootstrap = Bootstrap::new();
        assert_eq!(bootstrap.attempt(|| None::<()>), Attempt::RetryIn(RETRY_INTERVAL));
        assert_eq!(bootstrap.attempt(|| Some(7)), Attempt::Ready(7));
        assert_eq!(bootstrap.attempts(), 2);
        assert!(bootstrap.is_done());
    }

    #[test]
    fn bootstrap_gives_up_after_ten_attempts() {
        let mut bootstrap = Bootstrap::new();
        for _ in 0..MAX_ATTEMPTS - 1 {
            assert_eq!(bootstrap.attempt(|| None::<()>), Attempt::RetryIn(RETRY_INTERVAL));
        }
        assert_eq!(bootstrap.attempt(|| None::<()>), Attempt::GaveUp);
        assert_eq!(bootstrap.attempts(), MAX_ATTEMPTS);

        let mut called = false;
        let outcome = bootstrap.attempt(|| {
            called = true;
            Some(())
        });
        assert_eq!(outcome, Attempt::GaveUp);
        assert!(!called);
    }
}
