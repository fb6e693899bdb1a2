// SPDX-License-Identifier: MPL-2.0
//! The curtain overlay: two symmetric panels, the content box and the
//! particle layer.

use super::particles::{Particle, ParticleId};
use crate::config::{CurtainConfig, Theme};
use std::time::Duration;

/// Which curtain half a panel represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One curtain half.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    side: Side,
    image: Option<String>,
    transition: Duration,
}

impl Panel {
    fn new(side: Side, transition: Duration) -> Self {
        Self {
            side,
            image: None,
            transition,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Background image reference, if one was applied.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Duration of the sliding transition.
    #[must_use]
    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Applies an image when the reference is not blank. Blank references
    /// leave the current background untouched.
    pub(crate) fn apply_image(&mut self, image: Option<&str>) {
        if let Some(path) = image.filter(|path| !path.trim().is_empty()) {
            log::info!("{:?} curtain image applied: {path}", self.side);
            self.image = Some(path.to_string());
        }
    }
}

/// Visual artifact covering the page while the curtain is live.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    left: Panel,
    right: Panel,
    title: String,
    subtitle: String,
    button_text: String,
    theme: Theme,
    /// Panels are sliding and the button pulses.
    opening: bool,
    /// The overlay is visually dismissed, awaiting removal.
    revealed: bool,
    particles: Vec<Particle>,
}

impl Overlay {
    /// Builds the overlay from a resolved configuration.
    pub(crate) fn build(config: &CurtainConfig, transition: Duration) -> Self {
        Self {
            left: Panel::new(Side::Left, transition),
            right: Panel::new(Side::Right, transition),
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            button_text: config.button_text.clone(),
            theme: config.theme,
            opening: false,
            revealed: false,
            particles: Vec::new(),
        }
    }

    #[must_use]
    pub fn left(&self) -> &Panel {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &Panel {
        &self.right
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.opening
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub(crate) fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = subtitle.into();
    }

    pub(crate) fn set_button_text(&mut self, text: impl Into<String>) {
        self.button_text = text.into();
    }

    /// Replaces the theme modifier. The previous one is dropped.
    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub(crate) fn apply_images(&mut self, left: Option<&str>, right: Option<&str>) {
        self.left.apply_image(left);
        self.right.apply_image(right);
    }

    pub(crate) fn mark_opening(&mut self) {
        self.opening = true;
    }

    pub(crate) fn mark_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Removes a particle. Returns `false` if it was already gone.
    pub(crate) fn remove_particle(&mut self, id: ParticleId) -> bool {
        let before = self.particles.len();
        self.particles.retain(|p| p.id() != id);
        self.particles.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurtainOptions;

    fn overlay() -> Overlay {
        Overlay::build(&CurtainOptions::default().resolve(), Duration::from_secs(2))
    }

    #[test]
    fn build_copies_content_from_config() {
        let config = CurtainOptions {
            title: Some("Opening Night".into()),
            theme: Some(Theme::Royal),
            ..CurtainOptions::default()
        }
        .resolve();
        let overlay = Overlay::build(&config, Duration::from_millis(800));

        assert_eq!(overlay.title(), "Opening Night");
        assert_eq!(overlay.subtitle(), "Click to Enter");
        assert_eq!(overlay.theme(), Theme::Royal);
        assert_eq!(overlay.left().transition(), Duration::from_millis(800));
        assert_eq!(overlay.right().side(), Side::Right);
        assert!(!overlay.is_opening());
        assert!(!overlay.is_revealed());
    }

    #[test]
    fn blank_image_keeps_previous_background() {
        let mut overlay = overlay();
        overlay.apply_images(Some("velvet-left.png"), None);
        overlay.apply_images(Some(""), Some("velvet-right.png"));

        assert_eq!(overlay.left().image(), Some("velvet-left.png"));
        assert_eq!(overlay.right().image(), Some("velvet-right.png"));
    }

    #[test]
    fn theme_switch_is_exclusive() {
        let mut overlay = overlay();
        overlay.set_theme(Theme::Royal);
        overlay.set_theme(Theme::Gold);
        assert_eq!(overlay.theme(), Theme::Gold);
        assert_eq!(overlay.theme().modifier(), Some("curtain-theme-gold"));
    }
}
