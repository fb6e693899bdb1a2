// SPDX-License-Identifier: MPL-2.0
//! Curtain lifecycle state machine.
//!
//! ```text
//! Uninitialized ──init──▶ Closed ──open──▶ Opening ──speed──▶ Revealing ──1 s──▶ Removed
//!       ▲                                                                          │
//!       └───────────────────────────── destroy (from any phase) ◀──────────────────┘
//! ```
//!
//! All delayed steps go through the controller's [`Timeline`]. Every timer
//! carries the generation of the `init` call that created it, so timers left
//! over from a destroyed instance cannot touch a newer overlay. Stage timers are
//! not cancelled by [`Controller::destroy`]: a pending on-complete hook still
//! fires once its removal delay elapses.

use super::overlay::Overlay;
use super::particles::{ParticleId, Spawner};
use super::sound::{CuePlayer, SoundCue};
use super::timeline::{delay_from_millis, Timeline, TimerId};
use super::triggers::{Action, Disposition, InputEvent, Listener, TriggerBinder};
use crate::config::{
    image_reference, Callback, CurtainConfig, CurtainOptions, Theme, INITIAL_SPARKLE_COUNT,
    INITIAL_SPARKLE_STAGGER_MS, REVEAL_FADE_MS, SPARKLE_INTERVAL_MS, SPARKLE_LIFETIME_MS,
};
use std::time::Duration;

/// Lifecycle phase of the curtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No overlay. Initial state, and the state after `destroy`.
    #[default]
    Uninitialized,
    /// Overlay attached and waiting for a trigger.
    Closed,
    /// Panels are sliding open.
    Opening,
    /// Panels are open and the overlay fades out.
    Revealing,
    /// Overlay removed after a complete opening.
    Removed,
}

#[derive(Debug, Clone)]
enum Timer {
    AutoOpen { generation: u64 },
    Reveal { generation: u64, on_complete: Option<Callback> },
    Detach { generation: u64, on_complete: Option<Callback> },
    Sparkle { generation: u64 },
    SparkleTick { generation: u64 },
    ExpireParticle(ParticleId),
}

/// Owns the overlay and drives its lifecycle.
#[derive(Debug)]
pub struct Controller {
    config: CurtainConfig,
    overlay: Option<Overlay>,
    phase: Phase,
    generation: u64,
    timeline: Timeline<Timer>,
    spawner: Spawner,
    sparkle_interval: Option<TimerId>,
    binder: TriggerBinder,
    sound: SoundCue,
    scroll_locked: bool,
    opening_started: Option<Duration>,
    revealed_at: Option<Duration>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Creates an uninitialized controller with a silent cue player.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CurtainConfig::default(),
            overlay: None,
            phase: Phase::Uninitialized,
            generation: 0,
            timeline: Timeline::new(),
            spawner: Spawner::new(),
            sparkle_interval: None,
            binder: TriggerBinder::new(),
            sound: SoundCue::default(),
            scroll_locked: false,
            opening_started: None,
            revealed_at: None,
        }
    }

    /// Replaces the cue player used when sound is enabled.
    #[must_use]
    pub fn with_player(mut self, player: Box<dyn CuePlayer>) -> Self {
        self.sound = SoundCue::new(player);
        self
    }

    /// Replaces the particle spawner (e.g. with a seeded one).
    #[must_use]
    pub fn with_spawner(mut self, spawner: Spawner) -> Self {
        self.spawner = spawner;
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Builds a fresh overlay from `options`.
    ///
    /// A live overlay is torn down first, so repeated calls never leave more
    /// than one overlay or listener set behind.
    pub fn init(&mut self, options: CurtainOptions) {
        if self.overlay.is_some() {
            log::info!("Destroying previous curtain instance");
            self.destroy();
        }

        self.generation += 1;
        self.phase = Phase::Closed;
        self.opening_started = None;
        self.revealed_at = None;
        self.config = options.resolve();

        let transition = delay_from_millis(self.config.speed_ms);
        let mut overlay = Overlay::build(&self.config, transition);
        overlay.apply_images(
            self.config.left_image.as_deref(),
            self.config.right_image.as_deref(),
        );
        log::debug!("Curtain speed set to {} ms", self.config.speed_ms);
        self.overlay = Some(overlay);

        self.binder.bind();
        self.start_sparkles();

        if self.config.auto_open {
            self.timeline.schedule(
                delay_from_millis(self.config.auto_open_delay_ms),
                Timer::AutoOpen {
                    generation: self.generation,
                },
            );
        }

        self.scroll_locked = true;
        log::info!("Curtain initialized");
    }

    /// Starts the opening sequence.
    ///
    /// Does nothing while already animating, once open, or without overlay.
    pub fn open_curtains(&mut self) {
        if self.is_animating() || self.is_open() {
            log::debug!("Curtain already opening or open, ignoring trigger");
            return;
        }
        if self.overlay.is_none() {
            log::debug!("No curtain to open");
            return;
        }

        self.phase = Phase::Opening;
        self.opening_started = Some(self.timeline.now());

        if let Some(on_open) = &self.config.on_open {
            on_open.call();
        }

        if self.config.sound {
            self.sound.trigger();
        }

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.mark_opening();
        }

        self.timeline.schedule(
            delay_from_millis(self.config.speed_ms),
            Timer::Reveal {
                generation: self.generation,
                on_complete: self.config.on_complete.clone(),
            },
        );

        self.scroll_locked = true;
    }

    /// Manual trigger, same as [`Controller::open_curtains`].
    pub fn force_open(&mut self) {
        self.open_curtains();
    }

    /// Removes the overlay, resets the open/animating state and releases the
    /// scroll lock. Safe to call at any time.
    pub fn destroy(&mut self) {
        self.overlay = None;
        self.binder.unbind();
        self.phase = Phase::Uninitialized;
        self.opening_started = None;
        self.revealed_at = None;
        self.scroll_locked = false;
        log::info!("Curtain destroyed");
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Fires every timer due at or before `now` (time since controller origin).
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((id, timer)) = self.timeline.pop_due(now) {
            self.fire(id, timer);
        }
        self.timeline.settle(now);
    }

    /// Current controller time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// Whether any timer is still pending (the host needs to keep ticking).
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        self.timeline.pending() > 0
    }

    fn fire(&mut self, id: TimerId, timer: Timer) {
        match timer {
            Timer::AutoOpen { generation } => {
                if generation == self.generation {
                    self.open_curtains();
                }
            }
            Timer::Reveal {
                generation,
                on_complete,
            } => self.reveal(generation, on_complete),
            Timer::Detach {
                generation,
                on_complete,
            } => self.detach(generation, on_complete),
            Timer::Sparkle { generation } => {
                if generation == self.generation {
                    self.spawn_sparkle();
                }
            }
            Timer::SparkleTick { generation } => {
                let stale = generation != self.generation || self.overlay.is_none();
                if stale || self.is_open() {
                    self.timeline.cancel(id);
                    if self.sparkle_interval == Some(id) {
                        self.sparkle_interval = None;
                    }
                    return;
                }
                self.spawn_sparkle();
            }
            Timer::ExpireParticle(particle) => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.remove_particle(particle);
                }
            }
        }
    }

    fn reveal(&mut self, generation: u64, on_complete: Option<Callback>) {
        if generation == self.generation && self.phase == Phase::Opening {
            self.phase = Phase::Revealing;
            self.revealed_at = Some(self.timeline.now());
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.mark_revealed();
            }
        }

        self.timeline.schedule(
            Duration::from_millis(REVEAL_FADE_MS),
            Timer::Detach {
                generation,
                on_complete,
            },
        );
    }

    fn detach(&mut self, generation: u64, on_complete: Option<Callback>) {
        if generation == self.generation && self.phase == Phase::Revealing {
            self.overlay = None;
            self.binder.unbind();
            self.phase = Phase::Removed;
            self.scroll_locked = false;
            log::info!("Curtains opened successfully");
        }

        if let Some(on_complete) = on_complete {
            on_complete.call();
        }
    }

    // =========================================================================
    // Particles
    // =========================================================================

    fn start_sparkles(&mut self) {
        if !self.config.sparkles {
            return;
        }

        let generation = self.generation;
        self.sparkle_interval = Some(self.timeline.schedule_repeating(
            Duration::from_millis(SPARKLE_INTERVAL_MS),
            Timer::SparkleTick { generation },
        ));

        for i in 0..u64::from(INITIAL_SPARKLE_COUNT) {
            self.timeline.schedule(
                Duration::from_millis(i * INITIAL_SPARKLE_STAGGER_MS),
                Timer::Sparkle { generation },
            );
        }
    }

    fn spawn_sparkle(&mut self) {
        if self.is_open() {
            return;
        }
        let now = self.timeline.now();
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };

        let particle = self.spawner.spawn(now);
        self.timeline.schedule(
            Duration::from_millis(SPARKLE_LIFETIME_MS),
            Timer::ExpireParticle(particle.id()),
        );
        overlay.add_particle(particle);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feeds a host input event through the bound triggers.
    ///
    /// Clicks anywhere first give a failed opening cue its single retry.
    pub fn handle_input(&mut self, event: InputEvent) -> Disposition {
        if matches!(event, InputEvent::ButtonPressed | InputEvent::PageClick) {
            self.sound.on_page_click();
        }

        let idle = !self.is_open() && !self.is_animating();
        let (disposition, action) = self.binder.route(event, idle);
        if let Some(Action::Open) = action {
            self.open_curtains();
        }
        disposition
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    pub fn set_title(&mut self, title: &str) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_title(title);
        }
    }

    pub fn set_subtitle(&mut self, subtitle: &str) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_subtitle(subtitle);
        }
    }

    pub fn set_button_text(&mut self, text: &str) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_button_text(text);
        }
    }

    /// Applies new panel images. Blank references keep the current image.
    pub fn set_curtain_images(&mut self, left: Option<&str>, right: Option<&str>) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        self.config.left_image = image_reference(left.map(str::to_string));
        self.config.right_image = image_reference(right.map(str::to_string));
        overlay.apply_images(left, right);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_theme(theme);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether the curtain has finished its opening transition.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.is_open()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Revealing | Phase::Removed)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Opening
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &CurtainConfig {
        &self.config
    }

    /// Whether the page underneath must not scroll.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[must_use]
    pub fn listeners(&self) -> &[Listener] {
        self.binder.listeners()
    }

    #[must_use]
    pub fn sound_retry_armed(&self) -> bool {
        self.sound.retry_armed()
    }

    /// Panel transition progress, from 0.0 (closed) to 1.0 (fully open).
    #[must_use]
    pub fn open_progress(&self) -> f32 {
        match self.phase {
            Phase::Uninitialized | Phase::Closed => 0.0,
            Phase::Revealing | Phase::Removed => 1.0,
            Phase::Opening => {
                let speed = delay_from_millis(self.config.speed_ms);
                let started = self.opening_started.unwrap_or_default();
                if speed.is_zero() {
                    return 1.0;
                }
                let elapsed = self.timeline.now().saturating_sub(started);
                (elapsed.as_secs_f32() / speed.as_secs_f32()).min(1.0)
            }
        }
    }

    /// Fade-out progress of the revealed overlay, from 0.0 to 1.0.
    #[must_use]
    pub fn fade_progress(&self) -> f32 {
        match (self.phase, self.revealed_at) {
            (Phase::Revealing, Some(at)) => {
                let elapsed = self.timeline.now().saturating_sub(at);
                (elapsed.as_secs_f32() / Duration::from_millis(REVEAL_FADE_MS).as_secs_f32())
                    .min(1.0)
            }
            (Phase::Removed, _) => 1.0,
            _ => 0.0,
        }
    }
}
