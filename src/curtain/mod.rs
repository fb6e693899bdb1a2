// SPDX-License-Identifier: MPL-2.0
//! The curtain widget.
//!
//! [`Controller`] owns the lifecycle. Everything time-based runs on its
//! [`Timeline`], which the host advances; the host also feeds input through
//! [`Controller::handle_input`] and renders with [`view::view`].

mod controller;
mod overlay;
mod particles;
mod sound;
mod timeline;
mod triggers;
pub mod view;

pub use controller::{Controller, Phase};
pub use overlay::{Overlay, Panel, Side};
pub use particles::{Particle, ParticleId, Spawner};
pub use sound::{Cue, CuePlayer, NullPlayer, SoundCue, CLAPPING};
pub use timeline::{delay_from_millis, Timeline, TimerId};
pub use triggers::{Action, Disposition, InputEvent, Key, Listener, TriggerBinder};
