// SPDX-License-Identifier: MPL-2.0
//! Production audio backend for the opening cue.

mod cue_player;
pub mod output;

pub use cue_player::{CpalCuePlayer, Pcm};
pub use output::AudioOutput;
