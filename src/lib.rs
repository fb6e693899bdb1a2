// SPDX-License-Identifier: MPL-2.0
//! `iced_curtain` is a theatrical curtain overlay for Iced applications.
//!
//! The curtain covers the window, opens on a click, a key or a timer, and
//! removes itself once the page is revealed. Sparkles and an applause cue are
//! optional decorations.
//!
//! - [`curtain`] - The controller state machine, overlay model and view
//! - [`config`] - Options, defaults and the global `curtain.toml`
//! - [`bootstrap`] - Auto-initialization from marker attributes
//! - [`audio`] - `cpal`/`hound` backend for the opening cue
//! - [`app`] - Demo host

#![doc(html_root_url = "https://docs.rs/iced_curtain/0.1.0")]

pub mod app;
pub mod audio;
pub mod bootstrap;
pub mod config;
pub mod curtain;
pub mod error;
pub mod ui;
