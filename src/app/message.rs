// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo host.

use crate::curtain::InputEvent;
use std::path::PathBuf;
use std::time::Instant;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The main window is open: the curtain has a surface to attach to.
    WindowOpened(iced::window::Id),
    /// Run the next auto-initialization attempt.
    BootstrapAttempt,
    /// Periodic tick driving the curtain timers.
    Tick(Instant),
    /// Native input translated for the curtain.
    Input(InputEvent),
    /// The curtain's activation button was pressed.
    OpenPressed,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Explicit global configuration file. Takes precedence over `config_dir`.
    pub config_path: Option<PathBuf>,
    /// Directory holding `curtain.toml`.
    /// Takes precedence over `ICED_CURTAIN_CONFIG_DIR` environment variable.
    pub config_dir: Option<PathBuf>,
    /// Marker attributes as `data-curtain-x=value` pairs.
    pub attrs: Vec<String>,
    /// Directory the curtain assets are resolved against (defaults to the
    /// working directory).
    pub asset_root: Option<PathBuf>,
}
