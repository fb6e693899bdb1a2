// SPDX-License-Identifier: MPL-2.0
//! Demo host: an iced window with a page and the curtain on top of it.
//!
//! Startup follows the auto-initialization protocol. The global options are
//! loaded at boot, the first attempt runs 100 ms later and succeeds once the
//! main window has opened; until then attempts are retried every 500 ms, ten
//! times at most.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};
pub use subscription::input_from_event;

use crate::audio::CpalCuePlayer;
use crate::bootstrap::{self, Attempt, Bootstrap, ConfigSource, MarkerAttributes};
use crate::config::{self, CurtainOptions};
use crate::curtain::{Controller, Disposition, InputEvent};
use iced::{window, Element, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Root application state.
pub struct App {
    controller: Controller,
    bootstrap: Bootstrap,
    marker: MarkerAttributes,
    global: Option<CurtainOptions>,
    window_id: Option<window::Id>,
    started: Instant,
    status: String,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("phase", &self.controller.phase())
            .field("bootstrap", &self.bootstrap)
            .field("window_id", &self.window_id)
            .finish_non_exhaustive()
    }
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires Fn for boot; flags are only consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Loads the global options, logging unusable files.
fn load_global(flags: &Flags) -> Option<CurtainOptions> {
    if let Some(path) = &flags.config_path {
        return match config::load_from_path(path) {
            Ok(options) => Some(options),
            Err(err) => {
                log::warn!("Ignoring {}: {err}", path.display());
                None
            }
        };
    }

    let (options, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(warning) = warning {
        log::warn!("Ignoring global configuration: {warning}");
    }
    options
}

fn sleep_then(delay: Duration, message: Message) -> Task<Message> {
    Task::perform(
        async move { tokio::time::sleep(delay).await },
        move |()| message,
    )
}

impl App {
    /// Builds the app and schedules the first initialization attempt.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let asset_root = flags.asset_root.clone().unwrap_or_else(|| PathBuf::from("."));
        let controller = Controller::new().with_player(Box::new(CpalCuePlayer::new(asset_root)));

        let app = Self::with_controller(controller, &flags);
        log::info!("Curtain script loading...");
        (
            app,
            sleep_then(bootstrap::FIRST_ATTEMPT_DELAY, Message::BootstrapAttempt),
        )
    }

    fn with_controller(controller: Controller, flags: &Flags) -> Self {
        Self {
            controller,
            bootstrap: Bootstrap::new(),
            marker: MarkerAttributes::from_pairs(&flags.attrs),
            global: load_global(flags),
            window_id: None,
            started: Instant::now(),
            status: "Waiting for the curtain...".to_string(),
        }
    }

    fn title(&self) -> String {
        "Iced Curtain".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => {
                if self.window_id.is_none() {
                    log::debug!("Main window opened");
                    self.window_id = Some(id);
                }
                Task::none()
            }
            Message::BootstrapAttempt => self.handle_bootstrap_attempt(),
            Message::Tick(now) => {
                self.sync_clock(now);
                self.refresh_status();
                Task::none()
            }
            Message::Input(event) => {
                self.handle_input(event);
                Task::none()
            }
            Message::OpenPressed => {
                self.handle_input(InputEvent::ButtonPressed);
                Task::none()
            }
        }
    }

    fn handle_bootstrap_attempt(&mut self) -> Task<Message> {
        let window_id = self.window_id;
        match self.bootstrap.attempt(|| window_id) {
            Attempt::Ready(_) => {
                let (options, source) = bootstrap::resolve_options(&self.marker, self.global.take());
                self.init_curtain(options, source);
                Task::none()
            }
            Attempt::RetryIn(delay) => sleep_then(delay, Message::BootstrapAttempt),
            Attempt::GaveUp => {
                self.refresh_status();
                Task::none()
            }
        }
    }

    fn init_curtain(&mut self, options: CurtainOptions, source: ConfigSource) {
        log::info!("Using {source}");

        let options = if options.on_open.is_none() {
            options.on_open(|| log::info!("Curtain opening"))
        } else {
            options
        };
        let options = if options.on_complete.is_none() {
            options.on_complete(|| log::info!("Curtain removed, page revealed"))
        } else {
            options
        };

        self.sync_clock(Instant::now());
        self.controller.init(options);
        self.refresh_status();
    }

    /// Advances the controller clock to wall time.
    fn sync_clock(&mut self, now: Instant) {
        self.controller
            .advance_to(now.saturating_duration_since(self.started));
    }

    fn handle_input(&mut self, event: InputEvent) {
        // Timers scheduled by the input must start from wall time, not from
        // the last tick.
        self.sync_clock(Instant::now());
        let disposition = self.controller.handle_input(event);
        if disposition != Disposition::Ignored {
            log::trace!("Curtain handled {event:?}: {disposition:?}");
        }
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        use crate::curtain::Phase;

        self.status = match self.controller.phase() {
            Phase::Uninitialized if self.bootstrap.is_done() => {
                "The curtain could not be initialized."
            }
            Phase::Uninitialized => "Waiting for the curtain...",
            Phase::Closed => "The curtain is closed.",
            Phase::Opening => "The curtain is opening...",
            Phase::Revealing => "The curtain is open.",
            Phase::Removed => "The curtain is gone. Scroll freely.",
        }
        .to_string();
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.controller.has_pending_timers()),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            controller: &self.controller,
            status: &self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curtain::{NullPlayer, Phase};
    use std::fs;
    use tempfile::tempdir;

    fn app_with(flags: Flags) -> App {
        let dir_flags = Flags {
            config_dir: flags
                .config_dir
                .clone()
                .or_else(|| Some(PathBuf::from("/nonexistent/iced_curtain"))),
            ..flags
        };
        App::with_controller(Controller::new().with_player(Box::new(NullPlayer)), &dir_flags)
    }

    fn open_window(app: &mut App) {
        let _ = app.update(Message::WindowOpened(window::Id::unique()));
    }

    #[test]
    fn attempts_before_window_opens_are_retried() {
        let mut app = app_with(Flags::default());

        let _ = app.update(Message::BootstrapAttempt);
        assert_eq!(app.controller.phase(), Phase::Uninitialized);
        assert_eq!(app.bootstrap.attempts(), 1);

        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);
        assert_eq!(app.controller.phase(), Phase::Closed);
        assert!(app.bootstrap.is_done());
    }

    #[test]
    fn gives_up_when_window_never_opens() {
        let mut app = app_with(Flags::default());
        for _ in 0..bootstrap::MAX_ATTEMPTS {
            let _ = app.update(Message::BootstrapAttempt);
        }
        assert!(app.bootstrap.is_done());
        assert_eq!(app.controller.phase(), Phase::Uninitialized);
        assert_eq!(app.status, "The curtain could not be initialized.");
    }

    #[test]
    fn marker_attributes_win_over_global_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("curtain.toml"), "title = \"From file\"\n").unwrap();

        let mut app = app_with(Flags {
            config_dir: Some(dir.path().to_path_buf()),
            attrs: vec![
                "data-curtain-auto=false".to_string(),
                "data-curtain-title=From marker".to_string(),
            ],
            ..Flags::default()
        });
        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);

        assert_eq!(app.controller.overlay().unwrap().title(), "From marker");
    }

    #[test]
    fn global_file_used_without_marker() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("curtain.toml"),
            "title = \"From file\"\ntheme = \"gold\"\n",
        )
        .unwrap();

        let mut app = app_with(Flags {
            config_dir: Some(dir.path().to_path_buf()),
            ..Flags::default()
        });
        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);

        let overlay = app.controller.overlay().unwrap();
        assert_eq!(overlay.title(), "From file");
        assert_eq!(overlay.theme(), config::Theme::Gold);
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "subtitle = \"Custom\"\n").unwrap();

        let app = app_with(Flags {
            config_path: Some(path),
            ..Flags::default()
        });
        assert_eq!(
            app.global.as_ref().and_then(|o| o.subtitle.as_deref()),
            Some("Custom")
        );
    }

    #[test]
    fn broken_config_file_is_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("curtain.toml"), "title = [").unwrap();

        let app = app_with(Flags {
            config_dir: Some(dir.path().to_path_buf()),
            ..Flags::default()
        });
        assert!(app.global.is_none());
    }

    #[test]
    fn open_button_starts_opening() {
        let mut app = app_with(Flags::default());
        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);

        let _ = app.update(Message::OpenPressed);
        assert_eq!(app.controller.phase(), Phase::Opening);
        assert_eq!(app.status, "The curtain is opening...");
    }

    #[test]
    fn enter_key_opens_the_curtain() {
        let mut app = app_with(Flags::default());
        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);

        let _ = app.update(Message::Input(InputEvent::Key(crate::curtain::Key::Enter)));
        assert!(app.controller.is_animating());
    }

    #[test]
    fn page_is_scroll_locked_while_curtain_is_live() {
        let mut app = app_with(Flags::default());
        assert!(!app.controller.is_scroll_locked());

        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);
        assert!(app.controller.is_scroll_locked());
    }

    #[test]
    fn ticks_drive_the_curtain_to_removal() {
        let mut app = app_with(Flags {
            attrs: vec!["auto".to_string(), "speed=100".to_string()],
            ..Flags::default()
        });
        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);
        let _ = app.update(Message::OpenPressed);

        let later = Instant::now() + Duration::from_secs(2);
        let _ = app.update(Message::Tick(later));

        assert_eq!(app.controller.phase(), Phase::Removed);
        assert!(!app.controller.is_scroll_locked());
        assert_eq!(app.status, "The curtain is gone. Scroll freely.");
    }

    #[test]
    fn opening_after_idle_gap_is_timed_from_the_click() {
        let mut app = app_with(Flags {
            attrs: vec![
                "auto".to_string(),
                "sparkles=false".to_string(),
                "speed=500".to_string(),
            ],
            ..Flags::default()
        });
        open_window(&mut app);
        let _ = app.update(Message::BootstrapAttempt);
        assert!(!app.controller.has_pending_timers());

        // Two idle seconds without ticks.
        app.started = app
            .started
            .checked_sub(Duration::from_secs(2))
            .expect("monotonic clock has two seconds of history");

        let _ = app.update(Message::OpenPressed);
        assert_eq!(app.controller.phase(), Phase::Opening);
        let clicked = app.controller.now();
        assert!(clicked >= Duration::from_secs(2));

        let started = app.started;
        let at = |offset_ms: u64| Message::Tick(started + clicked + Duration::from_millis(offset_ms));

        let _ = app.update(at(499));
        assert_eq!(app.controller.phase(), Phase::Opening);

        let _ = app.update(at(500));
        assert_eq!(app.controller.phase(), Phase::Revealing);
        assert!(app.controller.overlay().is_some());

        let _ = app.update(at(1499));
        assert_eq!(app.controller.phase(), Phase::Revealing);

        let _ = app.update(at(1500));
        assert_eq!(app.controller.phase(), Phase::Removed);
        assert!(!app.controller.is_scroll_locked());
    }
}
