// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Band Site TUI.
//!
//! A terminal rendition of a band's single-page website: a hero banner,
//! about text, a music player with a persistent playlist, a photo carousel,
//! a discography and a contact form, plus a contact modal reachable from
//! anywhere.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * **Background Workers** drive audio playback and submit contact forms
//!   without blocking the interface.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state and its animations.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod config;
mod events;
mod form;
mod gallery;
mod modal;
mod model;
mod nav;
mod player;
mod playlist;
mod render;
mod store;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use std::{
    fs::OpenOptions,
    sync::{
        Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Instant,
};
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    events::{AppEvent, process_events},
    form::{CONTACT_FIELDS, ContactForm, FormKind},
    gallery::Gallery,
    modal::ContactModal,
    nav::{Navigation, PageLayout, history::History},
    player::AudioPlayer,
    playlist::PlaylistController,
    render::hits::HitMap,
    tasks::AppTask,
    theme::Theme,
    util::{
        notice::Notice,
        term::{Tui, restore_terminal, setup_terminal},
    },
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub playlist: PlaylistController<AudioPlayer>,

    pub contact_form: ContactForm,
    pub modal: ContactModal,

    pub gallery: Gallery,

    pub navigation: Navigation,
    pub history: History,
    pub layout: PageLayout,

    /// Click regions of the last drawn frame.
    pub hits: HitMap,

    /// Whether keys are going to the page's contact form.
    pub editing_contact: bool,
    pub gallery_hovered: bool,

    /// Application-wide message shown in the footer.
    pub status: Option<Notice>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let now = Instant::now();

        let assets_dir = config.assets_dir();
        let state_path = config::state_database_path();

        let playlist = PlaylistController::new(
            model::catalog(assets_dir),
            AudioPlayer::new(event_tx.clone()),
            store::open_or_fallback(&state_path),
        );

        let contact_form = ContactForm::new(FormKind::Main, &CONTACT_FIELDS)
            .context("Failed to create contact form")?;
        let modal_form = ContactForm::new(FormKind::Modal, &CONTACT_FIELDS)
            .context("Failed to create contact modal form")?;
        let modal = ContactModal::new(modal_form, store::open_or_fallback(&state_path));

        let gallery = Gallery::new(
            model::content::slides(assets_dir),
            config.gallery_interval(),
            now,
        )
        .context("Failed to create gallery")?;

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            playlist,
            contact_form,
            modal,
            gallery,
            navigation: Navigation::new(),
            history: History::new(),
            layout: render::page_layout(),
            hits: HitMap::default(),
            editing_contact: false,
            gallery_hovered: false,
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config)?;
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "failed to load configuration, using defaults");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&Theme::to_hex(app.theme.background_colour))?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    app.playlist.save_state();
    app.modal.save_draft();
    tracing::info!("exiting");

    res.context("Application error occurred")
}

/// Sends log output to a file in the data directory, since the terminal is
/// taken over by the interface. `RUST_LOG` overrides the configured filter.
fn init_logging(config: &AppConfig) -> Result<()> {
    let path = config::log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s such as form submissions.
/// * An input thread to poll for keyboard, mouse and resize events.
/// * A tick thread to drive animations, timers and the auto-advancing
///   gallery.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Tui, app: &mut App, task_rx: Receiver<AppTask>) -> Result<()> {
    // Spawn a background worker to process application tasks asynchronously.
    let task_event_tx = app.event_tx.clone();
    tasks::spawn_task_worker(&app.config, task_rx, task_event_tx);

    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Event::Mouse(mouse) => AppEvent::Mouse(mouse),
                Event::Resize(_, _) => AppEvent::Resize,
                _ => continue,
            };
            if tx_input.send(app_event).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    let tick_interval = app.config.tick_interval();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(tick_interval);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
