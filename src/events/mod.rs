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

//! Application events and the main event loop.
//!
//! Every state change happens on the main thread, in response to an
//! [`AppEvent`] read from a single channel. The producers are:
//!
//! * the input thread (keyboard, mouse, resize);
//! * the tick thread, which drives all timers and animations;
//! * the audio worker;
//! * the task worker.
//!
//! # Organization
//!
//! * [`handlers`]: Non-input events (audio, submissions, ticks, errors).
//! * [`key_handlers`]: Keyboard routing.
//! * [`mouse_handlers`]: Mouse routing through the frame's hit regions.

mod handlers;
mod key_handlers;
mod mouse_handlers;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};

use crate::{
    App,
    form::FormKind,
    player::AudioEvent,
    render::draw,
    util::term::Tui,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,

    Audio(AudioEvent),

    ContactSubmitted(FormKind, Result<(), String>),

    Tick,

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(terminal: &mut Tui, app: &mut App) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => key_handlers::process_key_event(app, key)?,
            AppEvent::Mouse(mouse) => mouse_handlers::process_mouse_event(app, mouse),
            AppEvent::Audio(audio_event) => handlers::handle_audio_event(app, audio_event),
            AppEvent::ContactSubmitted(form, result) => {
                handlers::handle_contact_submitted(app, form, result)
            }
            AppEvent::Error(message) => handlers::handle_error(app, message),
            AppEvent::Tick => handlers::handle_tick(app),
            AppEvent::Resize | AppEvent::ExitApplication => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}
