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

use std::time::{Duration, Instant};

use crate::{
    App,
    form::{ContactPayload, FormKind},
    player::AudioEvent,
    tasks::AppTask,
    util::notice::{Notice, NoticeKind},
};

const STATUS_TTL: Duration = Duration::from_secs(5);

pub(super) fn handle_audio_event(app: &mut App, event: AudioEvent) {
    app.playlist.on_audio_event(&event);
}

pub(super) fn handle_contact_submitted(app: &mut App, form: FormKind, result: Result<(), String>) {
    let now = Instant::now();
    match form {
        FormKind::Main => app.contact_form.finish_submit(result, now),
        FormKind::Modal => app.modal.finish_submit(result, now),
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    tracing::error!(error = %message, "application error");
    app.status = Some(Notice::timed(
        NoticeKind::Error,
        message,
        STATUS_TTL,
        Instant::now(),
    ));
}

pub(super) fn handle_tick(app: &mut App) {
    let now = Instant::now();

    app.playlist.expire_notice(now);
    app.contact_form.tick(now);
    app.modal.tick(now, &mut app.history);
    app.gallery.tick(now);
    app.navigation.tick(now, &app.layout);

    if app.status.as_ref().is_some_and(|n| n.is_expired(now)) {
        app.status = None;
    }
}

/// Hands a validated payload to the task worker.
///
/// If the worker has gone away the submission fails immediately, so the form
/// leaves its loading state.
pub(super) fn submit_contact(app: &mut App, form: FormKind, payload: ContactPayload) {
    if app
        .task_tx
        .send(AppTask::SubmitContact { form, payload })
        .is_err()
    {
        tracing::error!("task worker is not running");
        handle_contact_submitted(app, form, Err("submission service unavailable".to_string()));
    }
}
