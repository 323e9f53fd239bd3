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

//! Asynchronous application task processing.
//!
//! Blocking work is offloaded from the main UI thread to a dedicated worker
//! loop that translates [`AppTask`] requests into network operations and
//! broadcasts the results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks.

mod handlers;

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    config::AppConfig,
    events::AppEvent,
    form::{ContactPayload, FormKind, submit::SubmitClient},
};

#[derive(Debug)]
pub(crate) enum AppTask {
    SubmitContact { form: FormKind, payload: ContactPayload },
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns the HTTP client and processes tasks one at a time until
/// the task channel closes.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let endpoint = config.submit_endpoint.clone();

    thread::spawn(move || {
        let client = match SubmitClient::new(endpoint) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "failed to create submission client");
                let _ = event_tx.send(AppEvent::Error(format!("Form submission unavailable: {}", e)));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                event_tx: &event_tx,
                client: &client,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Bundles shared resources required by task handlers.
struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
    client: &'a SubmitClient,
}

fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::SubmitContact { form, payload } => handlers::submit_contact(ctx, form, payload),
    }
}
