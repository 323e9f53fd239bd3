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

//! MPV-backed audio worker and event processing.
//!
//! The worker owns the `libmpv` context and operates using a dual-channel
//! communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the
//!    [`AudioPlayer`](super::AudioPlayer) proxy.
//! 2. **Event Channel**: Broadcasts [`AudioEvent`]s wrapped in
//!    [`AppEvent::Audio`] to report playback progress and outcomes.
//!
//! A file is always loaded paused. A play request made before the file has
//! finished loading is held until MPV reports the file as loaded, and only
//! then reported as started.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{events::AppEvent, player::AudioEvent};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
}

/// What the worker knows about the file MPV currently holds.
#[derive(Debug, Default)]
struct LoadedFile {
    source: Option<String>,
    loaded: bool,
    start_pending: bool,
    pending_seek: Option<f64>,
}

/// Spawns the audio worker thread to process playback commands.
///
/// If MPV cannot be initialised the worker logs the failure and exits. The
/// command channel then closes, so every later command fails to send and the
/// playlist reports the track as unplayable instead of halting.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback updates.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            tracing::error!("MPV worker failure: {:#}", e);
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize, or once the
/// application side of either channel has gone away.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;

    tracing::info!("audio worker started");

    let mut file = LoadedFile::default();

    loop {
        process_commands(&mut handler, &command_rx, &mut file, &event_tx)?;
        process_mpv_events(&mut handler, &mut file, &event_tx)?;
    }
}

fn send(event_tx: &Sender<AppEvent>, event: AudioEvent) -> Result<()> {
    event_tx
        .send(AppEvent::Audio(event))
        .context("Failed to send audio event")
}

/// Drains and executes all pending commands from the application channel.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<AudioPlayerCommand>,
    file: &mut LoadedFile,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(()),
            Err(mpsc::TryRecvError::Disconnected) => anyhow::bail!("Audio command channel closed"),
        };

        match command {
            AudioPlayerCommand::Load(filename) => {
                *file = LoadedFile {
                    source: Some(filename.clone()),
                    ..LoadedFile::default()
                };

                let loaded = handler
                    .set_property("pause", true)
                    .and_then(|_| handler.command(&["loadfile", &filename, "replace"]));
                if let Err(e) = loaded {
                    tracing::warn!(file = %filename, "failed to load file: {:?}", e);
                    send(event_tx, AudioEvent::Failed(filename, format!("{:?}", e)))?;
                }
            }
            AudioPlayerCommand::Play => {
                let Some(source) = file.source.clone() else {
                    continue;
                };

                if let Err(e) = handler.set_property("pause", false) {
                    send(event_tx, AudioEvent::Failed(source, format!("{:?}", e)))?;
                } else if file.loaded {
                    send(event_tx, AudioEvent::Started(source))?;
                } else {
                    file.start_pending = true;
                }
            }
            AudioPlayerCommand::Pause => {
                file.start_pending = false;
                if let Err(e) = handler.set_property("pause", true) {
                    tracing::warn!("failed to pause: {:?}", e);
                }
            }
            AudioPlayerCommand::Seek(seconds) => {
                if file.loaded {
                    if let Err(e) = handler.command(&["seek", &seconds.to_string(), "absolute"]) {
                        tracing::warn!(seconds, "failed to seek: {:?}", e);
                    }
                } else {
                    file.pending_seek = Some(seconds);
                }
            }
            AudioPlayerCommand::SetVolume(volume) => {
                if let Err(e) = handler.set_property("volume", volume * 100.0) {
                    tracing::warn!(volume, "failed to set volume: {:?}", e);
                }
            }
        }
    }
}

/// Polls for MPV events and reports them to the application.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    file: &mut LoadedFile,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let audio_event = match mpv_event {
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("duration", Format::Double(duration)) => Some(AudioEvent::DurationChanged(duration)),
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                Some(AudioEvent::TimeChanged(seconds))
            }
            _ => None,
        },
        mpv::Event::FileLoaded => {
            file.loaded = true;

            if let Some(seconds) = file.pending_seek.take() {
                if let Err(e) = handler.command(&["seek", &seconds.to_string(), "absolute"]) {
                    tracing::warn!(seconds, "failed to apply deferred seek: {:?}", e);
                }
            }

            if file.start_pending {
                file.start_pending = false;
                file.source.clone().map(AudioEvent::Started)
            } else {
                None
            }
        }
        // Replacing a file ends the previous one with a stop reason, which
        // must not disturb the state already reset for the new file.
        mpv::Event::EndFile(result) => {
            let source = file.source.clone().unwrap_or_default();
            let event = match result {
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => {
                    Some(AudioEvent::Finished(source))
                }
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => {
                    Some(AudioEvent::Failed(source, "playback error".to_string()))
                }
                Ok(_) => None,
                Err(e) => Some(AudioEvent::Failed(source, format!("{:?}", e))),
            };

            if event.is_some() {
                file.loaded = false;
                file.start_pending = false;
            }
            event
        }
        _ => None,
    };

    if let Some(event) = audio_event {
        send(event_tx, event)?;
    }

    Ok(())
}
