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

//! Audio output capability and the MPV-backed implementation.
//!
//! The playlist controller drives playback through the [`AudioOutput`] trait.
//! [`AudioPlayer`] implements it as a command proxy in front of a background
//! worker thread that owns the `libmpv` context, so audio operations never
//! block the main application thread.
//!
//! Starting playback is asynchronous: a begin request returns immediately,
//! and the outcome arrives later as an [`AudioEvent`] tagged with the source
//! it refers to.

mod commands;

use std::sync::mpsc;

use anyhow::{Context, Result};

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// Events reported by the audio worker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AudioEvent {
    /// Playback of the given source began producing sound.
    Started(String),

    /// The given source could not be played.
    Failed(String, String),

    DurationChanged(f64),
    TimeChanged(f64),

    /// The given source played through to its natural end.
    Finished(String),
}

/// The controls a playlist needs from an audio output.
pub(crate) trait AudioOutput {
    /// Assigns a new source, leaving it paused at position zero.
    fn set_source(&mut self, src: &str) -> Result<()>;

    /// The currently assigned source, if any.
    fn source(&self) -> Option<&str>;

    /// Requests playback of the current source.
    ///
    /// Completion is reported later through [`AudioEvent::Started`] or
    /// [`AudioEvent::Failed`].
    fn begin_playback(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn position(&self) -> f64;

    fn set_position(&mut self, seconds: f64) -> Result<()>;

    /// Total duration of the current source, once known.
    fn duration(&self) -> Option<f64>;

    /// Sets the output volume, in the range `[0, 1]`.
    fn set_volume(&mut self, volume: f64) -> Result<()>;

    /// Mirrors progress information carried by a worker event.
    fn observe(&mut self, event: &AudioEvent);
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread. It
/// mirrors the position, duration and volume reported back by the worker so
/// they can be read synchronously.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,

    source: Option<String>,
    position: f64,
    duration: Option<f64>,
    volume: f64,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send playback events back to the main
    ///   event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Self {
            command_tx,
            source: None,
            position: 0.0,
            duration: None,
            volume: 1.0,
        }
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .context("Audio worker is not running")
    }
}

impl AudioOutput for AudioPlayer {
    fn set_source(&mut self, src: &str) -> Result<()> {
        self.source = Some(src.to_string());
        self.position = 0.0;
        self.duration = None;
        self.send(AudioPlayerCommand::Load(src.to_string()))
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn begin_playback(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::Pause)
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.position = seconds.max(0.0);
        self.send(AudioPlayerCommand::Seek(self.position))
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        self.send(AudioPlayerCommand::SetVolume(self.volume))
    }

    fn observe(&mut self, event: &AudioEvent) {
        match event {
            AudioEvent::TimeChanged(seconds) => self.position = *seconds,
            AudioEvent::DurationChanged(seconds) if *seconds > 0.0 => {
                self.duration = Some(*seconds)
            }
            _ => {}
        }
    }
}
