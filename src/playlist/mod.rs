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

//! Playlist controller.
//!
//! Maintains the single authoritative "now playing" pointer into a track
//! sequence and drives one [`AudioOutput`] to match it. The controller owns
//! the play order (canonical or shuffled), the repeat and shuffle policies,
//! and the volume, and persists all of it through a [`KeyValueStore`] so a
//! later session resumes where this one stopped.
//!
//! # Playback lifecycle
//!
//! Per track the controller moves `Idle → Loading → Playing ⇄ Paused`.
//! Starting playback is asynchronous: [`PlaylistController::play`] assigns
//! the source and requests playback, and the outcome arrives later through
//! [`PlaylistController::on_audio_event`]. Outcomes are only honoured for the
//! output's *current* source, so when several requests overlap the last one
//! wins and earlier resolutions are ignored.
//!
//! # Persistence
//!
//! State is written by [`PlaylistController::save_state`] after each public
//! mutation that affects resumability, and read once at construction. A
//! stored record that cannot be understood is logged, discarded, and the
//! default state is used instead.

mod state;

use std::time::{Duration, Instant};

use rand::{rng, seq::SliceRandom};

use crate::{
    model::Track,
    player::{AudioEvent, AudioOutput},
    store::{KeyValueStore, PLAYER_STATE_KEY},
    util::notice::{Notice, NoticeKind},
};

use state::{DEFAULT_VOLUME, PlayerSnapshot};

/// How long a playback failure notice stays on screen.
pub(crate) const NOTICE_TTL: Duration = Duration::from_secs(3);

pub(crate) const SEEK_STEP_PERCENT: f64 = 5.0;
pub(crate) const VOLUME_STEP_PERCENT: f64 = 10.0;

const PLAY_FAILED_MESSAGE: &str = "Could not play the track";
const LOAD_FAILED_MESSAGE: &str = "Failed to load the track";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Next,
    Previous,
}

/// Playback status of the current track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlaybackStatus {
    /// No source assigned.
    Idle,
    /// Source assigned, waiting for the output to start.
    Loading,
    Playing,
    Paused,
}

pub(crate) struct PlaylistController<O: AudioOutput> {
    output: O,
    store: Box<dyn KeyValueStore>,

    original: Vec<Track>,
    active: Vec<Track>,
    position: usize,

    playing: bool,
    status: PlaybackStatus,
    shuffled: bool,
    repeating: bool,

    volume: f64,
    previous_volume: Option<f64>,

    notice: Option<Notice>,
}

impl<O: AudioOutput> PlaylistController<O> {
    /// Creates a controller over `tracks` and resumes any saved session.
    pub(crate) fn new(tracks: Vec<Track>, output: O, store: Box<dyn KeyValueStore>) -> Self {
        let mut controller = Self {
            output,
            store,
            original: tracks.clone(),
            active: tracks,
            position: 0,
            playing: false,
            status: PlaybackStatus::Idle,
            shuffled: false,
            repeating: false,
            volume: DEFAULT_VOLUME,
            previous_volume: None,
            notice: None,
        };

        controller.restore_state();
        controller
    }

    /// Makes the track at `index` current and starts it from the beginning.
    ///
    /// An index outside the active list is ignored.
    pub(crate) fn play(&mut self, index: usize) {
        let Some(track) = self.active.get(index) else {
            return;
        };

        let src = track.src.clone();
        tracing::debug!(index, src = %src, "play");

        self.position = index;
        self.playing = false;

        match self.output.set_source(&src) {
            Ok(()) => self.request_playback(),
            Err(e) => self.playback_failed(&format!("{:#}", e), PLAY_FAILED_MESSAGE),
        }

        self.save_state();
    }

    /// Pauses or resumes the current track, or starts the first track when
    /// nothing has been loaded yet.
    pub(crate) fn toggle_playback(&mut self) {
        if self.output.source().is_none() {
            self.play(0);
            return;
        }

        match self.status {
            PlaybackStatus::Playing | PlaybackStatus::Loading => {
                if let Err(e) = self.output.pause() {
                    tracing::warn!("failed to pause: {:#}", e);
                }
                self.playing = false;
                self.status = PlaybackStatus::Paused;
            }
            PlaybackStatus::Idle | PlaybackStatus::Paused => self.request_playback(),
        }

        self.save_state();
    }

    /// Moves to the neighbouring track, wrapping at either end.
    ///
    /// With repeat enabled, moving forward restarts the current track instead.
    pub(crate) fn advance(&mut self, direction: Direction) {
        let len = self.active.len();
        if len == 0 {
            return;
        }

        let index = match direction {
            Direction::Previous => (self.position + len - 1) % len,
            Direction::Next if self.repeating => self.position,
            Direction::Next => (self.position + 1) % len,
        };

        self.play(index);
    }

    /// Switches between shuffled and canonical play order.
    ///
    /// Enabling keeps the current track first, followed by a uniformly random
    /// permutation of the others. Disabling restores the canonical order and
    /// re-locates the current track by identity.
    pub(crate) fn set_shuffle_enabled(&mut self, enabled: bool) {
        if enabled == self.shuffled {
            return;
        }

        if enabled {
            self.shuffle_active();
        } else {
            self.unshuffle_active();
        }
        self.shuffled = enabled;

        self.save_state();
    }

    pub(crate) fn toggle_shuffle(&mut self) {
        self.set_shuffle_enabled(!self.shuffled);
    }

    pub(crate) fn set_repeat_enabled(&mut self, enabled: bool) {
        self.repeating = enabled;
        self.save_state();
    }

    pub(crate) fn toggle_repeat(&mut self) {
        self.set_repeat_enabled(!self.repeating);
    }

    /// Seeks to `percent` of the current track. Does nothing while the
    /// duration is unknown.
    pub(crate) fn seek_to_percent(&mut self, percent: f64) {
        if !percent.is_finite() {
            return;
        }
        let Some(duration) = self.output.duration().filter(|d| *d > 0.0) else {
            return;
        };

        let target = duration * percent.clamp(0.0, 100.0) / 100.0;
        if let Err(e) = self.output.set_position(target) {
            tracing::warn!(target, "failed to seek: {:#}", e);
        }
    }

    pub(crate) fn seek_by_percent(&mut self, delta: f64) {
        if let Some(current) = self.progress_percent() {
            self.seek_to_percent(current + delta);
        }
    }

    pub(crate) fn set_volume_percent(&mut self, percent: f64) {
        if !percent.is_finite() {
            return;
        }

        self.volume = percent.clamp(0.0, 100.0) / 100.0;
        if self.volume > 0.0 {
            self.previous_volume = Some(self.volume);
        }

        self.sync_volume();
        self.save_state();
    }

    pub(crate) fn adjust_volume_percent(&mut self, delta: f64) {
        self.set_volume_percent(self.volume_percent() + delta);
    }

    /// Mutes, remembering the current volume, or restores the remembered
    /// volume (half volume if none was ever set).
    pub(crate) fn toggle_mute(&mut self) {
        if self.volume > 0.0 {
            self.previous_volume = Some(self.volume);
            self.volume = 0.0;
        } else {
            self.volume = self.previous_volume.unwrap_or(DEFAULT_VOLUME);
        }

        self.sync_volume();
        self.save_state();
    }

    /// Applies an event reported by the audio output.
    pub(crate) fn on_audio_event(&mut self, event: &AudioEvent) {
        self.output.observe(event);

        match event {
            AudioEvent::Started(src)
                if self.is_current(src) && self.status == PlaybackStatus::Loading =>
            {
                self.playing = true;
                self.status = PlaybackStatus::Playing;
                self.save_state();
            }
            AudioEvent::Failed(src, reason) if self.is_current(src) => {
                self.playback_failed(reason, LOAD_FAILED_MESSAGE);
            }
            AudioEvent::Finished(src) if self.is_current(src) => {
                self.playing = false;
                self.advance(Direction::Next);
            }
            _ => {}
        }
    }

    /// Drops the transient notice once its deadline has passed.
    pub(crate) fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Writes the resumable state to the store.
    ///
    /// Storage failures are logged and otherwise ignored.
    pub(crate) fn save_state(&mut self) {
        let snapshot = self.snapshot();

        match snapshot.encode() {
            Ok(json) => {
                if let Err(e) = self.store.set(PLAYER_STATE_KEY, &json) {
                    tracing::warn!(error = %e, "failed to save player state");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode player state"),
        }
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.active
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn current_track(&self) -> Option<&Track> {
        self.active.get(self.position)
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub(crate) fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub(crate) fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub(crate) fn volume(&self) -> f64 {
        self.volume
    }

    pub(crate) fn volume_percent(&self) -> f64 {
        self.volume * 100.0
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    pub(crate) fn elapsed(&self) -> f64 {
        self.output.position()
    }

    pub(crate) fn duration(&self) -> Option<f64> {
        self.output.duration()
    }

    pub(crate) fn progress_percent(&self) -> Option<f64> {
        self.output
            .duration()
            .filter(|d| *d > 0.0)
            .map(|d| (self.output.position() / d * 100.0).clamp(0.0, 100.0))
    }

    pub(crate) fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn is_current(&self, src: &str) -> bool {
        self.output.source() == Some(src)
    }

    fn request_playback(&mut self) {
        self.status = PlaybackStatus::Loading;
        if let Err(e) = self.output.begin_playback() {
            self.playback_failed(&format!("{:#}", e), PLAY_FAILED_MESSAGE);
        }
    }

    fn playback_failed(&mut self, reason: &str, message: &str) {
        tracing::warn!(src = ?self.output.source(), reason, "playback failed");

        self.playing = false;
        self.status = if self.output.source().is_some() {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Idle
        };
        self.notice = Some(Notice::timed(
            NoticeKind::Error,
            message,
            NOTICE_TTL,
            Instant::now(),
        ));
    }

    fn sync_volume(&mut self) {
        if let Err(e) = self.output.set_volume(self.volume) {
            tracing::warn!(volume = self.volume, "failed to set volume: {:#}", e);
        }
    }

    fn shuffle_active(&mut self) {
        if self.active.is_empty() {
            return;
        }

        let current = self.active.remove(self.position);
        self.active.shuffle(&mut rng());
        self.active.insert(0, current);
        self.position = 0;
    }

    fn unshuffle_active(&mut self) {
        // The old index is meaningless after reordering, find the track itself.
        let current_id = self.active.get(self.position).map(|t| t.id);

        self.active = self.original.clone();
        self.position = current_id
            .and_then(|id| self.original.iter().position(|t| t.id == id))
            .unwrap_or(0);
    }

    /// Rebuilds a play order from stored ids, only if they are exactly a
    /// permutation of the canonical tracks.
    fn order_from_ids(&self, ids: &[u32]) -> Option<Vec<Track>> {
        if ids.len() != self.original.len() {
            return None;
        }

        let mut order = Vec::with_capacity(ids.len());
        for id in ids {
            let track = self.original.iter().find(|t| t.id == *id)?;
            if order.iter().any(|t: &Track| t.id == *id) {
                return None;
            }
            order.push(track.clone());
        }

        Some(order)
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track_index: self.position,
            current_time: self.output.position(),
            volume: self.volume,
            is_playing: matches!(
                self.status,
                PlaybackStatus::Playing | PlaybackStatus::Loading
            ),
            is_shuffled: self.shuffled,
            is_repeating: self.repeating,
            previous_volume: self.previous_volume,
            track_order: if self.shuffled {
                self.active.iter().map(|t| t.id).collect()
            } else {
                Vec::new()
            },
        }
    }

    fn restore_state(&mut self) {
        let stored = match self.store.get(PLAYER_STATE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read player state");
                None
            }
        };

        let snapshot = match stored.map(|json| PlayerSnapshot::decode(&json, self.original.len())) {
            Some(Ok(snapshot)) => Some(snapshot),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "discarding saved player state");
                if let Err(e) = self.store.remove(PLAYER_STATE_KEY) {
                    tracing::warn!(error = %e, "failed to remove player state");
                }
                None
            }
            None => None,
        };

        match snapshot {
            Some(snapshot) => self.apply_snapshot(snapshot),
            None => self.sync_volume(),
        }
    }

    fn apply_snapshot(&mut self, snapshot: PlayerSnapshot) {
        tracing::info!(
            index = snapshot.current_track_index,
            shuffled = snapshot.is_shuffled,
            "resuming player state"
        );

        self.volume = snapshot.volume;
        self.previous_volume = snapshot
            .previous_volume
            .filter(|v| *v > 0.0 && *v <= 1.0);
        self.repeating = snapshot.is_repeating;
        self.sync_volume();

        if self.original.is_empty() {
            return;
        }

        self.position = snapshot.current_track_index;
        if snapshot.is_shuffled {
            match self.order_from_ids(&snapshot.track_order) {
                Some(order) => self.active = order,
                None => self.shuffle_active(),
            }
            self.shuffled = true;
        }

        let src = self.active[self.position].src.clone();
        let cued = self.output.set_source(&src).and_then(|_| {
            if snapshot.current_time > 0.0 {
                self.output.set_position(snapshot.current_time)
            } else {
                Ok(())
            }
        });

        match cued {
            Ok(()) if snapshot.is_playing => self.request_playback(),
            Ok(()) => self.status = PlaybackStatus::Paused,
            Err(e) => tracing::warn!(src = %src, "failed to cue restored track: {:#}", e),
        }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &O {
        &self.output
    }

    #[cfg(test)]
    pub(crate) fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use anyhow::{Result, anyhow};

    use super::*;
    use crate::{model::catalog, store::MemoryStore};

    #[derive(Default)]
    struct FakeOutput {
        source: Option<String>,
        position: f64,
        duration: Option<f64>,
        volume: f64,
        loads: Vec<String>,
        begin_requests: usize,
        pauses: usize,
        reject_begin: bool,
    }

    impl AudioOutput for FakeOutput {
        fn set_source(&mut self, src: &str) -> Result<()> {
            self.source = Some(src.to_string());
            self.position = 0.0;
            self.duration = None;
            self.loads.push(src.to_string());
            Ok(())
        }

        fn source(&self) -> Option<&str> {
            self.source.as_deref()
        }

        fn begin_playback(&mut self) -> Result<()> {
            self.begin_requests += 1;
            if self.reject_begin {
                Err(anyhow!("playback rejected"))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) -> Result<()> {
            self.pauses += 1;
            Ok(())
        }

        fn position(&self) -> f64 {
            self.position
        }

        fn set_position(&mut self, seconds: f64) -> Result<()> {
            self.position = seconds;
            Ok(())
        }

        fn duration(&self) -> Option<f64> {
            self.duration
        }

        fn set_volume(&mut self, volume: f64) -> Result<()> {
            self.volume = volume;
            Ok(())
        }

        fn observe(&mut self, event: &AudioEvent) {
            match event {
                AudioEvent::TimeChanged(s) => self.position = *s,
                AudioEvent::DurationChanged(d) => self.duration = Some(*d),
                _ => {}
            }
        }
    }

    fn tracks(n: usize) -> Vec<Track> {
        catalog(Path::new("assets")).into_iter().take(n).collect()
    }

    fn controller(n: usize, store: &MemoryStore) -> PlaylistController<FakeOutput> {
        PlaylistController::new(tracks(n), FakeOutput::default(), Box::new(store.clone()))
    }

    fn start(c: &mut PlaylistController<FakeOutput>) {
        let src = c.output().source.clone().unwrap();
        c.on_audio_event(&AudioEvent::Started(src));
    }

    fn finish(c: &mut PlaylistController<FakeOutput>) {
        let src = c.output().source.clone().unwrap();
        c.on_audio_event(&AudioEvent::Finished(src));
    }

    #[test]
    fn fresh_controller_starts_idle_at_half_volume() {
        let c = controller(8, &MemoryStore::new());
        assert_eq!(c.position(), 0);
        assert!(!c.is_playing());
        assert_eq!(c.status(), PlaybackStatus::Idle);
        assert_eq!(c.volume(), 0.5);
        assert_eq!(c.output().volume, 0.5);
    }

    #[test]
    fn play_selects_track_and_output_source() {
        let mut c = controller(8, &MemoryStore::new());
        let expected = tracks(8);

        for (index, track) in expected.iter().enumerate() {
            c.play(index);
            assert_eq!(c.status(), PlaybackStatus::Loading);
            start(&mut c);

            assert_eq!(c.position(), index);
            assert!(c.is_playing());
            let current = c.current_track().unwrap();
            assert_eq!(current.title, track.title);
            assert_eq!(current.artist, track.artist);
            assert_eq!(c.output().source.as_deref(), Some(track.src.as_str()));
        }
    }

    #[test]
    fn play_out_of_range_is_ignored() {
        let mut c = controller(3, &MemoryStore::new());
        c.play(1);
        c.play(3);
        assert_eq!(c.position(), 1);
        assert_eq!(c.output().loads.len(), 1);
    }

    #[test]
    fn previous_then_next_round_trips_from_every_position() {
        for start_at in 0..5 {
            let mut c = controller(5, &MemoryStore::new());
            c.play(start_at);
            c.advance(Direction::Previous);
            assert_eq!(c.position(), (start_at + 4) % 5);
            c.advance(Direction::Next);
            assert_eq!(c.position(), start_at);
        }
    }

    #[test]
    fn toggle_without_source_plays_first_track() {
        let mut c = controller(3, &MemoryStore::new());
        c.toggle_playback();
        assert_eq!(c.position(), 0);
        assert_eq!(c.output().loads, vec![tracks(3)[0].src.clone()]);
    }

    #[test]
    fn toggle_pauses_and_resumes_without_moving() {
        let mut c = controller(3, &MemoryStore::new());
        c.play(2);
        start(&mut c);

        c.toggle_playback();
        assert!(!c.is_playing());
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert_eq!(c.output().pauses, 1);

        c.toggle_playback();
        start(&mut c);
        assert!(c.is_playing());
        assert_eq!(c.position(), 2);
        assert_eq!(c.output().loads.len(), 1);
    }

    #[test]
    fn completion_wraps_to_first_track() {
        let mut c = controller(3, &MemoryStore::new());
        c.play(2);
        start(&mut c);
        finish(&mut c);

        assert_eq!(c.position(), 0);
        assert_eq!(c.output().source.as_deref(), Some(tracks(3)[0].src.as_str()));
        assert_eq!(c.status(), PlaybackStatus::Loading);
    }

    #[test]
    fn completion_with_repeat_restarts_current_track() {
        let mut c = controller(3, &MemoryStore::new());
        c.set_repeat_enabled(true);
        c.play(2);
        start(&mut c);
        c.on_audio_event(&AudioEvent::TimeChanged(120.0));
        finish(&mut c);

        assert_eq!(c.position(), 2);
        assert_eq!(c.output().position, 0.0);
        assert_eq!(c.output().loads, vec![tracks(3)[2].src.clone(); 2]);
    }

    #[test]
    fn stale_start_is_ignored() {
        let mut c = controller(3, &MemoryStore::new());
        let srcs: Vec<String> = tracks(3).into_iter().map(|t| t.src).collect();

        c.play(0);
        c.play(1);
        c.on_audio_event(&AudioEvent::Started(srcs[0].clone()));
        assert!(!c.is_playing());

        c.on_audio_event(&AudioEvent::Started(srcs[1].clone()));
        assert!(c.is_playing());
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn stale_completion_does_not_advance() {
        let mut c = controller(3, &MemoryStore::new());
        let first = tracks(3)[0].src.clone();
        c.play(0);
        c.play(1);
        c.on_audio_event(&AudioEvent::Finished(first));
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn rejected_playback_shows_transient_notice() {
        let mut c = controller(3, &MemoryStore::new());
        c.output_mut().reject_begin = true;

        c.play(1);
        assert!(!c.is_playing());
        let notice = c.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);

        c.expire_notice(Instant::now());
        assert!(c.notice().is_some());
        c.expire_notice(Instant::now() + NOTICE_TTL);
        assert!(c.notice().is_none());

        c.output_mut().reject_begin = false;
        c.advance(Direction::Next);
        start(&mut c);
        assert!(c.is_playing());
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn load_failure_for_current_source_stops_playback() {
        let mut c = controller(3, &MemoryStore::new());
        c.play(0);
        let src = c.output().source.clone().unwrap();
        c.on_audio_event(&AudioEvent::Failed(src, "no such file".into()));

        assert!(!c.is_playing());
        assert!(c.notice().is_some());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn shuffle_keeps_current_track_first_and_restores_order() {
        let mut c = controller(8, &MemoryStore::new());
        let original = tracks(8);
        c.play(3);
        let current_id = c.current_track().unwrap().id;

        c.set_shuffle_enabled(true);
        assert_eq!(c.tracks()[0].id, current_id);
        assert_eq!(c.position(), 0);
        let mut ids: Vec<u32> = c.tracks().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());

        c.set_shuffle_enabled(false);
        assert_eq!(c.tracks(), original.as_slice());
        assert_eq!(c.current_track().unwrap().id, current_id);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn unshuffle_finds_moved_track_by_identity() {
        let mut c = controller(8, &MemoryStore::new());
        c.set_shuffle_enabled(true);
        c.play(5);
        let current_id = c.current_track().unwrap().id;

        c.set_shuffle_enabled(false);
        assert_eq!(c.current_track().unwrap().id, current_id);
        assert_eq!(c.position(), (current_id - 1) as usize);
    }

    #[test]
    fn shuffle_rest_is_evenly_distributed() {
        let mut counts: HashMap<Vec<u32>, usize> = HashMap::new();

        for _ in 0..3000 {
            let mut c = controller(4, &MemoryStore::new());
            c.set_shuffle_enabled(true);
            let order: Vec<u32> = c.tracks().iter().map(|t| t.id).collect();
            assert_eq!(order[0], 1);
            *counts.entry(order).or_default() += 1;
        }

        // 3! orderings of the remaining tracks, 500 expected each.
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|n| (350..=650).contains(n)), "{:?}", counts);
    }

    #[test]
    fn seek_waits_for_known_duration() {
        let mut c = controller(3, &MemoryStore::new());
        c.play(0);
        c.seek_to_percent(50.0);
        assert_eq!(c.output().position, 0.0);

        c.on_audio_event(&AudioEvent::DurationChanged(200.0));
        c.seek_to_percent(50.0);
        assert_eq!(c.output().position, 100.0);

        c.seek_by_percent(SEEK_STEP_PERCENT);
        assert_eq!(c.output().position, 110.0);

        c.seek_to_percent(150.0);
        assert_eq!(c.output().position, 200.0);
    }

    #[test]
    fn volume_is_clamped_and_propagated() {
        let mut c = controller(3, &MemoryStore::new());
        c.set_volume_percent(30.0);
        assert_eq!(c.volume(), 0.3);
        assert_eq!(c.output().volume, 0.3);

        c.set_volume_percent(140.0);
        assert_eq!(c.volume(), 1.0);
        assert!(!c.is_muted());
    }

    #[test]
    fn unmute_after_zero_volume_restores_last_nonzero_volume() {
        let mut c = controller(3, &MemoryStore::new());
        c.set_volume_percent(70.0);
        c.set_volume_percent(0.0);
        assert!(c.is_muted());

        c.toggle_mute();
        assert_eq!(c.volume(), 0.7);
        assert_eq!(c.output().volume, 0.7);
    }

    #[test]
    fn unmute_defaults_to_half_volume() {
        let mut c = controller(3, &MemoryStore::new());
        c.set_volume_percent(0.0);
        c.toggle_mute();
        assert_eq!(c.volume(), 0.5);
    }

    #[test]
    fn mute_then_unmute_restores_volume() {
        let mut c = controller(3, &MemoryStore::new());
        c.set_volume_percent(80.0);
        c.toggle_mute();
        assert_eq!(c.volume(), 0.0);
        c.toggle_mute();
        assert_eq!(c.volume(), 0.8);
    }

    #[test]
    fn reload_reproduces_saved_state() {
        let store = MemoryStore::new();
        let (order, current_id) = {
            let mut c = controller(8, &store);
            c.play(4);
            start(&mut c);
            c.set_shuffle_enabled(true);
            c.play(2);
            c.set_repeat_enabled(true);
            c.set_volume_percent(30.0);
            (
                c.tracks().iter().map(|t| t.id).collect::<Vec<_>>(),
                c.current_track().unwrap().id,
            )
        };

        let c = controller(8, &store);
        assert_eq!(c.position(), 2);
        assert_eq!(c.volume(), 0.3);
        assert!(c.is_shuffled());
        assert!(c.is_repeating());
        assert_eq!(c.tracks().iter().map(|t| t.id).collect::<Vec<_>>(), order);
        assert_eq!(c.current_track().unwrap().id, current_id);
    }

    #[test]
    fn reload_cues_paused_track_for_resume() {
        let store = MemoryStore::new();
        {
            let mut c = controller(3, &store);
            c.play(1);
            start(&mut c);
            c.on_audio_event(&AudioEvent::TimeChanged(42.0));
            c.toggle_playback();
        }

        let mut c = controller(3, &store);
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert_eq!(c.output().source.as_deref(), Some(tracks(3)[1].src.as_str()));
        assert_eq!(c.output().position, 42.0);
        assert_eq!(c.output().begin_requests, 0);

        c.toggle_playback();
        assert_eq!(c.output().begin_requests, 1);
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn reload_resumes_playback_when_it_was_playing() {
        let store = MemoryStore::new();
        {
            let mut c = controller(3, &store);
            c.play(2);
            start(&mut c);
        }

        let c = controller(3, &store);
        assert_eq!(c.status(), PlaybackStatus::Loading);
        assert_eq!(c.output().begin_requests, 1);
    }

    #[test]
    fn reload_keeps_zero_volume_and_unmute_target() {
        let store = MemoryStore::new();
        {
            let mut c = controller(3, &store);
            c.set_volume_percent(60.0);
            c.toggle_mute();
        }

        let mut c = controller(3, &store);
        assert_eq!(c.volume(), 0.0);
        c.toggle_mute();
        assert_eq!(c.volume(), 0.6);
    }

    #[test]
    fn corrupt_record_yields_default_state() {
        let mut store = MemoryStore::new();
        store.set(PLAYER_STATE_KEY, "{\"currentTrackIndex\": oops").unwrap();

        let c = controller(3, &store);
        assert_eq!(c.position(), 0);
        assert_eq!(c.volume(), 0.5);
        assert!(!c.is_shuffled() && !c.is_repeating());
        assert_eq!(c.status(), PlaybackStatus::Idle);
        assert_eq!(store.get(PLAYER_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn out_of_range_record_yields_default_state() {
        let mut store = MemoryStore::new();
        store.set(PLAYER_STATE_KEY, r#"{"currentTrackIndex":12,"volume":0.9}"#).unwrap();

        let c = controller(3, &store);
        assert_eq!(c.position(), 0);
        assert_eq!(c.volume(), 0.5);
    }

    #[test]
    fn shuffled_record_without_order_reshuffles_around_track() {
        let mut store = MemoryStore::new();
        store.set(PLAYER_STATE_KEY, r#"{"currentTrackIndex":2,"isShuffled":true}"#).unwrap();

        let c = controller(5, &store);
        assert!(c.is_shuffled());
        assert_eq!(c.position(), 0);
        assert_eq!(c.current_track().unwrap().id, 3);
    }

    #[test]
    fn empty_playlist_ignores_transport() {
        let mut c = controller(0, &MemoryStore::new());
        c.play(0);
        c.advance(Direction::Next);
        c.advance(Direction::Previous);
        c.set_shuffle_enabled(true);
        c.set_shuffle_enabled(false);
        assert!(c.current_track().is_none());
        assert!(c.output().loads.is_empty());
    }
}
