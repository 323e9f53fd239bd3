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

//! Serialized form of the playlist state.
//!
//! The record keeps the field names used by earlier releases of the site so
//! that a stored session is still understood. Every field is optional on
//! read; `previousVolume` and `trackOrder` are later additions.

use serde::{Deserialize, Serialize};

pub(super) const DEFAULT_VOLUME: f64 = 0.5;

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SnapshotError {
    #[error("malformed player state: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("track index {0} out of range for {1} tracks")]
    IndexOutOfRange(usize, usize),

    #[error("volume {0} outside [0, 1]")]
    VolumeOutOfRange(f64),

    #[error("invalid playback time {0}")]
    InvalidTime(f64),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerSnapshot {
    #[serde(default)]
    pub(crate) current_track_index: usize,

    #[serde(default)]
    pub(crate) current_time: f64,

    #[serde(default = "default_volume")]
    pub(crate) volume: f64,

    #[serde(default)]
    pub(crate) is_playing: bool,

    #[serde(default)]
    pub(crate) is_shuffled: bool,

    #[serde(default)]
    pub(crate) is_repeating: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) previous_volume: Option<f64>,

    /// Track ids in play order, present only while shuffled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) track_order: Vec<u32>,
}

impl PlayerSnapshot {
    /// Parses and validates a stored record against the current track count.
    pub(crate) fn decode(json: &str, track_count: usize) -> Result<Self, SnapshotError> {
        let snapshot: PlayerSnapshot = serde_json::from_str(json)?;

        if track_count > 0 && snapshot.current_track_index >= track_count {
            return Err(SnapshotError::IndexOutOfRange(
                snapshot.current_track_index,
                track_count,
            ));
        }

        if !(0.0..=1.0).contains(&snapshot.volume) {
            return Err(SnapshotError::VolumeOutOfRange(snapshot.volume));
        }

        if !snapshot.current_time.is_finite() || snapshot.current_time < 0.0 {
            return Err(SnapshotError::InvalidTime(snapshot.current_time));
        }

        Ok(snapshot)
    }

    pub(crate) fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_fills_missing_fields_with_defaults() {
        let snapshot = PlayerSnapshot::decode("{}", 8).unwrap();
        assert_eq!(snapshot.current_track_index, 0);
        assert_eq!(snapshot.volume, DEFAULT_VOLUME);
        assert!(!snapshot.is_playing && !snapshot.is_shuffled && !snapshot.is_repeating);
        assert!(snapshot.track_order.is_empty());
    }

    #[test]
    fn decode_reads_legacy_field_names() {
        let json = r#"{"currentTrackIndex":3,"currentTime":42.5,"volume":0.8,
                       "isPlaying":true,"isShuffled":false,"isRepeating":true}"#;
        let snapshot = PlayerSnapshot::decode(json, 8).unwrap();
        assert_eq!(snapshot.current_track_index, 3);
        assert_eq!(snapshot.current_time, 42.5);
        assert_eq!(snapshot.volume, 0.8);
        assert!(snapshot.is_playing && snapshot.is_repeating);
    }

    #[test]
    fn decode_keeps_zero_volume() {
        let snapshot = PlayerSnapshot::decode(r#"{"volume":0}"#, 8).unwrap();
        assert_eq!(snapshot.volume, 0.0);
    }

    #[test]
    fn decode_rejects_invalid_records() {
        assert!(matches!(
            PlayerSnapshot::decode("not json", 8),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            PlayerSnapshot::decode(r#"{"currentTrackIndex":8}"#, 8),
            Err(SnapshotError::IndexOutOfRange(8, 8))
        ));
        assert!(matches!(
            PlayerSnapshot::decode(r#"{"volume":1.5}"#, 8),
            Err(SnapshotError::VolumeOutOfRange(_))
        ));
        assert!(matches!(
            PlayerSnapshot::decode(r#"{"currentTime":-1}"#, 8),
            Err(SnapshotError::InvalidTime(_))
        ));
    }

    #[test]
    fn encode_omits_unused_supplements() {
        let snapshot = PlayerSnapshot::decode("{}", 8).unwrap();
        let json = snapshot.encode().unwrap();
        assert!(json.contains("\"currentTrackIndex\":0"));
        assert!(!json.contains("trackOrder"));
        assert!(!json.contains("previousVolume"));
    }
}
