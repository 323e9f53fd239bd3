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

//! Domain models and static site content.
//!
//! Track records are compiled into the binary and never change at runtime.
//! Controllers only index into, or reorder copies of, the list built by
//! [`catalog`]. Resource locators are resolved against the configured assets
//! directory so the same binary can be pointed at a different asset tree.

pub(crate) mod content;

use std::path::Path;

const ARTIST: &str = "Chase Atlantic";

/// A single playable track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Track {
    pub(crate) id: u32,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) duration: String,
    pub(crate) src: String,
    pub(crate) cover: String,
}

struct TrackRecord {
    id: u32,
    title: &'static str,
    album: &'static str,
    duration: &'static str,
    file: &'static str,
    cover: &'static str,
}

const TRACKS: [TrackRecord; 8] = [
    TrackRecord { id: 1, title: "Swim", album: "Chase Atlantic", duration: "3:48", file: "swim.mp3", cover: "swim.png" },
    TrackRecord { id: 2, title: "Friends", album: "Nostalgia", duration: "3:50", file: "friends.mp3", cover: "friends.jfif" },
    TrackRecord { id: 3, title: "Into It", album: "Phases", duration: "3:16", file: "into-it.mp3", cover: "into-it.jpg" },
    TrackRecord { id: 4, title: "Heaven and Back", album: "Phases", duration: "4:08", file: "heaven-and-back.mp3", cover: "heaven-and-back.jpg" },
    TrackRecord { id: 5, title: "OHMAMI", album: "Beauty In Death", duration: "3:46", file: "ohmami.mp3", cover: "ohmami.png" },
    TrackRecord { id: 6, title: "Slow Down", album: "Beauty In Death", duration: "3:32", file: "slow-down.mp3", cover: "slow-down.jpg" },
    TrackRecord { id: 7, title: "Okay", album: "Phases", duration: "3:32", file: "okay.mp3", cover: "okay.jpg" },
    TrackRecord { id: 8, title: "Consume", album: "Phases", duration: "4:27", file: "consume.mp3", cover: "consume.jpg" },
];

/// Builds the track list in its authored order.
pub(crate) fn catalog(assets_dir: &Path) -> Vec<Track> {
    let music_dir = assets_dir.join("music");
    let cover_dir = assets_dir.join("album-covers");

    TRACKS
        .iter()
        .map(|record| Track {
            id: record.id,
            title: record.title.to_string(),
            artist: ARTIST.to_string(),
            album: record.album.to_string(),
            duration: record.duration.to_string(),
            src: music_dir.join(record.file).to_string_lossy().into_owned(),
            cover: cover_dir.join(record.cover).to_string_lossy().into_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique_ordinals() {
        let tracks = catalog(Path::new("assets"));
        let ids: Vec<u32> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn catalog_resolves_locators_against_assets_dir() {
        let tracks = catalog(Path::new("/srv/site"));
        assert_eq!(
            Path::new(&tracks[0].src),
            Path::new("/srv/site/music/swim.mp3")
        );
        assert_eq!(
            Path::new(&tracks[1].cover),
            Path::new("/srv/site/album-covers/friends.jfif")
        );
        assert!(tracks.iter().all(|t| t.artist == ARTIST));
    }
}
