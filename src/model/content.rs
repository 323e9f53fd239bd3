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

//! Static page content: sections, gallery slides, band copy.

use std::path::Path;

/// Page sections in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Section {
    Home,
    About,
    Music,
    Gallery,
    Discography,
    Contact,
}

impl Section {
    pub(crate) const ALL: [Section; 6] = [
        Section::Home,
        Section::About,
        Section::Music,
        Section::Gallery,
        Section::Discography,
        Section::Contact,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Music => "Music",
            Section::Gallery => "Gallery",
            Section::Discography => "Discography",
            Section::Contact => "Contact",
        }
    }

    pub(crate) fn anchor(self) -> &'static str {
        match self {
            Section::Home => "#home",
            Section::About => "#about",
            Section::Music => "#music",
            Section::Gallery => "#gallery",
            Section::Discography => "#discography",
            Section::Contact => "#contact",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slide {
    pub(crate) title: String,
    pub(crate) caption: String,
    pub(crate) image: String,
}

const SLIDES: [(&str, &str, &str); 5] = [
    ("Live in Los Angeles", "Beauty In Death tour, The Wiltern", "gallery/live-la.jpg"),
    ("Studio Sessions", "Recording Phases in Melbourne", "gallery/studio.jpg"),
    ("Festival Season", "Main stage at sunset", "gallery/festival.jpg"),
    ("Backstage", "The calm before the show", "gallery/backstage.jpg"),
    ("On the Road", "Somewhere between cities", "gallery/road.jpg"),
];

pub(crate) fn slides(assets_dir: &Path) -> Vec<Slide> {
    let image_dir = assets_dir.join("images");

    SLIDES
        .iter()
        .map(|(title, caption, image)| Slide {
            title: title.to_string(),
            caption: caption.to_string(),
            image: image_dir.join(image).to_string_lossy().into_owned(),
        })
        .collect()
}

pub(crate) const HERO_TITLE: &str = "CHASE ATLANTIC";
pub(crate) const HERO_TAGLINE: &str = "Alternative R&B from Cairns, Australia";

pub(crate) const ABOUT_TEXT: &str = "Chase Atlantic is an Australian trio made up of brothers \
Mitchel and Christian Cave alongside Clinton Cave. Blending dark R&B, alt-pop and \
trap textures with saxophone lines and late-night atmosphere, the band has built a \
devoted following through independent releases and relentless touring.";

pub(crate) const STATS: [(&str, &str); 3] = [
    ("3", "Studio albums"),
    ("10+", "Years together"),
    ("1B+", "Streams"),
];

pub(crate) const DISCOGRAPHY: [(&str, &str, &str); 5] = [
    ("2017", "Chase Atlantic", "Album"),
    ("2019", "Phases", "Album"),
    ("2019", "Paradise", "EP"),
    ("2021", "Beauty In Death", "Album"),
    ("2023", "Lost in Heaven", "Album"),
];
