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

//! Render the music section.
//!
//! This module renders the now-playing panel, with the current track,
//! transport controls and progress bars, and the track list beneath it.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Gauge, Paragraph, Row, Table, Widget},
};

use crate::{
    App,
    player::AudioPlayer,
    playlist::{PlaybackStatus, PlaylistController},
    render::{
        content_area, draw_button, draw_heading,
        hits::{Hit, HitMap},
        icons::{
            ICON_MUTED, ICON_NEXT, ICON_NOW_PLAYING, ICON_PAUSE, ICON_PLAY, ICON_PREV,
            ICON_REPEAT, ICON_SHUFFLE, ICON_VOLUME,
        },
        notice_colour, toggle_style,
    },
    theme::Theme,
    util::format::format_time,
};

const PLAYER_HEIGHT: u16 = 9;
const TIME_WIDTH: u16 = 13;
const VOLUME_GAUGE_WIDTH: u16 = 20;
const CONTROL_GAP: u16 = 2;

pub(super) fn draw_music(buf: &mut Buffer, area: Rect, app: &App, hits: &mut HitMap) {
    let theme = &app.theme;
    let content = content_area(area);

    let [heading, _, player, _, list] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(PLAYER_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(content);

    draw_heading(buf, heading, "MUSIC", "Listen to the latest tracks", theme);
    draw_player(buf, player, &app.playlist, theme, hits);
    draw_track_list(buf, list, &app.playlist, theme, hits);
}

/// Renders the now-playing panel.
fn draw_player(
    buf: &mut Buffer,
    area: Rect,
    playlist: &PlaylistController<AudioPlayer>,
    theme: &Theme,
    hits: &mut HitMap,
) {
    let playing = playlist.is_playing();

    let block = Block::bordered()
        .title(Line::styled(" Now Playing ", Style::default().fg(theme.heading_fg)))
        .border_style(Style::default().fg(if playing {
            theme.accent_colour
        } else {
            theme.border_colour
        }));
    let inner = block.inner(area);
    block.render(area, buf);

    let [track_row, cover_row, progress_row, _, transport_row, notice_row, _] =
        Layout::vertical([Constraint::Length(1); 7]).areas(inner);

    if let Some(track) = playlist.current_track() {
        let [info, status] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(10)]).areas(track_row);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} ", ICON_NOW_PLAYING),
                Style::default().fg(theme.accent_colour),
            ),
            Span::styled(
                track.title.as_str(),
                Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" by ", Style::default().fg(theme.muted_fg)),
            Span::styled(track.artist.as_str(), Style::default().fg(theme.text_fg)),
        ]))
        .render(info, buf);

        let status_label = match playlist.status() {
            PlaybackStatus::Idle => "",
            PlaybackStatus::Loading => "Loading\u{2026}",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        };
        Paragraph::new(Line::styled(status_label, Style::default().fg(theme.muted_fg)))
            .alignment(Alignment::Right)
            .render(status, buf);

        // The cover is "playing" styled while audio runs.
        let cover_style = if playing {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(theme.muted_fg)
        };
        Paragraph::new(Line::styled(
            format!("{}  \u{25A3} {}", track.album, track.cover),
            cover_style,
        ))
        .render(cover_row, buf);
    }

    let [progress, time] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(TIME_WIDTH)]).areas(progress_row);

    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(gauge_ratio(playlist.progress_percent().unwrap_or(0.0) / 100.0))
        .label("")
        .use_unicode(true)
        .render(progress, buf);
    hits.push(progress, Hit::Progress);

    let duration = playlist.duration().unwrap_or(f64::NAN);
    Paragraph::new(Line::styled(
        format!("{} / {}", format_time(playlist.elapsed()), format_time(duration)),
        Style::default().fg(theme.text_fg),
    ))
    .alignment(Alignment::Right)
    .render(time, buf);

    draw_transport(buf, transport_row, playlist, theme, hits);

    if let Some(notice) = playlist.notice() {
        Paragraph::new(Line::styled(
            notice.message.as_str(),
            Style::default().fg(notice_colour(notice.kind, theme)),
        ))
        .render(notice_row, buf);
    }
}

/// Transport buttons on the left, volume on the right.
fn draw_transport(
    buf: &mut Buffer,
    area: Rect,
    playlist: &PlaylistController<AudioPlayer>,
    theme: &Theme,
    hits: &mut HitMap,
) {
    let button_style = Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD);

    let active = matches!(
        playlist.status(),
        PlaybackStatus::Playing | PlaybackStatus::Loading
    );
    let play_label = if active {
        format!("[{} Pause]", ICON_PAUSE)
    } else {
        format!("[{} Play]", ICON_PLAY)
    };

    let controls = [
        (format!("[{}]", ICON_PREV), button_style, Hit::PreviousTrack),
        (play_label, button_style, Hit::PlayPause),
        (format!("[{}]", ICON_NEXT), button_style, Hit::NextTrack),
        (
            format!("[{} Shuffle]", ICON_SHUFFLE),
            toggle_style(playlist.is_shuffled(), theme),
            Hit::Shuffle,
        ),
        (
            format!("[{} Repeat]", ICON_REPEAT),
            toggle_style(playlist.is_repeating(), theme),
            Hit::Repeat,
        ),
    ];

    let mut x = area.x;
    for (label, style, hit) in controls {
        let rect = draw_button(buf, x, area.y, &label, style);
        hits.push(rect, hit);
        x = rect.right() + CONTROL_GAP;
    }

    let volume_width = VOLUME_GAUGE_WIDTH + 10;
    if area.width < volume_width || x + volume_width > area.right() {
        return;
    }

    let [_, mute, gauge, label] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(5),
        Constraint::Length(VOLUME_GAUGE_WIDTH),
        Constraint::Length(5),
    ])
    .areas(area);

    let mute_icon = if playlist.is_muted() { ICON_MUTED } else { ICON_VOLUME };
    let mute_rect = draw_button(
        buf,
        mute.x,
        mute.y,
        &format!("[{}]", mute_icon),
        toggle_style(!playlist.is_muted(), theme),
    );
    hits.push(mute_rect, Hit::Mute);

    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(gauge_ratio(playlist.volume()))
        .label("")
        .use_unicode(true)
        .render(gauge, buf);
    hits.push(gauge, Hit::Volume);

    Paragraph::new(format!("{:.0}%", playlist.volume_percent()))
        .style(Style::default().fg(theme.text_fg))
        .alignment(Alignment::Right)
        .render(label, buf);
}

/// `Gauge::ratio` rejects anything outside `0..=1`, including NaN.
fn gauge_ratio(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
}

/// Renders the track list in play order. Clicking a row plays it.
fn draw_track_list(
    buf: &mut Buffer,
    area: Rect,
    playlist: &PlaylistController<AudioPlayer>,
    theme: &Theme,
    hits: &mut HitMap,
) {
    let current = playlist.position();
    let playing = playlist.is_playing();

    let rows = playlist.tracks().iter().enumerate().map(|(index, track)| {
        let indicator = if index == current && playing {
            ICON_NOW_PLAYING.to_string()
        } else {
            (index + 1).to_string()
        };

        let row = Row::new(vec![
            Cell::from(Line::from(indicator).alignment(Alignment::Right)),
            Cell::from(""),
            Cell::from(track.title.as_str()),
            Cell::from(Line::styled(track.artist.as_str(), Style::default().fg(theme.muted_fg))),
            Cell::from(
                Line::styled(track.duration.as_str(), Style::default().fg(theme.muted_fg))
                    .alignment(Alignment::Right),
            ),
        ]);

        if index == current {
            row.style(
                Style::default()
                    .fg(theme.accent_colour)
                    .bg(theme.surface_colour)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            row.style(Style::default().fg(theme.text_fg))
        }
    });

    Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Percentage(50),
            Constraint::Percentage(35),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from(Line::from("#").alignment(Alignment::Right)),
            Cell::from(""),
            Cell::from("Title"),
            Cell::from("Artist"),
            Cell::from(Line::from("Time").alignment(Alignment::Right)),
        ])
        .style(Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)),
    )
    .render(area, buf);

    // One header row, then one row per track.
    let visible = usize::from(area.height.saturating_sub(1));
    for index in 0..playlist.tracks().len().min(visible) {
        let row = Rect::new(area.x, area.y + 1 + index as u16, area.width, 1);
        hits.push(row, Hit::Track(index));
    }
}
