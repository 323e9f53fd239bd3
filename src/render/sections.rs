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

//! Static page sections, and the page's own contact section.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table, Widget, Wrap},
};

use crate::{
    App,
    model::content::{ABOUT_TEXT, DISCOGRAPHY, HERO_TAGLINE, HERO_TITLE, STATS, Section},
    render::{content_area, draw_button, draw_heading, form::draw_form, hits::{Hit, HitMap}},
};

const LISTEN_LABEL: &str = " Listen Now ";
const CONTACT_LABEL: &str = " Contact Us ";
const BUTTON_GAP: u16 = 3;

pub(super) fn draw_hero(buf: &mut Buffer, area: Rect, app: &App, hits: &mut HitMap) {
    let theme = &app.theme;
    let content = content_area(area);

    let [_, title, tagline, _, buttons, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(content);

    Paragraph::new(Line::styled(
        HERO_TITLE,
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
    ))
    .centered()
    .render(title, buf);

    Paragraph::new(Line::styled(HERO_TAGLINE, Style::default().fg(theme.text_fg)))
        .centered()
        .render(tagline, buf);

    let width = (LISTEN_LABEL.len() + CONTACT_LABEL.len()) as u16 + BUTTON_GAP;
    let x = buttons.x + buttons.width.saturating_sub(width) / 2;

    let listen = draw_button(
        buf,
        x,
        buttons.y,
        LISTEN_LABEL,
        Style::default()
            .fg(theme.heading_fg)
            .bg(theme.accent_colour)
            .add_modifier(Modifier::BOLD),
    );
    hits.push(listen, Hit::MenuEntry(Section::Music));

    let contact = draw_button(
        buf,
        listen.right() + BUTTON_GAP,
        buttons.y,
        CONTACT_LABEL,
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    );
    hits.push(contact, Hit::OpenModal);
}

pub(super) fn draw_about(buf: &mut Buffer, area: Rect, app: &App) {
    let theme = &app.theme;
    let content = content_area(area);

    let [heading, _, text, _, stats] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(content);

    draw_heading(buf, heading, "ABOUT", "Three brothers, one sound", theme);

    Paragraph::new(ABOUT_TEXT)
        .style(Style::default().fg(theme.text_fg))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(text, buf);

    let columns = Layout::horizontal([Constraint::Ratio(1, STATS.len() as u32); STATS.len()]).split(stats);
    for ((value, label), column) in STATS.iter().zip(columns.iter()) {
        let lines = vec![
            Line::styled(
                *value,
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
            ),
            Line::styled(*label, Style::default().fg(theme.muted_fg)),
        ];
        Paragraph::new(lines).centered().render(*column, buf);
    }
}

pub(super) fn draw_discography(buf: &mut Buffer, area: Rect, app: &App) {
    let theme = &app.theme;
    let content = content_area(area);

    let [heading, _, list] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(content);

    draw_heading(buf, heading, "DISCOGRAPHY", "Albums and EPs", theme);

    let rows = DISCOGRAPHY.iter().map(|(year, title, kind)| {
        Row::new(vec![
            Cell::from(Line::styled(*year, Style::default().fg(theme.muted_fg))),
            Cell::from(Line::styled(
                *title,
                Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
            )),
            Cell::from(Line::styled(*kind, Style::default().fg(theme.accent_colour)).alignment(Alignment::Right)),
        ])
    });

    Table::new(
        rows,
        [Constraint::Length(6), Constraint::Min(0), Constraint::Length(8)],
    )
    .header(
        Row::new(vec![
            Cell::from("Year"),
            Cell::from("Title"),
            Cell::from(Line::from("Type").alignment(Alignment::Right)),
        ])
        .style(Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD))
        .bottom_margin(1),
    )
    .render(list, buf);
}

/// Draws the contact section. Returns the form's cursor, in page
/// coordinates, while the form is being edited.
pub(super) fn draw_contact(buf: &mut Buffer, area: Rect, app: &App, hits: &mut HitMap) -> Option<Position> {
    let theme = &app.theme;
    let content = content_area(area);

    let [heading, _, form_area, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(content);

    draw_heading(buf, heading, "CONTACT", "Booking and press enquiries", theme);

    let cursor = draw_form(buf, form_area, &app.contact_form, theme, app.editing_contact, hits);

    let hint_text = if app.editing_contact {
        "Tab next field   Ctrl+S send   Ctrl+R clear   Esc done"
    } else {
        "Enter or click a field to start typing"
    };
    Paragraph::new(Line::styled(hint_text, Style::default().fg(theme.muted_fg)))
        .centered()
        .render(hint, buf);

    cursor
}
