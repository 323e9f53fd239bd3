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

//! Render the contact modal over the rest of the frame.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget},
};

use crate::{
    App,
    modal::ModalPhase,
    render::{
        draw_button,
        form::draw_form,
        hits::{Hit, HitMap},
        icons::ICON_CLOSE,
    },
};

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 19;

/// Rows the dialog drops from while opening.
const DROP_ROWS: f64 = 4.0;

/// Draws the modal and returns the cursor position of the focused field, if
/// the modal is fully open.
pub(super) fn draw_modal(
    f: &mut Frame,
    area: Rect,
    app: &App,
    now: Instant,
    hits: &mut HitMap,
) -> Option<Position> {
    let theme = &app.theme;
    let visibility = app.modal.visibility(now);
    let active = app.modal.phase() == ModalPhase::Open;

    let buf = f.buffer_mut();

    buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
    hits.push(area, Hit::ModalBackdrop);

    let width = DIALOG_WIDTH.min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);
    let drop = ((1.0 - visibility) * DROP_ROWS).round() as u16;
    let y = area.y + (area.height - height) / 2;
    let dialog = Rect::new(
        area.x + (area.width - width) / 2,
        (y + drop).min(area.bottom().saturating_sub(height)),
        width,
        height,
    );

    Clear.render(dialog, buf);
    let block = Block::bordered()
        .title(Line::styled(
            " Get in Touch ",
            Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(theme.accent_colour))
        .style(Style::default().bg(theme.background_colour));
    let inner = block.inner(dialog);
    block.render(dialog, buf);
    hits.push(dialog, Hit::ModalDialog);

    let close_label = format!("[{}]", ICON_CLOSE);
    let close_width = close_label.chars().count() as u16;
    let close = draw_button(
        buf,
        dialog.right().saturating_sub(close_width + 2),
        dialog.y,
        &close_label,
        Style::default().fg(theme.heading_fg).add_modifier(Modifier::BOLD),
    );
    hits.push(close, Hit::ModalClose);

    let [subtitle, _, form_area, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner.inner(Margin::new(1, 0)));

    Paragraph::new(Line::styled(
        "Bookings, press and everything else",
        Style::default().fg(theme.muted_fg),
    ))
    .centered()
    .render(subtitle, buf);

    let cursor = draw_form(buf, form_area, app.modal.form(), theme, active, hits);

    Paragraph::new(Line::styled(
        "Tab next field   Ctrl+S send   Esc close",
        Style::default().fg(theme.muted_fg),
    ))
    .centered()
    .render(hint, buf);

    if !active {
        buf.set_style(dialog, Style::default().add_modifier(Modifier::DIM));
        return None;
    }

    cursor
}
