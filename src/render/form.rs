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

//! Render a contact form.
//!
//! Shared by the page's contact section and the modal. Each field is a
//! bordered input box titled with its label; a validation error replaces the
//! bottom border.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::{
    form::{ContactForm, FormFocus},
    render::{draw_button, hits::{Hit, HitMap}, notice_colour},
    theme::Theme,
};

const FIELD_HEIGHT: u16 = 3;

/// Draws `form` into `area`.
///
/// Focus highlighting and the returned cursor position only apply while the
/// form is `active`, i.e. receiving keyboard input.
pub(super) fn draw_form(
    buf: &mut Buffer,
    area: Rect,
    form: &ContactForm,
    theme: &Theme,
    active: bool,
    hits: &mut HitMap,
) -> Option<Position> {
    let field_count = form.fields().len();

    let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); field_count];
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let rows = Layout::vertical(constraints).split(area);

    let mut cursor = None;

    for (index, field) in form.fields().iter().enumerate() {
        let rect = rows[index];
        let focused = active && form.focus() == FormFocus::Field(index);

        let border_colour = if field.error.is_some() {
            theme.error_fg
        } else if focused {
            theme.accent_colour
        } else {
            theme.border_colour
        };

        let label = if field.spec.required {
            format!(" {} * ", field.spec.label)
        } else {
            format!(" {} ", field.spec.label)
        };

        let mut block = Block::bordered()
            .border_style(Style::default().fg(border_colour))
            .title(Line::styled(label, Style::default().fg(theme.text_fg)));
        if let Some(error) = field.error {
            block = block.title_bottom(Line::styled(
                format!(" {} ", error),
                Style::default().fg(theme.error_fg),
            ));
        }

        let inner = block.inner(rect);
        block.render(rect, buf);

        let scroll = field.input.visual_scroll(usize::from(inner.width));
        Paragraph::new(field.input.value())
            .style(Style::default().fg(theme.heading_fg))
            .scroll((0, scroll as u16))
            .render(inner, buf);

        hits.push(rect, Hit::Field(form.kind(), index));

        if focused {
            let column = field.input.visual_cursor().saturating_sub(scroll) as u16;
            cursor = Some(Position::new(inner.x + column, inner.y));
        }
    }

    let submit_style = if form.is_submitting() {
        Style::default().fg(theme.disabled_fg)
    } else if active && form.focus() == FormFocus::Submit {
        Style::default()
            .fg(theme.heading_fg)
            .bg(theme.accent_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
    };

    let submit_row = rows[field_count];
    let submit = draw_button(
        buf,
        submit_row.x,
        submit_row.y,
        &format!("[ {} ]", form.submit_label()),
        submit_style,
    );
    hits.push(submit, Hit::Submit(form.kind()));

    if let Some(notice) = form.message() {
        Paragraph::new(Line::styled(
            notice.message.as_str(),
            Style::default().fg(notice_colour(notice.kind, theme)),
        ))
        .render(rows[field_count + 1], buf);
    }

    cursor
}
