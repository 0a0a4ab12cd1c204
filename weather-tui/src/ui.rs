//! Window layout, key bindings and the icon widget

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use weather_core::IconImage;

use crate::action::Action;
use crate::state::{Focus, ViewState};

const TITLE: &str = " Weather App ";
const BUTTON_WIDTH: u16 = 14;
const ICON_ROWS: u16 = 6;

/// Map a key press to an action. Returns `None` for keys the window ignores.
pub fn handle_key(key: KeyEvent, state: &ViewState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::FocusToggle),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Char(' ') if state.focus == Focus::Button => Some(Action::Submit),
        KeyCode::Char(c) if state.focus == Focus::Input => Some(Action::InputChar(c)),
        KeyCode::Backspace if state.focus == Focus::Input => Some(Action::InputBackspace),
        _ => None,
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let outer = Block::bordered().title(TITLE).title_alignment(Alignment::Center);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::vertical([
        Constraint::Length(3),         // input + button
        Constraint::Length(2),         // city | country | weather
        Constraint::Length(1),         // separator
        Constraint::Length(2),         // temperature or error
        Constraint::Length(1),         // sunrise | sunset
        Constraint::Length(1),         // local time
        Constraint::Length(1),         // feels like | humidity
        Constraint::Length(1),         // min | pressure
        Constraint::Length(1),         // max | visibility
        Constraint::Length(1),         // wind
        Constraint::Min(ICON_ROWS),    // icon
        Constraint::Length(2),         // coordinates
        Constraint::Length(1),         // key hints
    ])
    .split(inner);

    render_controls(frame, rows[0], state);

    let fields = &state.fields;
    let title = Style::default().add_modifier(Modifier::BOLD);

    render_row(frame, rows[1], [&fields.city, &fields.country, &fields.weather]);
    frame.render_widget(
        Paragraph::new("─".repeat(rows[2].width as usize))
            .style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(fields.temperature.as_str())
            .alignment(Alignment::Center)
            .style(title),
        rows[3],
    );
    render_row(frame, rows[4], [&fields.sunrise, "", &fields.sunset]);
    frame.render_widget(
        Paragraph::new(fields.local_time.as_str())
            .alignment(Alignment::Center)
            .style(title),
        rows[5],
    );
    render_row(frame, rows[6], [&fields.feels_like, "", &fields.humidity]);
    render_row(frame, rows[7], [&fields.temp_min, "", &fields.pressure]);
    render_row(frame, rows[8], [&fields.temp_max, "", &fields.visibility]);
    frame.render_widget(
        Paragraph::new(fields.wind.as_str()).alignment(Alignment::Center),
        rows[9],
    );

    if let Some(icon) = &state.icon {
        frame.render_widget(IconView::new(icon), rows[10]);
    }

    frame.render_widget(
        Paragraph::new(fields.coordinates.as_str()).alignment(Alignment::Right),
        rows[11],
    );
    render_hints(frame, rows[12], state);
}

fn render_controls(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [input_area, button_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)]).areas(area);

    let focused = Style::default().fg(Color::Cyan);
    let input_block = Block::bordered()
        .title(" City ")
        .border_style(if state.focus == Focus::Input {
            focused
        } else {
            Style::default()
        });
    frame.render_widget(
        Paragraph::new(state.input.as_str()).block(input_block),
        input_area,
    );

    if state.focus == Focus::Input {
        let typed = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
        let max_x = input_area.right().saturating_sub(2);
        let x = input_area.x.saturating_add(1).saturating_add(typed).min(max_x);
        frame.set_cursor_position(Position::new(x, input_area.y + 1));
    }

    let (label, style) = if state.is_loading() {
        (
            "Loading…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )
    } else if state.focus == Focus::Button {
        ("Update", Style::default().add_modifier(Modifier::REVERSED))
    } else {
        ("Update", Style::default())
    };
    let button_block = Block::bordered().border_style(if state.focus == Focus::Button {
        focused
    } else {
        Style::default()
    });
    frame.render_widget(
        Paragraph::new(Span::styled(label, style))
            .alignment(Alignment::Center)
            .block(button_block),
        button_area,
    );
}

fn render_row(frame: &mut Frame, area: Rect, cells: [&str; 3]) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    for (text, column) in cells.into_iter().zip(columns.iter()) {
        if !text.is_empty() {
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                *column,
            );
        }
    }
}

fn render_hints(frame: &mut Frame, area: Rect, state: &ViewState) {
    let key = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled("Enter", key),
        Span::raw(" update  "),
        Span::styled("Tab", key),
        Span::raw(" focus  "),
        Span::styled("Esc", key),
        Span::raw(" quit"),
    ];
    if state.is_loading() {
        spans.push(Span::styled(
            "  fetching…",
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::Gray)),
        area,
    );
}

/// Paints an icon with half-block cells: two vertical pixels per cell,
/// scaled to the largest square that fits, centred.
pub struct IconView<'a> {
    icon: &'a IconImage,
}

impl<'a> IconView<'a> {
    pub fn new(icon: &'a IconImage) -> Self {
        Self { icon }
    }

    fn sample(&self, x: u32, y: u32, side: u32) -> Option<Color> {
        let src_x = x * self.icon.width / side;
        let src_y = y * self.icon.height / side;
        match self.icon.pixel(src_x, src_y)? {
            [_, _, _, a] if a < 128 => None,
            [r, g, b, _] => Some(Color::Rgb(r, g, b)),
        }
    }
}

impl Widget for IconView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.icon.width == 0 || self.icon.height == 0 {
            return;
        }
        let side = area.width.min(area.height.saturating_mul(2));
        if side == 0 {
            return;
        }
        let rows = side.div_ceil(2);
        let x0 = area.x + (area.width - side) / 2;
        let y0 = area.y + (area.height - rows) / 2;
        let side_px = u32::from(side);

        for row in 0..rows {
            for col in 0..side {
                let px = u32::from(col);
                let top = self.sample(px, u32::from(row) * 2, side_px);
                let bottom = if u32::from(row) * 2 + 1 < side_px {
                    self.sample(px, u32::from(row) * 2 + 1, side_px)
                } else {
                    None
                };

                let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) else {
                    continue;
                };
                match (top, bottom) {
                    (None, None) => {}
                    (Some(fg), bg) => {
                        cell.set_symbol("▀")
                            .set_fg(fg)
                            .set_bg(bg.unwrap_or(Color::Reset));
                    }
                    (None, Some(fg)) => {
                        cell.set_symbol("▄").set_fg(fg).set_bg(Color::Reset);
                    }
                }
            }
        }
    }
}
