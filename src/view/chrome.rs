//! Reader layout: passage body plus the chrome the controller asks for.
//!
//! Rendering is a pure function of [`ReaderView`]; it never consults the
//! controller or the clock.

use super::constants::{
    MENU_BUTTON_LABEL, MENU_ENTRIES, MENU_PANEL_WIDTH, SELECTION_ACTIONS, SHEET_HEIGHT_PERCENT,
    SHEET_WIDTH_PERCENT,
};
use super::passage::Passage;
use super::styles;
use crate::model::{SignalSnapshot, VisibilityOutputs};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct ReaderView<'a> {
    /// Text being read.
    pub passage: &'a Passage,
    /// First visible passage row.
    pub scroll_line: usize,
    /// Controller outputs.
    pub outputs: VisibilityOutputs,
    /// Controller signals, for panels that mirror a single signal.
    pub snapshot: SignalSnapshot,
    /// Latest scroll velocity in px/s.
    pub velocity: f64,
}

/// Rows available to the passage for a terminal of `height` rows.
///
/// One row is reserved for the top bar and one for the status line.
pub fn body_height(height: u16) -> usize {
    usize::from(height.saturating_sub(2))
}

/// Draw the full reader screen.
pub fn render_reader(frame: &mut Frame, view: &ReaderView<'_>) {
    let [top, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_passage(frame, body, view);

    if view.outputs.show_top_bar() {
        render_top_bar(frame, top, view);
    }
    if view.snapshot.is_search_active {
        render_search_bar(frame, body);
    }
    if view.snapshot.is_menu_visible {
        render_menu_panel(frame, body);
    }
    if view.outputs.show_selection_toolbar {
        render_selection_toolbar(frame, body);
    }
    if view.outputs.show_menu_button {
        render_menu_button(frame, body, view.outputs.velocity_reveal_opacity);
    }
    if view.snapshot.is_sheet_presented {
        render_settings_sheet(frame, view.snapshot);
    }

    render_status_line(frame, status, view);
}

fn render_passage(frame: &mut Frame, area: Rect, view: &ReaderView<'_>) {
    let lines: Vec<Line> = view
        .passage
        .lines()
        .iter()
        .skip(view.scroll_line)
        .take(usize::from(area.height))
        .map(|text| {
            if Passage::is_heading(text) {
                Line::styled(text.as_str(), styles::HEADING)
            } else {
                Line::raw(text.as_str())
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_top_bar(frame: &mut Frame, area: Rect, view: &ReaderView<'_>) {
    let title = view.passage.heading_at(view.scroll_line).unwrap_or("Lectern");
    let style = styles::with_opacity(styles::TOP_BAR, view.outputs.velocity_reveal_opacity);
    let bar = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::raw(title),
        Span::raw("  ·  KJV"),
    ]))
    .style(style);

    frame.render_widget(bar, area);
}

fn render_search_bar(frame: &mut Frame, body: Rect) {
    let area = Rect {
        height: body.height.min(3),
        ..body
    };
    let search = Paragraph::new(Line::styled("Search passage…", styles::MUTED_TEXT)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(styles::PANEL_BORDER),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(search, area);
}

fn render_menu_panel(frame: &mut Frame, body: Rect) {
    let area = Rect {
        width: body.width.min(MENU_PANEL_WIDTH),
        height: body.height.min(MENU_ENTRIES.len() as u16 + 2),
        ..body
    };
    let entries: Vec<Line> = MENU_ENTRIES
        .iter()
        .map(|entry| Line::raw(format!(" {entry}")))
        .collect();
    let panel = Paragraph::new(entries).block(
        Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(styles::PANEL_BORDER),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(panel, area);
}

fn render_selection_toolbar(frame: &mut Frame, body: Rect) {
    if body.height == 0 {
        return;
    }
    let area = Rect {
        y: body.y + body.height - 1,
        height: 1,
        ..body
    };
    let toolbar = Paragraph::new(SELECTION_ACTIONS.join("  ·  "))
        .alignment(Alignment::Center)
        .style(styles::SELECTION_TOOLBAR);

    frame.render_widget(toolbar, area);
}

fn render_menu_button(frame: &mut Frame, body: Rect, opacity: f32) {
    let width = MENU_BUTTON_LABEL.chars().count() as u16;
    if body.height == 0 || body.width < width {
        return;
    }
    let area = Rect {
        x: body.x + body.width - width,
        y: body.y + body.height - 1,
        width,
        height: 1,
    };
    let button = Paragraph::new(MENU_BUTTON_LABEL)
        .style(styles::with_opacity(styles::MENU_BUTTON, opacity));

    frame.render_widget(button, area);
}

fn render_settings_sheet(frame: &mut Frame, snapshot: SignalSnapshot) {
    let area = centered_rect(SHEET_WIDTH_PERCENT, SHEET_HEIGHT_PERCENT, frame.area());
    let on_off = |value: bool| if value { "on" } else { "off" };
    let content = vec![
        Line::raw(format!(
            " Always show controls: {}",
            on_off(snapshot.always_show_controls)
        )),
        Line::raw(format!(
            " Accessibility pin:    {}",
            on_off(snapshot.accessibility_forces_visible)
        )),
        Line::raw(""),
        Line::styled(" p toggles pinning · Esc closes", styles::MUTED_TEXT),
    ];
    let sheet = Paragraph::new(content).block(
        Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(styles::PANEL_BORDER),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(sheet, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, view: &ReaderView<'_>) {
    let status = Line::from(vec![
        Span::raw(format!(" {} ", view.outputs.state)),
        Span::styled(
            format!("{:>6.0} px/s  ", view.velocity),
            styles::MUTED_TEXT,
        ),
        Span::styled(
            "m menu · v select · / search · s settings · p pin · q quit",
            styles::MUTED_TEXT,
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}

/// Centered rect covering the given percentages of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "chrome_tests.rs"]
mod tests;
