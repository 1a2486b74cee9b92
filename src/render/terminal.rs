use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};

use super::{fit_width, MenuView, RenderPort, HEADER_ROWS};
use crate::input::Key;
use crate::log_debug;
use crate::terminal_restore::TerminalRestoreGuard;

/// Full-screen ratatui display on the controlling terminal.
///
/// Owns the restore guard, so dropping the display puts the terminal back.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalRestoreGuard,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self> {
        let guard = TerminalRestoreGuard::new();
        guard.enable_raw_mode()?;
        let mut stdout = io::stdout();
        guard.enter_alt_screen(&mut stdout)?;
        guard.hide_cursor(&mut stdout)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self { terminal, guard })
    }

    pub fn restore(&self) {
        self.guard.restore();
    }
}

impl RenderPort for TerminalDisplay {
    fn draw(&mut self, view: &MenuView) -> Result<()> {
        self.terminal.draw(|frame| draw_view(frame, view))?;
        Ok(())
    }

    fn viewport(&self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or((80, 24))
    }

    fn poll_key(&mut self) -> Result<Option<Key>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(Key::from_crossterm(key)),
            Event::Resize(cols, rows) => {
                log_debug(&format!("terminal resized to {cols}x{rows}"));
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

fn draw_view(frame: &mut Frame<'_>, view: &MenuView) {
    let area = frame.size();
    let width = usize::from(area.width);

    if let Some(message) = &view.transient {
        let lines: Vec<Line> = message
            .lines()
            .map(|line| Line::from(fit_width(line, width)))
            .collect();
        let body = centered_rows(area, lines.len());
        frame.render_widget(
            Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
            body,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_ROWS), Constraint::Min(0)])
        .split(area);
    let header = chunks[0];
    let title_row = Rect::new(
        header.x,
        header.y + header.height.min(1),
        header.width,
        header.height.min(1),
    );

    let title = Paragraph::new(Line::from(Span::styled(
        fit_width(&view.title, width),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, title_row);

    let list_area = chunks[1];
    let visible = usize::from(list_area.height);
    let highlight = Style::default().fg(Color::Black).bg(Color::Cyan);
    let lines: Vec<Line> = view
        .rows()
        .into_iter()
        .enumerate()
        .skip(view.scroll_offset)
        .take(visible)
        .map(|(index, label)| {
            let text = fit_width(label, width);
            if view.selected == Some(index) {
                Line::from(Span::styled(text, highlight))
            } else {
                Line::from(text)
            }
        })
        .collect();
    let body = centered_rows(list_area, lines.len());
    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        body,
    );
}

/// Sub-rectangle of `area` holding `count` rows, vertically centred.
fn centered_rows(area: Rect, count: usize) -> Rect {
    let height = u16::try_from(count).unwrap_or(u16::MAX).min(area.height);
    let top = area.y + (area.height - height) / 2;
    Rect::new(area.x, top, area.width, height)
}
