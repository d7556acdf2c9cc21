use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::api::batch::FetchOutcome;
use crate::app::{App, AppMode};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Bottom status bar showing mode, fetch state, and status messages.
pub struct StatusBar<'a> {
    pub app: &'a App,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        // Background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let mut spans = Vec::new();

        // Mode indicator
        let mode_str = match self.app.mode {
            AppMode::Normal => " NORMAL ",
            AppMode::Input => " INPUT ",
            AppMode::Command => " COMMAND ",
        };
        let mode_style = Style::default()
            .bg(match self.app.mode {
                AppMode::Normal => Color::Blue,
                AppMode::Input => Color::Yellow,
                AppMode::Command => Color::Magenta,
            })
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        spans.push(Span::styled(mode_str, mode_style));
        spans.push(Span::raw(" "));

        if let Some(username) = self.app.dashboard.username() {
            spans.push(Span::styled(
                format!("@{username} "),
                bg_style.add_modifier(Modifier::BOLD),
            ));
        }

        // Fetch state
        let state = if self.app.dashboard.is_fetching() {
            let frame = SPINNER[self.app.spinner_frame % SPINNER.len()];
            format!("{frame} fetching...")
        } else {
            match self.app.dashboard.current_outcome() {
                None => "idle".to_string(),
                Some(FetchOutcome::Success(bag)) => format!("{} queries loaded", bag.len()),
                Some(FetchOutcome::Failure(_)) => "fetch failed".to_string(),
            }
        };
        spans.push(Span::styled(state, bg_style));

        // Status message (right-aligned)
        if let Some(ref msg) = self.app.status_message {
            let left_width: usize = spans.iter().map(|s| s.width()).sum();
            let msg: String = msg.chars().take(area.width as usize).collect();
            let padding = (area.width as usize).saturating_sub(left_width + msg.chars().count());
            if padding > 0 {
                spans.push(Span::styled(" ".repeat(padding), bg_style));
            }
            spans.push(Span::styled(
                msg,
                Style::default().bg(Color::DarkGray).fg(Color::Red),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
