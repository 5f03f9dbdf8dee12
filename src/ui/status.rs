use crate::app::{App, View};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if app.loading {
        Cow::Owned(format!("Loading from {}...", app.source.describe()))
    } else if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.view {
            View::Browse if app.search_mode => {
                Cow::Borrowed("Type to search | ESC cancel | ENTER confirm")
            }
            View::Browse => {
                let updated = app
                    .last_loaded
                    .map(|t| format!("  updated {}", t.format("%H:%M")))
                    .unwrap_or_default();
                Cow::Owned(format!(
                    "[/]search [m]enu [c]lear [n/p]page [r]efresh [o]pen [?]help [q]uit{}",
                    updated
                ))
            }
            View::Reader => Cow::Borrowed("[b]ack [j/k]scroll [Ctrl+d/u]page [o]pen [q]uit"),
        }
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
