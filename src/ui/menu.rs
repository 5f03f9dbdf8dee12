use crate::app::{App, Focus};
use crate::news::Category;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the category menu panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Menu;
    let current = app.browser.current_category();
    let label_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .browser
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let active = current.is_some_and(|c| c.to_lowercase() == category.name.to_lowercase());
            let marker = if active { "* " } else { "  " };
            let mut style = Style::default();
            if active {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if is_focused && i == app.menu.cursor() {
                style = style.bg(Color::DarkGray).fg(Color::White);
            }
            ListItem::new(Line::styled(
                format!("{}{}", marker, menu_label(category, label_width)),
                style,
            ))
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Categories"),
    );

    let mut state = ListState::default().with_selected(Some(app.menu.cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

/// Category name made safe for the terminal and fitted to `width` columns.
fn menu_label(category: &Category, width: usize) -> String {
    let name = strip_control_chars(&category.name);
    truncate_to_width(&name, width).into_owned()
}
