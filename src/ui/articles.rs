use crate::app::{App, Focus};
use crate::news::Article;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the article list for the visible page plus the page footer.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 4 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let is_focused = app.focus == Focus::Articles;
    let page = app.browser.page();

    let items: Vec<ListItem> = if page.is_empty() {
        vec![ListItem::new("No articles")]
    } else {
        // Leave room for borders and the date/category suffix
        let max_title = chunks[0].width.saturating_sub(4) as usize;
        page.iter()
            .enumerate()
            .map(|(i, article)| {
                let title_style = if is_focused && i == app.selected {
                    Style::default().bg(Color::DarkGray).fg(Color::White)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                let title = strip_control_chars(&article.title);
                let mut lines = vec![Line::from(Span::styled(
                    truncate_to_width(&title, max_title).into_owned(),
                    title_style,
                ))];

                let meta = meta_line(article);
                if !meta.is_empty() {
                    lines.push(Line::from(Span::styled(
                        truncate_to_width(&meta, max_title).into_owned(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                ListItem::new(lines)
            })
            .collect()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = if app.search_mode {
        format!("Search: {}_", app.search_input)
    } else {
        list_title(app.browser.current_category(), app.browser.search_terms())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    let mut state = ListState::default().with_selected((!page.is_empty()).then_some(app.selected));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let pager = app.browser.pager();
    let footer = format!(
        " Page {}/{}  ({})  {}{}",
        pager.page_index() + 1,
        pager.page_count(),
        pager.range_label(),
        if pager.has_prev() { "[p]rev " } else { "" },
        if pager.has_next() { "[n]ext" } else { "" },
    );
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
}

/// Block title naming the category and every search term applied to the list.
fn list_title(category: Option<&str>, terms: &[String]) -> String {
    let mut title = String::from("Articles");
    if let Some(cat) = category {
        title.push_str(" - ");
        title.push_str(&strip_control_chars(cat));
    }
    if !terms.is_empty() {
        let quoted: Vec<String> = terms.iter().map(|t| format!("\"{}\"", t)).collect();
        title.push_str(" - ");
        title.push_str(&quoted.join(" + "));
    }
    title
}

/// "date • category" with either part omitted when empty.
pub(super) fn meta_line(article: &Article) -> String {
    let date = strip_control_chars(&article.date);
    let category = strip_control_chars(&article.category);
    match (date.is_empty(), category.is_empty()) {
        (false, false) => format!("{} • {}", date, category),
        (false, true) => date.into_owned(),
        (true, false) => category.into_owned(),
        (true, true) => String::new(),
    }
}
