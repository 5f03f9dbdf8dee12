use crate::app::{App, MAX_SCROLL};
use crate::util::strip_control_chars;
use super::articles::meta_line;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Build the reader body for an article: header, description, full text.
pub(super) fn article_lines(app: &App) -> Vec<Line<'static>> {
    let Some(article) = app.reader_article.as_ref() else {
        return vec![Line::from("No article selected")];
    };

    let mut lines = vec![Line::from(Span::styled(
        strip_control_chars(&article.title).into_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let meta = meta_line(article);
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    if !article.description.is_empty() {
        lines.push(Line::from(Span::styled(
            strip_control_chars(&article.description).into_owned(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    if article.full_text.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "Full text not available. Press [o] to open in browser.",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        let body = strip_control_chars(&article.full_text);
        for paragraph in body.lines() {
            lines.push(Line::from(paragraph.trim_end().to_string()));
            lines.push(Line::from(""));
        }
    }

    lines
}

/// Number of rows `lines` occupy when wrapped to `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| {
            let w: usize = line.spans.iter().map(|s| s.content.width()).sum();
            w.div_ceil(width).max(1)
        })
        .sum()
}

/// Render the article reader view
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let lines = article_lines(app);
    app.reader_visible_lines = area.height.saturating_sub(2) as usize;
    app.reader_total_lines = wrapped_height(&lines, area.width.saturating_sub(2));
    app.clamp_reader_scroll();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Article"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset.min(MAX_SCROLL) as u16, 0));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::news::{Article, NewsBundle};
    use crate::source::NewsSource;
    use std::path::PathBuf;

    fn reader_app(article: Article) -> App {
        let mut app = App::new(
            Config::default(),
            NewsSource::Snapshot(PathBuf::from("/tmp/newsdesk.json")),
            NewsBundle::new(vec![article], Vec::new()),
        );
        app.enter_reader();
        app
    }

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_reader_shows_all_fields() {
        let mut article = Article::new("Headline", "Economy");
        article.date = "14.10.2026 10:00".into();
        article.description = "Summary".into();
        article.full_text = "First paragraph.\nSecond \u{1b}[31mparagraph.".into();
        let app = reader_app(article);

        let text = text_of(&article_lines(&app));
        assert_eq!(text[0], "Headline");
        assert_eq!(text[1], "14.10.2026 10:00 • Economy");
        assert!(text.contains(&"Summary".to_string()));
        assert!(text.contains(&"Second paragraph.".to_string()));
    }

    #[test]
    fn test_reader_meta_strips_escapes() {
        let mut article = Article::new("Headline", "Ekonomi\u{1b}[2J");
        article.date = "\u{1b}[1m14.10.2026".into();
        let app = reader_app(article);
        let text = text_of(&article_lines(&app));
        assert_eq!(text[1], "14.10.2026 • Ekonomi");
    }

    #[test]
    fn test_reader_without_full_text_hints_browser() {
        let app = reader_app(Article::new("Headline", ""));
        let text = text_of(&article_lines(&app));
        assert!(text.iter().any(|l| l.contains("Full text not available")));
    }

    #[test]
    fn test_wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from("x".repeat(25)), Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 4);
    }
}
