use ratatui::prelude::*;
use ratatui::widgets::{HighlightSpacing, List, ListItem, Paragraph};

use promptshare_core::Prompt;
use promptshare_core::time::format_timestamp;

use crate::app::{App, FeedKind};
use crate::i18n::Msg;
use crate::theme::Palette;

pub fn render(frame: &mut Frame, app: &mut App, kind: FeedKind, area: Rect) {
    let palette = app.palette();
    let name = match kind {
        FeedKind::Browse => app.tr(Msg::TabPrompts),
        FeedKind::Mine => app.tr(Msg::TabMyPrompts),
    };
    let loading_text = app.tr(Msg::Loading);
    let no_results_text = app.tr(Msg::NoResults);
    let no_more_text = app.tr(Msg::NoMoreContent);

    let (feed, state) = match kind {
        FeedKind::Browse => (&app.browse, &mut app.browse_state),
        FeedKind::Mine => (&app.mine, &mut app.mine_state),
    };

    let mut title = format!(" {name} ");
    if !feed.filter().is_empty() {
        title.push_str(&format!("[{}] ", feed.filter()));
    }

    if feed.items().is_empty() {
        if feed.is_loading_first_page() {
            render_empty(frame, palette, &title, loading_text, palette.accent_yellow, area);
        } else if let Some(error) = feed.last_error() {
            render_empty(frame, palette, &title, error, palette.accent_red, area);
        } else {
            render_empty(frame, palette, &title, no_results_text, Color::DarkGray, area);
        }
        return;
    }

    let [list_area, status_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    let items: Vec<ListItem> = feed
        .items()
        .iter()
        .map(|prompt| prompt_item(prompt, palette))
        .collect();

    let list = List::new(items)
        .block(palette.block_dim().title(title))
        .highlight_style(
            Style::new()
                .bg(palette.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(" > ")
        .highlight_spacing(HighlightSpacing::Always);
    frame.render_stateful_widget(list, list_area, state);

    // One status line under the list: fetch errors first, then load
    // progress, then the end-of-list marker.
    let status = if let Some(error) = feed.last_error() {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::new().fg(palette.accent_red),
        ))
    } else if feed.is_loading_more() {
        Line::from(Span::styled(
            format!(" {loading_text}"),
            Style::new().fg(palette.accent_yellow).italic(),
        ))
    } else if feed.exhausted() {
        Line::from(Span::styled(
            format!(" {no_more_text}"),
            Style::new().fg(palette.text_muted),
        ))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(status), status_area);
}

fn render_empty(
    frame: &mut Frame,
    palette: &Palette,
    title: &str,
    msg: &str,
    color: Color,
    area: Rect,
) {
    let block = palette
        .block_dim()
        .title(title.to_string())
        .padding(Palette::PADDING_CARD);
    let paragraph = Paragraph::new(msg.to_string())
        .block(block)
        .style(Style::new().fg(color));
    frame.render_widget(paragraph, area);
}

fn prompt_item(prompt: &Prompt, palette: &Palette) -> ListItem<'static> {
    let mut line1 = vec![Span::styled(
        truncate(&prompt.title, 70),
        Style::new().fg(palette.text_primary).bold(),
    )];
    if let Some(author) = prompt.author_name.as_deref() {
        line1.push(Span::styled(
            format!("  @{author}"),
            Style::new().fg(palette.accent_purple),
        ));
    }

    let mut line2 = vec![Span::raw("   ")];
    if let Some(created) = prompt.created_at.as_deref() {
        line2.push(Span::styled(
            format_timestamp(created),
            Style::new().fg(palette.text_secondary),
        ));
        line2.push(Span::raw("  "));
    }
    if let Some(likes) = prompt.like_count {
        line2.push(Span::styled(
            format!("{likes} likes"),
            Style::new().fg(palette.accent_green),
        ));
        line2.push(Span::raw("  "));
    }
    if let Some(favs) = prompt.fav_count {
        line2.push(Span::styled(
            format!("{favs} favs"),
            Style::new().fg(palette.accent_yellow),
        ));
        line2.push(Span::raw("  "));
    }
    for tag in prompt.tag_list() {
        line2.push(Span::styled(
            format!("#{tag} "),
            Style::new().fg(palette.tag),
        ));
    }
    if !prompt.images.is_empty() {
        line2.push(Span::styled(
            format!("{} img", prompt.images.len()),
            Style::new().fg(palette.accent_cyan),
        ));
    }

    ListItem::new(vec![Line::from(line1), Line::from(line2), Line::raw("")])
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptshare_core::config::ClientConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn en_app() -> App {
        let mut config = ClientConfig::default();
        config.ui.language = promptshare_core::config::Lang::En;
        App::new(config)
    }

    fn render_to_text(app: &mut App) -> String {
        let backend = TestBackend::new(100, 18);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, app, FeedKind::Browse, area);
            })
            .expect("draw");
        buffer_to_string(terminal.backend().buffer())
    }

    fn prompt(id: i64, title: &str) -> Prompt {
        Prompt {
            id,
            title: title.to_string(),
            author_name: Some("alice".to_string()),
            like_count: Some(3),
            tags: Some("writing".to_string()),
            ..Prompt::default()
        }
    }

    #[test]
    fn first_page_load_shows_spinner_text() {
        let mut app = en_app();
        app.browse.refresh();
        let text = render_to_text(&mut app);
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn empty_result_shows_no_results() {
        let mut app = en_app();
        let request = app.browse.refresh().unwrap();
        app.browse.apply(&request, Ok(Vec::new()));
        let text = render_to_text(&mut app);
        assert!(text.contains("No prompts found"));
    }

    #[test]
    fn items_render_title_author_and_tags() {
        let mut app = en_app();
        let request = app.browse.refresh().unwrap();
        app.browse
            .apply(&request, Ok(vec![prompt(1, "Dig deeper")]));
        let text = render_to_text(&mut app);
        assert!(text.contains("Dig deeper"));
        assert!(text.contains("@alice"));
        assert!(text.contains("3 likes"));
        assert!(text.contains("#writing"));
    }

    #[test]
    fn exhausted_feed_shows_no_more_content() {
        let mut app = en_app();
        let request = app.browse.refresh().unwrap();
        app.browse
            .apply(&request, Ok(vec![prompt(1, "Only one")]));
        assert!(app.browse.exhausted());
        let text = render_to_text(&mut app);
        assert!(text.contains("No more content"));
    }

    #[test]
    fn fetch_error_is_shown_under_the_list() {
        let mut app = en_app();
        let request = app.browse.refresh().unwrap();
        app.browse
            .apply(&request, Ok((0..9).map(|i| prompt(i, "p")).collect()));
        let request = app.browse.tail_visible().unwrap();
        app.browse
            .apply(&request, Err("connection refused".to_string()));
        let text = render_to_text(&mut app);
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn active_filter_appears_in_block_title() {
        let mut app = en_app();
        let now = std::time::Instant::now();
        app.browse.set_filter("cat", now);
        let request = app
            .browse
            .poll(now + std::time::Duration::from_millis(600))
            .unwrap();
        app.browse.apply(&request, Ok(vec![prompt(1, "Cat care")]));
        let text = render_to_text(&mut app);
        assert!(text.contains("[cat]"));
    }
}
