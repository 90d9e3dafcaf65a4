use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

use promptshare_core::Prompt;
use promptshare_core::time::format_timestamp;

use crate::app::App;
use crate::i18n::Msg;
use crate::theme::Palette;

/// Centered read-only modal for one prompt.
pub fn render(frame: &mut Frame, app: &App, prompt: &Prompt) {
    let palette = app.palette();
    let area = frame.area();
    let popup_width = 84u16.min(area.width.saturating_sub(4));
    let popup_height = 30u16.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = palette
        .block_accent()
        .title(format!(" {} ", app.tr(Msg::PromptDetails)))
        .padding(Palette::PADDING_CARD);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![Line::from(Span::styled(
        prompt.title.clone(),
        Style::new().fg(palette.text_primary).bold(),
    ))];

    let mut meta = Vec::new();
    if let Some(author) = prompt.author_name.as_deref() {
        meta.push(Span::styled(
            format!("{}: {author}", app.tr(Msg::Author)),
            Style::new().fg(palette.accent_purple),
        ));
        meta.push(Span::raw("  "));
    }
    if let Some(created) = prompt.created_at.as_deref() {
        meta.push(Span::styled(
            format_timestamp(created),
            Style::new().fg(palette.text_secondary),
        ));
        meta.push(Span::raw("  "));
    }
    if let Some(likes) = prompt.like_count {
        meta.push(Span::styled(
            format!("{likes} likes"),
            Style::new().fg(palette.accent_green),
        ));
        meta.push(Span::raw("  "));
    }
    if let Some(favs) = prompt.fav_count {
        meta.push(Span::styled(
            format!("{favs} favs"),
            Style::new().fg(palette.accent_yellow),
        ));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }

    let tags = prompt.tag_list();
    if !tags.is_empty() {
        let spans: Vec<Span> = tags
            .iter()
            .map(|tag| Span::styled(format!("#{tag} "), Style::new().fg(palette.tag)))
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    for content_line in prompt.content.lines() {
        lines.push(Line::from(Span::styled(
            content_line.to_string(),
            Style::new().fg(palette.text_primary),
        )));
    }

    if prompt.source_url.is_some() || prompt.source_by.is_some() || !prompt.source_tag_list().is_empty()
    {
        lines.push(Line::raw(""));
        let mut source = vec![Span::styled(
            format!("{}: ", app.tr(Msg::Source)),
            Style::new().fg(palette.text_secondary).bold(),
        )];
        if let Some(by) = prompt.source_by.as_deref() {
            source.push(Span::styled(
                by.to_string(),
                Style::new().fg(palette.text_primary),
            ));
            source.push(Span::raw("  "));
        }
        if let Some(url) = prompt.source_url.as_deref() {
            source.push(Span::styled(
                url.to_string(),
                Style::new().fg(palette.accent_blue),
            ));
        }
        lines.push(Line::from(source));
        let source_tags = prompt.source_tag_list();
        if !source_tags.is_empty() {
            let spans: Vec<Span> = source_tags
                .iter()
                .map(|tag| Span::styled(format!("#{tag} "), Style::new().fg(palette.tag)))
                .collect();
            lines.push(Line::from(spans));
        }
    }

    if !prompt.images.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            app.tr(Msg::EffectImages),
            Style::new().fg(palette.text_secondary).bold(),
        )));
        for image in &prompt.images {
            let mut spans = vec![Span::styled(
                format!("  file {}", image.file_id),
                Style::new().fg(palette.accent_cyan),
            )];
            if !image.tags.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", image.tags),
                    Style::new().fg(palette.tag),
                ));
            }
            match image.file_url.as_deref() {
                Some(url) => spans.push(Span::styled(
                    format!("  {url}"),
                    Style::new().fg(palette.text_secondary),
                )),
                None => spans.push(Span::styled(
                    format!("  {}", app.tr(Msg::ImageUrlNotProvided)),
                    Style::new().fg(palette.text_muted),
                )),
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!(
            "j/k scroll  Esc {}",
            app.tr(Msg::Close)
        ),
        Style::new().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptshare_core::PromptImage;
    use promptshare_core::config::{ClientConfig, Lang};
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

    fn render_to_text(prompt: &Prompt) -> String {
        let mut config = ClientConfig::default();
        config.ui.language = Lang::En;
        let app = App::new(config);

        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| render(frame, &app, prompt))
            .expect("draw");
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn detail_shows_title_content_and_counts() {
        let prompt = Prompt {
            id: 1,
            title: "Dig deeper".to_string(),
            content: "Ask three follow-up questions.".to_string(),
            author_name: Some("alice".to_string()),
            like_count: Some(12),
            fav_count: Some(4),
            ..Prompt::default()
        };
        let text = render_to_text(&prompt);
        assert!(text.contains("Dig deeper"));
        assert!(text.contains("Ask three follow-up questions."));
        assert!(text.contains("12 likes"));
        assert!(text.contains("4 favs"));
        assert!(text.contains("Author: alice"));
    }

    #[test]
    fn image_without_url_shows_placeholder() {
        let prompt = Prompt {
            id: 2,
            title: "With image".to_string(),
            images: vec![PromptImage {
                id: Some(1),
                prompt_id: Some(2),
                file_id: 42,
                tags: "style".to_string(),
                file_url: None,
            }],
            ..Prompt::default()
        };
        let text = render_to_text(&prompt);
        assert!(text.contains("file 42"));
        assert!(text.contains("Image URL not provided"));
    }

    #[test]
    fn source_line_renders_when_present() {
        let prompt = Prompt {
            id: 3,
            title: "Sourced".to_string(),
            source_url: Some("https://example.com/p/3".to_string()),
            source_by: Some("bob".to_string()),
            ..Prompt::default()
        };
        let text = render_to_text(&prompt);
        assert!(text.contains("Source:"));
        assert!(text.contains("bob"));
        assert!(text.contains("https://example.com/p/3"));
    }
}
