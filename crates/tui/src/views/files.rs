use ratatui::prelude::*;
use ratatui::widgets::{Clear, HighlightSpacing, List, ListItem, Paragraph};

use promptshare_core::StoredFile;
use promptshare_core::file::format_size;
use promptshare_core::time::format_timestamp;

use crate::app::App;
use crate::i18n::Msg;
use crate::theme::Palette;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    let title = format!(" {} ", app.tr(Msg::TabFiles));
    let loading_text = app.tr(Msg::Loading);
    let no_files_text = app.tr(Msg::NoFiles);
    let no_more_text = app.tr(Msg::NoMoreFiles);

    let feed = &app.files;
    let state = &mut app.files_state;

    if feed.items().is_empty() {
        let (msg, color) = if feed.is_loading_first_page() {
            (loading_text, palette.accent_yellow)
        } else if let Some(error) = feed.last_error() {
            (error, palette.accent_red)
        } else {
            (no_files_text, Color::DarkGray)
        };
        let block = palette
            .block_dim()
            .title(title)
            .padding(Palette::PADDING_CARD);
        let paragraph = Paragraph::new(msg.to_string())
            .block(block)
            .style(Style::new().fg(color));
        frame.render_widget(paragraph, area);
        return;
    }

    let [list_area, status_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    let items: Vec<ListItem> = feed
        .items()
        .iter()
        .map(|file| file_item(file, palette))
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

/// Path prompt shown over the file list while an upload is being started.
pub fn render_upload_popup(frame: &mut Frame, app: &App, buffer: &str) {
    let palette = app.palette();
    let area = frame.area();

    let popup_width = 64u16.min(area.width.saturating_sub(4));
    let popup_height = 7u16.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = palette
        .block_accent()
        .title(format!(" {} ", app.tr(Msg::UploadFile)))
        .padding(Palette::PADDING_CARD);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Path: ", Style::new().fg(palette.text_secondary)),
            Span::styled(
                format!("{buffer}|"),
                Style::new().fg(palette.accent_yellow),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" Enter ", Style::new().fg(palette.text_key)),
            Span::styled("confirm  ", Style::new().fg(palette.text_key_desc)),
            Span::styled(" Esc ", Style::new().fg(palette.text_key)),
            Span::styled(app.tr(Msg::Cancel), Style::new().fg(palette.text_key_desc)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn file_item(file: &StoredFile, palette: &Palette) -> ListItem<'static> {
    let line1 = vec![
        Span::styled(
            truncate(&file.name, 60),
            Style::new().fg(palette.text_primary).bold(),
        ),
        Span::styled(
            format!("  id {}", file.id),
            Style::new().fg(palette.accent_cyan),
        ),
    ];

    let line2 = vec![
        Span::raw("   "),
        Span::styled(
            format_size(file.size),
            Style::new().fg(palette.accent_green),
        ),
        Span::raw("  "),
        Span::styled(file.mime.clone(), Style::new().fg(palette.text_muted)),
        Span::raw("  "),
        Span::styled(
            format_timestamp(&file.created_at),
            Style::new().fg(palette.text_secondary),
        ),
    ];

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
