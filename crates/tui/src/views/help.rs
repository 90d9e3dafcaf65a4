use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::App;
use crate::i18n::Msg;
use crate::theme::Palette;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();

    let popup_width = 60u16.min(area.width.saturating_sub(4));
    let popup_height = 28u16.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = palette
        .block_accent()
        .title(format!(" {} ", app.tr(Msg::HelpTitle)))
        .padding(Palette::PADDING_CARD);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::new().fg(palette.accent_yellow).bold();
    let desc_style = Style::new().fg(palette.text_primary);
    let header_style = Style::new().fg(palette.accent_blue).bold();
    let close_hint_line = Line::from(Span::styled(
        "Press any key to close",
        Style::new().fg(Color::DarkGray),
    ));

    let mut lines = vec![
        Line::from(Span::styled("── Global ──", header_style)),
        Line::from(vec![
            Span::styled("  1/2/3/4   ", key_style),
            Span::styled("Switch tabs (Prompts/Mine/Files/Settings)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  ?         ", key_style),
            Span::styled("Toggle this help", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  q         ", key_style),
            Span::styled("Quit", desc_style),
        ]),
        Line::raw(""),
        Line::from(Span::styled("── Prompt Lists ──", header_style)),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::styled("Navigate up/down", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  g/G       ", key_style),
            Span::styled("Jump to first/last loaded", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Open prompt detail", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  /         ", key_style),
            Span::styled("Search (fires after a quiet pause)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Reload from the first page", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  n         ", key_style),
            Span::styled("New prompt (My Prompts)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  e         ", key_style),
            Span::styled("Edit selected prompt (My Prompts)", desc_style),
        ]),
        Line::raw(""),
        Line::from(Span::styled("── Prompt Editor ──", header_style)),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::styled("Move between fields", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Edit field, Enter again to confirm", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  a/d       ", key_style),
            Span::styled("Attach/remove an image by file id", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  s         ", key_style),
            Span::styled("Save the prompt", desc_style),
        ]),
        Line::raw(""),
        Line::from(Span::styled("── Files ──", header_style)),
        Line::from(vec![
            Span::styled("  u         ", key_style),
            Span::styled("Upload a file by path", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::styled("Download the selected file", desc_style),
        ]),
        Line::raw(""),
        Line::from(Span::styled("── Settings ──", header_style)),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::styled("Move between fields", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Edit, cycle, or log in/out", desc_style),
        ]),
        Line::raw(""),
        close_hint_line.clone(),
    ];

    // Keep close hint visible even when the help body exceeds the popup height.
    let max_lines = inner.height as usize;
    if max_lines == 0 {
        return;
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = close_hint_line;
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
