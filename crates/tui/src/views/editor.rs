use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{App, EDITOR_FIELD_LABELS, EditorState};
use crate::i18n::Msg;
use crate::theme::Palette;

/// Centered modal for creating or editing a prompt, one row per field.
pub fn render(frame: &mut Frame, app: &App, editor: &EditorState) {
    let palette = app.palette();
    let area = frame.area();

    let content_rows = editor.row_count() as u16 + 6;
    let popup_width = 76u16.min(area.width.saturating_sub(4));
    let popup_height = (content_rows + 4).min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let title = if editor.prompt_id.is_some() {
        app.tr(Msg::EditPrompt)
    } else {
        app.tr(Msg::CreatePrompt)
    };
    let block = palette
        .block_accent()
        .title(format!(" {title} "))
        .padding(Palette::PADDING_CARD);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();

    for (idx, label) in EDITOR_FIELD_LABELS.iter().enumerate() {
        lines.push(field_line(editor, palette, idx, app.tr(*label)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        app.tr(Msg::EffectImages),
        Style::new().fg(palette.text_secondary).bold(),
    )));
    if editor.images.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  ({})", app.tr(Msg::AddImage)),
            Style::new().fg(palette.text_muted),
        )));
    }
    for (idx, image) in editor.images.iter().enumerate() {
        let row = EDITOR_FIELD_LABELS.len() + idx;
        let focused = editor.cursor == row;
        let pointer = if focused { "\u{25b8} " } else { "  " };
        let label = format!("{pointer}file {}", image.file_id);
        let value = match (&editor.edit_buffer, focused) {
            (Some(buffer), true) => Span::styled(
                format!("{buffer}|"),
                Style::new().fg(palette.accent_yellow),
            ),
            _ => Span::styled(image.tags.clone(), Style::new().fg(palette.field_value)),
        };
        let style = if focused {
            Style::new().fg(palette.text_primary).bold()
        } else {
            Style::new().fg(palette.text_secondary)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<20}"), style),
            value,
        ]));
    }

    if let Some(input) = &editor.image_input {
        lines.push(Line::raw(""));
        let (label, buffer) = if input.on_tags {
            (app.tr(Msg::ImageTags), &input.tags)
        } else {
            ("file id", &input.file_id)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {label}: "),
                Style::new().fg(palette.accent_blue).bold(),
            ),
            Span::styled(format!("{buffer}|"), Style::new().fg(palette.accent_yellow)),
        ]));
    }

    lines.push(Line::raw(""));
    let hint = if editor.busy {
        Line::from(Span::styled(
            format!("  {}", app.tr(Msg::Loading)),
            Style::new().fg(palette.accent_yellow).italic(),
        ))
    } else if editor.image_input.is_some() || editor.edit_buffer.is_some() {
        hint_line(palette, &[("Enter", "confirm"), ("Esc", "cancel")])
    } else {
        hint_line(
            palette,
            &[
                ("j/k", "field"),
                ("Enter", "edit"),
                ("a", "add image"),
                ("d", "remove image"),
                ("s", "save"),
                ("Esc", "close"),
            ],
        )
    };
    lines.push(hint);

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(
    editor: &EditorState,
    palette: &Palette,
    idx: usize,
    label: &str,
) -> Line<'static> {
    let focused = editor.cursor == idx;
    let pointer = if focused { "\u{25b8} " } else { "  " };
    let label_style = if focused {
        Style::new().fg(palette.text_primary).bold()
    } else {
        Style::new().fg(palette.text_secondary)
    };
    let value = match (&editor.edit_buffer, focused) {
        (Some(buffer), true) => Span::styled(
            format!("{buffer}|"),
            Style::new().fg(palette.accent_yellow),
        ),
        _ => {
            let text = editor.row_text(idx);
            if text.is_empty() {
                Span::styled("-".to_string(), Style::new().fg(palette.text_muted))
            } else {
                Span::styled(text.to_string(), Style::new().fg(palette.field_value))
            }
        }
    };
    Line::from(vec![
        Span::styled(format!("{pointer}{label:<18}"), label_style),
        value,
    ])
}

fn hint_line(palette: &Palette, pairs: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::new().fg(palette.text_key);
    let desc_style = Style::new().fg(palette.text_key_desc);
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in pairs {
        spans.push(Span::styled(format!(" {key} "), key_style));
        spans.push(Span::styled(format!("{desc}  "), desc_style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptshare_core::Prompt;
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

    fn render_to_text(editor: &EditorState) -> String {
        let mut config = ClientConfig::default();
        config.ui.language = Lang::En;
        let app = App::new(config);

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| render(frame, &app, editor))
            .expect("draw");
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn create_mode_shows_all_field_labels() {
        let editor = EditorState::default();
        let text = render_to_text(&editor);
        assert!(text.contains("Create Prompt"));
        assert!(text.contains("Title"));
        assert!(text.contains("Content"));
        assert!(text.contains("Source URL"));
    }

    #[test]
    fn edit_mode_prefills_values() {
        let prompt = Prompt {
            id: 5,
            title: "Dig deeper".to_string(),
            content: "Ask follow-ups.".to_string(),
            ..Prompt::default()
        };
        let editor = EditorState::for_prompt(&prompt);
        let text = render_to_text(&editor);
        assert!(text.contains("Edit Prompt"));
        assert!(text.contains("Dig deeper"));
        assert!(text.contains("Ask follow-ups."));
    }

    #[test]
    fn inline_edit_buffer_shows_cursor_pipe() {
        let editor = EditorState {
            edit_buffer: Some("New title".to_string()),
            ..EditorState::default()
        };
        let text = render_to_text(&editor);
        assert!(text.contains("New title|"));
    }

    #[test]
    fn image_input_prompts_for_file_id_then_tags() {
        let mut editor = EditorState::default();
        editor.image_input = Some(crate::app::ImageInput {
            file_id: "4".to_string(),
            tags: String::new(),
            on_tags: false,
        });
        let text = render_to_text(&editor);
        assert!(text.contains("file id: 4|"));

        editor.image_input = Some(crate::app::ImageInput {
            file_id: "4".to_string(),
            tags: "style".to_string(),
            on_tags: true,
        });
        let text = render_to_text(&editor);
        assert!(text.contains("Image Tags: style|"));
    }
}
