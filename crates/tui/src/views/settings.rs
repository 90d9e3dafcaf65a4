use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::config::{SETTINGS_LAYOUT, SettingItem};
use crate::theme::Palette;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let block = palette.block_dim().padding(Palette::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    let mut selectable_idx: usize = 0;

    for item in SETTINGS_LAYOUT.iter() {
        match item {
            SettingItem::Header(title) => {
                if !lines.is_empty() {
                    lines.push(Line::raw(""));
                }
                lines.push(Line::from(Span::styled(
                    format!("── {} ──", app.tr(*title)),
                    Style::new().fg(palette.accent_blue).bold(),
                )));
                lines.push(Line::raw(""));
            }
            SettingItem::Field {
                field,
                label,
                description,
            } => {
                let is_selected = selectable_idx == app.settings_index;
                let is_editing = is_selected && app.editing_field;

                let pointer = if is_selected { "\u{25b8}" } else { " " };
                let pointer_style = if is_selected {
                    Style::new().fg(Color::Cyan).bold()
                } else {
                    Style::new().fg(Color::DarkGray)
                };

                let label_style = if is_selected {
                    Style::new().fg(palette.text_primary).bold()
                } else {
                    Style::new().fg(palette.text_secondary)
                };

                let value_text = if is_editing {
                    format!("{}|", app.edit_buffer)
                } else {
                    field.display_value(&app.config)
                };

                let value_style = if is_editing {
                    Style::new().fg(palette.accent_yellow)
                } else if field.is_enum() {
                    let s = Style::new().fg(palette.accent_purple);
                    if is_selected { s.underlined() } else { s }
                } else if is_selected {
                    Style::new().fg(palette.text_primary).underlined()
                } else {
                    Style::new().fg(palette.field_value)
                };

                let type_hint = if is_selected && !is_editing {
                    let hint = if field.is_enum() {
                        "  [Enter: cycle]"
                    } else if field.is_action() {
                        if app.config.auth.is_logged_in() {
                            "  [Enter: logout]"
                        } else {
                            "  [Enter: login]"
                        }
                    } else {
                        "  [Enter: edit]"
                    };
                    Span::styled(hint, Style::new().fg(palette.text_hint))
                } else {
                    Span::raw("")
                };

                let bg = if is_selected {
                    Style::new().bg(palette.selection_bg)
                } else {
                    Style::new()
                };

                lines.push(
                    Line::from(vec![
                        Span::styled(format!(" {pointer} "), pointer_style),
                        Span::styled(format!("{:<22}", app.tr(*label)), label_style),
                        Span::styled(value_text, value_style),
                        type_hint,
                    ])
                    .style(bg),
                );

                if is_selected {
                    lines.push(Line::from(vec![
                        Span::raw("     "),
                        Span::styled(
                            app.tr(*description),
                            Style::new().fg(palette.text_hint),
                        ),
                    ]));
                }

                selectable_idx += 1;
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
