use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, LoginFocus};
use crate::i18n::Msg;
use crate::theme::Palette;

/// Full-screen login / register form.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let form = &app.login_form;

    let card_width = 54u16.min(area.width.saturating_sub(4));
    let card_height = 14u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(card_width)) / 2;
    let y = area.y + (area.height.saturating_sub(card_height)) / 2;
    let card_area = Rect::new(x, y, card_width, card_height);

    let title = if form.register_mode {
        app.tr(Msg::RegisterTitle)
    } else {
        app.tr(Msg::LoginTitle)
    };
    let block = palette
        .block_accent()
        .title(format!(" {title} "))
        .padding(Palette::PADDING_CARD);
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut lines = vec![
        field_line(
            app.tr(Msg::Username),
            &form.username,
            form.focus == LoginFocus::Username,
            palette,
        ),
        field_line(
            app.tr(Msg::Password),
            &"*".repeat(form.password.chars().count()),
            form.focus == LoginFocus::Password,
            palette,
        ),
        Line::raw(""),
        switch_line(app, palette),
        Line::raw(""),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::new().fg(palette.accent_red),
        )));
    } else if form.busy {
        lines.push(Line::from(Span::styled(
            format!("  {}", app.tr(Msg::Loading)),
            Style::new().fg(palette.accent_yellow).italic(),
        )));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(" Tab ", Style::new().fg(palette.text_key)),
        Span::styled("next  ", Style::new().fg(palette.text_key_desc)),
        Span::styled(" Enter ", Style::new().fg(palette.text_key)),
        Span::styled("submit  ", Style::new().fg(palette.text_key_desc)),
        Span::styled(" Esc ", Style::new().fg(palette.text_key)),
        Span::styled("back", Style::new().fg(palette.text_key_desc)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(label: &str, value: &str, focused: bool, palette: &Palette) -> Line<'static> {
    let pointer = if focused { "\u{25b8} " } else { "  " };
    let label_style = if focused {
        Style::new().fg(palette.text_primary).bold()
    } else {
        Style::new().fg(palette.text_secondary)
    };
    let value_span = if focused {
        Span::styled(
            format!("{value}|"),
            Style::new().fg(palette.accent_yellow),
        )
    } else {
        Span::styled(value.to_string(), Style::new().fg(palette.field_value))
    };
    Line::from(vec![
        Span::styled(format!("{pointer}{label:<12}"), label_style),
        value_span,
    ])
}

fn switch_line(app: &App, palette: &Palette) -> Line<'static> {
    let form = &app.login_form;
    let focused = form.focus == LoginFocus::SwitchMode;
    let pointer = if focused { "\u{25b8} " } else { "  " };
    let style = if focused {
        Style::new().fg(palette.accent_blue).bold()
    } else {
        Style::new().fg(palette.text_muted)
    };
    let text = if form.register_mode {
        format!(
            "{pointer}{} {}",
            app.tr(Msg::AlreadyHaveAccount),
            app.tr(Msg::GoToLogin)
        )
    } else {
        format!("{pointer}{}", app.tr(Msg::RegisterTitle))
    };
    Line::from(Span::styled(text, style))
}
