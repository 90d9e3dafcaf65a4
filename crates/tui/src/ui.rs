use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, FeedKind, FlashLevel, Tab, View};
use crate::i18n::Msg;
use crate::views::{editor, files, help, login, prompt_detail, prompt_list, settings, tab_bar};

pub fn render(frame: &mut Frame, app: &mut App) {
    let [tab_area, header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    tab_bar::render(frame, app, tab_area);
    render_header(frame, app, header_area);

    match app.view {
        View::Main => match app.active_tab {
            Tab::Browse => prompt_list::render(frame, app, FeedKind::Browse, body_area),
            Tab::Mine => prompt_list::render(frame, app, FeedKind::Mine, body_area),
            Tab::Files => files::render(frame, app, body_area),
            Tab::Settings => settings::render(frame, app, body_area),
        },
        View::Login => login::render(frame, app, body_area),
        View::Help => {} // rendered as overlay below
    }

    render_footer(frame, app, footer_area);

    // Overlays, innermost last
    if let Some(prompt) = &app.detail {
        prompt_detail::render(frame, app, prompt);
    }
    if let Some(editor_state) = &app.editor {
        editor::render(frame, app, editor_state);
    }
    if let Some(buffer) = &app.upload_input {
        files::render_upload_popup(frame, app, buffer);
    }
    if matches!(app.view, View::Help) {
        help::render(frame, app, frame.area());
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let block = palette.block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut left_spans = vec![
        Span::styled(
            " promptshare ",
            Style::new().fg(palette.accent_blue).bold(),
        ),
        Span::raw("  "),
    ];

    if matches!(app.view, View::Main | View::Help) {
        let (feed_len, loading, label) = match app.active_tab {
            Tab::Browse => (
                app.browse.items().len(),
                app.browse.is_loading(),
                app.tr(Msg::TabPrompts),
            ),
            Tab::Mine => (
                app.mine.items().len(),
                app.mine.is_loading(),
                app.tr(Msg::TabMyPrompts),
            ),
            Tab::Files => (
                app.files.items().len(),
                app.files.is_loading(),
                app.tr(Msg::TabFiles),
            ),
            Tab::Settings => (0, false, ""),
        };
        if !matches!(app.active_tab, Tab::Settings) {
            if loading {
                left_spans.push(Span::styled(
                    app.tr(Msg::Loading),
                    Style::new().fg(palette.accent_yellow).italic(),
                ));
            } else {
                left_spans.push(Span::styled(
                    format!("{feed_len} {label}"),
                    Style::new().fg(palette.text_secondary),
                ));
            }
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(left_spans)).alignment(Alignment::Left),
        inner,
    );

    // Right side: server + account
    let display_url = app
        .config
        .server
        .url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let mut right_spans = vec![Span::styled(
        format!("{display_url}  "),
        Style::new().fg(palette.text_secondary),
    )];
    if app.config.auth.is_logged_in() {
        right_spans.push(Span::styled(
            format!("@{} ", app.config.auth.username),
            Style::new().fg(palette.accent_green),
        ));
    } else {
        right_spans.push(Span::styled(
            format!("{} ", app.tr(Msg::NotLoggedIn)),
            Style::new().fg(palette.text_muted),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(right_spans)).alignment(Alignment::Right),
        inner,
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let key_style = Style::new().fg(palette.text_key);
    let desc_style = Style::new().fg(palette.text_key_desc);

    let help = match app.view {
        View::Main if app.searching => Line::from(vec![
            Span::styled(
                " / ",
                Style::new()
                    .fg(Color::Black)
                    .bg(palette.accent_yellow)
                    .bold(),
            ),
            Span::styled(
                format!(" {}", app.search_input),
                Style::new().fg(palette.text_primary),
            ),
            Span::styled("_", Style::new().fg(palette.accent_yellow)),
            Span::styled("  ESC cancel  Enter confirm", desc_style),
        ]),
        View::Main => match app.active_tab {
            Tab::Browse => Line::from(vec![
                Span::styled(" j/k ", key_style),
                Span::styled("navigate  ", desc_style),
                Span::styled("Enter ", key_style),
                Span::styled("open  ", desc_style),
                Span::styled("/ ", key_style),
                Span::styled("search  ", desc_style),
                Span::styled("r ", key_style),
                Span::styled("refresh  ", desc_style),
                Span::styled("? ", key_style),
                Span::styled("help  ", desc_style),
                Span::styled("q ", key_style),
                Span::styled("quit", desc_style),
            ]),
            Tab::Mine => Line::from(vec![
                Span::styled(" j/k ", key_style),
                Span::styled("navigate  ", desc_style),
                Span::styled("Enter ", key_style),
                Span::styled("open  ", desc_style),
                Span::styled("n ", key_style),
                Span::styled("new  ", desc_style),
                Span::styled("e ", key_style),
                Span::styled("edit  ", desc_style),
                Span::styled("/ ", key_style),
                Span::styled("search  ", desc_style),
                Span::styled("q ", key_style),
                Span::styled("quit", desc_style),
            ]),
            Tab::Files => Line::from(vec![
                Span::styled(" j/k ", key_style),
                Span::styled("navigate  ", desc_style),
                Span::styled("u ", key_style),
                Span::styled("upload  ", desc_style),
                Span::styled("d ", key_style),
                Span::styled("download  ", desc_style),
                Span::styled("r ", key_style),
                Span::styled("refresh  ", desc_style),
                Span::styled("q ", key_style),
                Span::styled("quit", desc_style),
            ]),
            Tab::Settings => {
                if app.editing_field {
                    Line::from(vec![
                        Span::styled(" Enter ", key_style),
                        Span::styled("confirm  ", desc_style),
                        Span::styled("Esc ", key_style),
                        Span::styled("cancel", desc_style),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled(" j/k ", key_style),
                        Span::styled("navigate  ", desc_style),
                        Span::styled("Enter ", key_style),
                        Span::styled("edit/cycle  ", desc_style),
                        Span::styled("q ", key_style),
                        Span::styled("quit", desc_style),
                    ])
                }
            }
        },
        View::Login => Line::from(vec![
            Span::styled(" Tab ", key_style),
            Span::styled("next field  ", desc_style),
            Span::styled("Enter ", key_style),
            Span::styled("submit  ", desc_style),
            Span::styled("Esc ", key_style),
            Span::styled("back", desc_style),
        ]),
        View::Help => Line::raw(""),
    };

    let mut spans = help.spans;
    if let Some((ref msg, level)) = app.flash_message {
        let color = match level {
            FlashLevel::Success => palette.accent_green,
            FlashLevel::Error => palette.accent_red,
            FlashLevel::Info => palette.accent_blue,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.as_str(), Style::new().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
