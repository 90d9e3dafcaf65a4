use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Tab};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let mut spans = vec![Span::styled(" ", Style::new())];

    for (idx, tab) in Tab::ALL.iter().enumerate() {
        let is_active = *tab == app.active_tab;
        let style = if is_active {
            Style::new()
                .fg(Color::Black)
                .bg(palette.accent_blue)
                .bold()
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::new().fg(palette.tab_inactive)
        };
        let label = format!(" {}:{} ", idx + 1, app.tr(tab.title()));
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", Style::new()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::app::{App, Tab};
    use promptshare_core::config::{ClientConfig, Lang};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn buffer_to_string(buffer: &Buffer) -> String {
        use unicode_width::UnicodeWidthStr;
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            let mut x = area.left();
            // Wide graphemes occupy extra cells that hold filler symbols;
            // advance by display width so only visible symbols are collected.
            while x < area.right() {
                let symbol = buffer[(x, y)].symbol();
                out.push_str(symbol);
                x += symbol.width().max(1) as u16;
            }
            out.push('\n');
        }
        out
    }

    fn render_tab_text(active: Tab, lang: Lang) -> String {
        let mut config = ClientConfig::default();
        config.ui.language = lang;
        let mut app = App::new(config);
        app.active_tab = active;

        let backend = TestBackend::new(100, 3);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &app, area);
            })
            .expect("draw");
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn all_tabs_are_numbered() {
        let text = render_tab_text(Tab::Browse, Lang::En);
        assert!(text.contains("1:Prompts"));
        assert!(text.contains("2:My Prompts"));
        assert!(text.contains("3:Files"));
        assert!(text.contains("4:Settings"));
    }

    #[test]
    fn tab_titles_follow_language_setting() {
        let text = render_tab_text(Tab::Browse, Lang::Zh);
        assert!(text.contains("1:提示词"));
        assert!(text.contains("4:设置"));
    }
}
