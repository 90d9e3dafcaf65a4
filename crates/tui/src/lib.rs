mod app;
mod async_ops;
pub mod config;
mod i18n;
mod theme;
mod ui;
mod views;

use anyhow::Result;
use app::App;
use async_ops::CommandResult;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Launch the TUI against the configured server.
pub fn run() -> Result<()> {
    let config = config::load_client_config();
    let mut app = App::new(config);
    app.start();

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::channel::<CommandResult>();

    loop {
        // ── Completed commands, in arrival order ─────────────────────
        while let Ok(result) = rx.try_recv() {
            app.apply_command_result(result);
        }

        // Commit any debounced search whose quiet period has elapsed.
        app.poll_feeds(Instant::now());

        // ── Spawn queued commands ────────────────────────────────────
        // Results come back over the channel, so the draw/input cycle
        // below never waits on the network.
        for cmd in app.take_commands() {
            let tx = tx.clone();
            let config = app.config.clone();
            rt.spawn(async move {
                let _ = tx.send(async_ops::execute(cmd, config).await);
            });
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}
