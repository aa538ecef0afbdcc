use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::process::Command;
use std::sync::Arc;

use replytui::app::{App, Focus};
use replytui::clipboard::{Clipboard, CommandClipboard};
use replytui::composer::{Action, Effect};
use replytui::config::Config;
use replytui::service::{HttpReplyService, Tone};
use replytui::ui::{render_compose, render_header, render_help, render_reply, render_status};
use replytui::worker::RequestWorker;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    replytui::logging::init(&config)?;
    if let Some(e) = config_err {
        tracing::warn!(path = %Config::path().display(), "{}; using defaults", e);
    }
    let config = Arc::new(config);

    let service = HttpReplyService::new(config.service.endpoint.clone());
    tracing::info!(endpoint = service.endpoint(), "starting replytui");
    let mut worker = RequestWorker::new(Arc::new(service))?;
    let clipboard = CommandClipboard::from_config(config.clipboard.command.as_deref());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run(&mut terminal, &mut app, &mut worker, &clipboard);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("exiting on error: {:#}", e);
    }
    result
}

fn run(
    terminal: &mut Tui,
    app: &mut App,
    worker: &mut RequestWorker,
    clipboard: &impl Clipboard,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(app, f))?;
        app.on_tick();

        // Deliver any finished request before handling input
        if let Some(outcome) = worker.try_recv() {
            app.dispatch(Action::GenerateFinished(outcome));
        }

        if app.should_quit {
            return Ok(());
        }

        // Poll with timeout so the spinner animates and completions land
        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        let effect = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(app, key, terminal)?
            }
            Event::Paste(text) => {
                if app.focus == Focus::Editor {
                    app.push_str(&text);
                }
                None
            }
            _ => None,
        };

        if let Some(effect) = effect {
            perform(app, effect, worker, clipboard);
        }
    }
}

/// Carry out an effect and feed any immediate outcome back
fn perform(app: &mut App, effect: Effect, worker: &RequestWorker, clipboard: &impl Clipboard) {
    match effect {
        Effect::SendRequest(request) => worker.submit(request),
        Effect::WriteClipboard(text) => {
            let outcome = clipboard.write_text(&text);
            match &outcome {
                Ok(()) => tracing::info!(chars = text.chars().count(), "reply copied"),
                Err(e) => tracing::error!("could not copy text: {}", e),
            }
            app.dispatch(Action::CopyFinished(outcome));
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, terminal: &mut Tui) -> Result<Option<Effect>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let effect = match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                app.should_quit = true;
                None
            }
            KeyCode::Char('g') => app.dispatch(Action::Generate),
            KeyCode::Char('y') => app.dispatch(Action::Copy),
            KeyCode::Char('e') => {
                if !app.composer.is_loading() {
                    if let Some(text) = edit_content(app.composer.email_content(), terminal)? {
                        app.dispatch(Action::SetEmailContent(text));
                    }
                }
                None
            }
            _ => None,
        };
        return Ok(effect);
    }

    if key.code == KeyCode::Tab {
        app.next_focus();
        return Ok(None);
    }

    let effect = match app.focus {
        Focus::Editor => {
            match key.code {
                KeyCode::Char(c) => app.push_char(c),
                KeyCode::Enter => app.push_char('\n'),
                KeyCode::Backspace => app.pop_char(),
                KeyCode::Esc => app.focus = Focus::Tones,
                _ => {}
            }
            None
        }
        Focus::Tones => match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                app.prev_tone();
                None
            }
            KeyCode::Char('l') | KeyCode::Right => {
                app.next_tone();
                None
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                app.select_tone(Tone::ALL[idx]);
                None
            }
            KeyCode::Enter => app.dispatch(Action::Generate),
            KeyCode::Char('q') => {
                app.should_quit = true;
                None
            }
            _ => None,
        },
        Focus::Reply => match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                app.reply_scroll_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.reply_scroll_up();
                None
            }
            KeyCode::Char('y') => app.dispatch(Action::Copy),
            KeyCode::Char('q') => {
                app.should_quit = true;
                None
            }
            KeyCode::Esc => {
                app.focus = Focus::Editor;
                None
            }
            _ => None,
        },
    };
    Ok(effect)
}

fn render(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let theme = &app.config.theme;

    f.render_widget(
        ratatui::widgets::Block::default().style(Style::default().bg(theme.bg())),
        area,
    );

    let reply_height = if app.composer.has_reply() {
        Constraint::Percentage(40)
    } else {
        Constraint::Length(0)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Editor, tones, actions
            reply_height,          // Generated reply
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    render_header(f, chunks[0], theme);
    render_compose(f, chunks[1], app);
    app.reply_area = chunks[2];
    if app.composer.has_reply() {
        render_reply(
            f,
            chunks[2],
            app.composer.generated_reply(),
            app.reply_scroll,
            app.focus == Focus::Reply,
            theme,
        );
    }
    render_status(f, chunks[3], app.composer.status(), theme);
    render_help(f, chunks[4], app.focus, app.composer.has_reply(), theme);
}

/// Open the draft in $EDITOR; returns the edited text, or None if the editor failed
fn edit_content(current: &str, terminal: &mut Tui) -> Result<Option<String>> {
    use std::io::Write;

    let mut temp_file = tempfile::Builder::new()
        .prefix("replytui-")
        .suffix(".txt")
        .tempfile()?;
    write!(temp_file, "{}", current)?;
    temp_file.flush()?;

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(temp_file.path()).status();

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    terminal.clear()?;

    match status {
        Ok(status) if status.success() => Ok(Some(std::fs::read_to_string(temp_file.path())?)),
        Ok(status) => {
            tracing::warn!(%editor, %status, "editor exited unsuccessfully; draft unchanged");
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(%editor, "could not start editor: {}", e);
            Ok(None)
        }
    }
}
