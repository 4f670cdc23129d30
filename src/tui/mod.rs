// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive outline editor shell (ratatui + crossterm). Keys are decoded into
//! [`Command`]s and run through [`crate::command::dispatch`]; the footer toolbar is fed by a
//! toolbar subscription on the outline.

use std::{
    cell::Cell,
    error::Error,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{error, info};

use crate::command::{self, sanitize_label, Capabilities, Command};
use crate::nav::Direction;
use crate::notify::SubscriptionId;
use crate::ops::Outline;
use crate::store::BlobStore;

pub mod view;

pub use view::outline_text;

const FOCUS_COLOR: Color = Color::LightGreen;
const EDIT_COLOR: Color = Color::LightYellow;
const MARKER_COLOR: Color = Color::DarkGray;
const DIRTY_COLOR: Color = Color::LightRed;
const TOAST_COLOR: Color = Color::Yellow;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const EMPTY_LABEL_PLACEHOLDER: &str = "(empty)";

/// Runs the interactive outline editor until the user quits.
pub fn run<S: BlobStore>(
    outline: Outline,
    store: S,
    slot: impl Into<String>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(outline, store, slot);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    info!(unsaved = app.outline.can_save(), "leaving editor");
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App<impl BlobStore>) {
    let area = frame.size();
    let [body, footer] = {
        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        [chunks[0], chunks[1]]
    };

    let rows = view::rows(app.outline.tree());
    let inner_height = usize::from(body.height.saturating_sub(2));
    app.scroll = scroll_to_keep_visible(app.scroll, view::active_row(&rows), inner_height)
        .min(rows.len().saturating_sub(1));

    let editing = match &app.mode {
        Mode::Editing { buffer } => Some(buffer.as_str()),
        Mode::Browse => None,
    };
    let lines: Vec<Line<'static>> =
        rows.iter().skip(app.scroll).map(|row| row_line(row, editing)).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(outline_view_title(&app.slot, app.outline.can_save()));
    frame.render_widget(Paragraph::new(lines).block(block), body);

    let toast = app.active_toast().unwrap_or_default().to_owned();
    let footer_line =
        footer_help_line(&app.mode, app.toolbar.get(), &toast, footer_uses_compact_mode(area));
    frame.render_widget(Paragraph::new(footer_line), footer);
}

include!("chrome.rs");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Browse,
    Editing { buffer: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Run(Command),
    StartEdit,
    Quit,
}

#[derive(Debug)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Decodes a browse-mode key press.
fn browse_action(key: KeyEvent) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('s') if ctrl => KeyAction::Run(Command::Save),
        KeyCode::Tab => KeyAction::Run(Command::CreateChild),
        KeyCode::Enter => KeyAction::Run(Command::CreateSibling),
        KeyCode::Delete => KeyAction::Run(Command::RemoveCurrent),
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Run(Command::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Run(Command::Move(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Run(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Run(Command::Move(Direction::Down)),
        KeyCode::Char('E') => KeyAction::Run(Command::ToggleCollapsed),
        KeyCode::Char('D') => KeyAction::Run(Command::ToggleChildrenCollapsed),
        KeyCode::Char(' ') => KeyAction::StartEdit,
        KeyCode::Esc => KeyAction::Run(Command::ActivateNode(None)),
        KeyCode::Char('q') => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

struct App<S: BlobStore> {
    outline: Outline,
    store: S,
    slot: String,
    mode: Mode,
    toolbar: Rc<Cell<Capabilities>>,
    toolbar_subscription: SubscriptionId,
    toast: Option<Toast>,
    scroll: usize,
    quit_armed: bool,
    should_quit: bool,
}

impl<S: BlobStore> App<S> {
    fn new(mut outline: Outline, store: S, slot: impl Into<String>) -> Self {
        let toolbar = Rc::new(Cell::new(outline.capabilities()));
        let toolbar_subscription = {
            let toolbar = toolbar.clone();
            outline.listeners_mut().subscribe_toolbar(move |caps| toolbar.set(caps))
        };
        Self {
            outline,
            store,
            slot: slot.into(),
            mode: Mode::Browse,
            toolbar,
            toolbar_subscription,
            toast: None,
            scroll: 0,
            quit_armed: false,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if matches!(self.mode, Mode::Editing { .. }) {
            self.handle_edit_key(key);
            return;
        }

        let Some(action) = browse_action(key) else {
            return;
        };
        if action != KeyAction::Quit {
            self.quit_armed = false;
        }
        match action {
            KeyAction::Quit => self.request_quit(),
            KeyAction::StartEdit => self.start_edit(),
            KeyAction::Run(Command::Move(_)) if self.outline.active().is_none() => {
                let first = self.outline.tree().top_level().first().copied();
                self.run_command(Command::ActivateNode(first));
            }
            KeyAction::Run(command) => self.run_command(command),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Mode::Editing { buffer } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                let text = sanitize_label(buffer);
                self.mode = Mode::Browse;
                self.run_command(Command::SetLabel(text));
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(ch);
            }
            _ => {}
        }
    }

    fn start_edit(&mut self) {
        match self.outline.active_node() {
            Some(node) => {
                self.mode = Mode::Editing {
                    buffer: node.label().to_owned(),
                };
            }
            None => self.set_toast("Nothing selected"),
        }
    }

    fn request_quit(&mut self) {
        if self.outline.can_save() && !self.quit_armed {
            self.quit_armed = true;
            self.set_toast("Unsaved changes; press q again to quit");
            return;
        }
        self.should_quit = true;
    }

    fn run_command(&mut self, command: Command) {
        let saving = command == Command::Save;
        match command::dispatch(&mut self.outline, command, &mut self.store) {
            Ok(_) if saving => self.set_toast("Saved"),
            Ok(_) => {}
            Err(err) => {
                error!(error = %err, "save failed");
                self.set_toast(format!("Save failed: {err}"));
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }

    fn active_toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|toast| toast.expires_at > Instant::now())
            .map(|toast| toast.message.as_str())
    }
}

impl<S: BlobStore> Drop for App<S> {
    fn drop(&mut self) {
        self.outline.listeners_mut().unsubscribe(self.toolbar_subscription);
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
