//! TUI application: main loop
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop, owns ChatSessionController)
//!   ├─ crossterm EventStream  ── keys, paste, mouse wheel
//!   ├─ completion_rx          <── GenerationCompleted from the blocking worker
//!   └─ tick_interval          ── spinner, flash expiry
//! ```
//!
//! The controller dispatches each generation to the blocking pool, so the
//! loop keeps drawing and reading keys while the model runs.

use super::mode::{self, InputMode, KeyAction};
use super::state::TuiState;
use super::widgets::{
    MainLayout, conversation::ConversationWidget, header::HeaderWidget, help::HelpWidget,
    input::InputWidget, settings::SettingsWidget, status_bar::StatusBarWidget,
};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use orca_application::{
    ChatSessionController, CompletionReceiver, GenerationCompleted, IgnoreReason, SubmitOutcome,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_TICK: Duration = Duration::from_millis(250);
const FLASH_TTL: Duration = Duration::from_secs(5);

type ChatTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Main TUI application
pub struct TuiApp {
    controller: ChatSessionController,
    completion_rx: CompletionReceiver,
    tick_rate: Duration,
}

impl TuiApp {
    /// `completion_rx` must be the receiving end of the channel the
    /// controller was built with.
    pub fn new(controller: ChatSessionController, completion_rx: CompletionReceiver) -> Self {
        Self {
            controller,
            completion_rx,
            tick_rate: DEFAULT_TICK,
        }
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn controller(&self) -> &ChatSessionController {
        &self.controller
    }

    /// Fresh state seeded from the controller's settings
    pub fn initial_state(&self) -> TuiState {
        let mut state = TuiState::new(self.controller.model_name(), self.controller.params());
        self.sync(&mut state);
        state
    }

    /// Run the TUI main loop until the user quits
    pub async fn run(&mut self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;
        install_panic_hook();

        let result = self.event_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ChatTerminal) -> io::Result<()> {
        let mut state = self.initial_state();
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(self.tick_rate);

        loop {
            terminal.draw(|frame| self.render(frame, &state))?;

            if state.should_quit {
                break;
            }

            tokio::select! {
                // Terminal events (keyboard, paste, mouse, resize)
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(&mut state, event),
                    Some(Err(e)) => return Err(e),
                    None => break,
                },

                // Finished generations from the worker
                Some(completed) = self.completion_rx.recv() => {
                    self.handle_completion(&mut state, completed);
                }

                // Tick for spinner animation and flash expiry
                _ = tick.tick() => {
                    state.tick();
                    state.expire_flash(FLASH_TTL);
                }
            }
        }

        Ok(())
    }

    /// Render all widgets
    fn render(&self, frame: &mut ratatui::Frame, state: &TuiState) {
        let layout = MainLayout::compute(frame.area());

        frame.render_widget(HeaderWidget::new(state), layout.header);
        frame.render_widget(
            ConversationWidget::new(state, self.controller.transcript()),
            layout.conversation,
        );
        frame.render_widget(InputWidget::new(state), layout.input);
        frame.render_widget(SettingsWidget::new(state), layout.settings);
        frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

        if state.show_help {
            let help_area = MainLayout::centered_overlay(60, 70, frame.area());
            frame.render_widget(HelpWidget, help_area);
        }
    }

    /// Copy session flags the widgets display
    fn sync(&self, state: &mut TuiState) {
        state.generating = self.controller.is_busy();
        state.show_timing = self.controller.show_timing();
    }

    /// Handle a terminal (crossterm) event
    fn handle_terminal_event(&mut self, state: &mut TuiState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(state, key),
            Event::Paste(text) => {
                let text = text.replace(['\r', '\n'], " ");
                if !state.insert_str(&text) {
                    debug!("Paste rejected by {} field", state.focus.label());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => state.scroll_up(),
                MouseEventKind::ScrollDown => state.scroll_down(),
                _ => {}
            },
            // Terminal auto-resizes on next draw
            _ => {}
        }
    }

    fn handle_key(&mut self, state: &mut TuiState, key: KeyEvent) {
        // Help overlay swallows keys until closed
        if state.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                state.show_help = false;
            }
            return;
        }

        let action = mode::handle_key(state.mode, key);
        self.handle_action(state, action);
    }

    /// Handle a semantic key action
    fn handle_action(&mut self, state: &mut TuiState, action: KeyAction) {
        match action {
            KeyAction::None => {}

            // Mode transitions
            KeyAction::EnterInsert => state.mode = InputMode::Insert,
            KeyAction::ExitToNormal => state.mode = InputMode::Normal,
            KeyAction::NextField => state.focus_next(),
            KeyAction::PrevField => state.focus_prev(),

            // Text editing
            KeyAction::InsertChar(c) => {
                if !state.insert_char(c) {
                    debug!("Rejected {:?} for {} field", c, state.focus.label());
                }
            }
            KeyAction::DeleteChar => {
                state.delete_char();
            }
            KeyAction::DeleteForward => {
                state.delete_forward();
            }
            KeyAction::CursorLeft => state.cursor_left(),
            KeyAction::CursorRight => state.cursor_right(),
            KeyAction::CursorHome => state.cursor_home(),
            KeyAction::CursorEnd => state.cursor_end(),

            KeyAction::Submit => self.submit(state),

            // Scrolling
            KeyAction::ScrollUp => state.scroll_up(),
            KeyAction::ScrollDown => state.scroll_down(),
            KeyAction::ScrollTop => state.scroll_to_top(),
            KeyAction::ScrollBottom => state.scroll_to_bottom(),

            // Toggles
            KeyAction::ToggleTiming => {
                let show = !self.controller.show_timing();
                self.controller.set_show_timing(show);
                self.sync(state);
            }
            KeyAction::ToggleVersion => state.toggle_version_label(),

            // Application
            KeyAction::ShowHelp => state.show_help = !state.show_help,
            KeyAction::Quit => state.should_quit = true,
        }
    }

    fn submit(&mut self, state: &mut TuiState) {
        let outcome = self.controller.submit(
            state.prompt.text(),
            state.token_limit.text(),
            state.temperature.text(),
        );

        match outcome {
            SubmitOutcome::Dispatched(_) => {
                state.prompt.take();
                state.scroll_to_bottom();
            }
            SubmitOutcome::Ignored(IgnoreReason::Busy) => {
                debug!("Submit ignored while generating");
            }
            SubmitOutcome::Ignored(IgnoreReason::EmptyPrompt) => {}
        }
        self.sync(state);
    }

    fn handle_completion(&mut self, state: &mut TuiState, completed: GenerationCompleted) {
        match self.controller.complete(completed) {
            Ok(_) => state.follow_transcript(),
            Err(failed) => state.set_flash(format!("Generation failed: {}", failed.source)),
        }
        self.sync(state);
    }
}

fn setup_terminal() -> io::Result<ChatTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut ChatTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}

/// Restore the terminal when the UI thread panics.
///
/// Panics on other threads are generation workers whose panic is caught and
/// reported in the chat window, so they only go to the log.
fn install_panic_hook() {
    let ui_thread = std::thread::current().id();
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if std::thread::current().id() == ui_thread {
            let _ = disable_raw_mode();
            let _ = execute!(
                io::stdout(),
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen
            );
            original_hook(info);
        } else {
            error!("Worker thread panicked: {}", info);
        }
    }));
}
