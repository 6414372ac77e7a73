//! TUI (Terminal User Interface) module for the word game
//!
//! Draws the 6x5 guess grid, an on-screen keyboard coloured with the best
//! label seen for each letter, and a message line, using Ratatui.
//!
//! Key handling is a pure mapping from crossterm key events to
//! [`UserAction`]s; the game rules live in the controller.

use crate::game_state::{GameInterface, UserAction};
use crate::scoring::{Feedback, KeyboardState};
use crate::session::{KeyInput, MAX_ATTEMPTS, WORD_LENGTH};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

#[derive(Clone, Copy, PartialEq, Debug)]
enum CellState {
    Empty,
    Entered,
    Scored(Feedback),
}

impl CellState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Scored(Feedback::Correct) => (Color::Green, Color::Black),
            Self::Scored(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Scored(Feedback::Absent) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct GridRow {
    letters: [char; WORD_LENGTH],
    states: [CellState; WORD_LENGTH],
}

impl GridRow {
    const fn new() -> Self {
        Self {
            letters: [' '; WORD_LENGTH],
            states: [CellState::Empty; WORD_LENGTH],
        }
    }

    fn set_typed(&mut self, guess: &str) {
        let mut chars = guess.chars();
        for i in 0..WORD_LENGTH {
            match chars.next() {
                Some(c) => {
                    self.letters[i] = c.to_ascii_uppercase();
                    self.states[i] = CellState::Entered;
                }
                None => {
                    self.letters[i] = ' ';
                    self.states[i] = CellState::Empty;
                }
            }
        }
    }

    fn set_scored(&mut self, guess: &str, labels: &[Feedback]) {
        for (i, (c, &label)) in guess.chars().zip(labels).take(WORD_LENGTH).enumerate() {
            self.letters[i] = c.to_ascii_uppercase();
            self.states[i] = CellState::Scored(label);
        }
    }
}

/// Everything drawn in one frame.
struct RenderContext<'a> {
    rows: &'a [GridRow],
    keyboard: &'a KeyboardState,
    message: &'a str,
    error_message: &'a str,
    input_enabled: bool,
}

/// Maps a key press to a player action.
///
/// `n` starts a new game only while input is disabled, since it is also a
/// letter.
#[must_use]
pub fn map_key(key: KeyEvent, input_enabled: bool) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(UserAction::Exit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Enter => Some(UserAction::Submit),
        KeyCode::Backspace | KeyCode::Delete => Some(UserAction::Key(KeyInput::Backspace)),
        KeyCode::Tab => Some(UserAction::NewGame),
        KeyCode::Char('n' | 'N') if !input_enabled => Some(UserAction::NewGame),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(UserAction::Key(KeyInput::Letter(c))),
        _ => None,
    }
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: [GridRow; MAX_ATTEMPTS],
    keyboard: KeyboardState,
    message: String,
    error_message: String,
    input_enabled: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = undo_on_error(Self::open_terminal(), || {
            execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
            disable_raw_mode()
        })?;
        info_log!("TuiInterface::new() - Terminal ready");

        Ok(Self {
            terminal,
            rows: [GridRow::new(); MAX_ATTEMPTS],
            keyboard: KeyboardState::new(),
            message: String::new(),
            error_message: String::new(),
            input_enabled: false,
        })
    }

    fn open_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            keyboard: &self.keyboard,
            message: &self.message,
            error_message: &self.error_message,
            input_enabled: self.input_enabled,
        };
        self.terminal.draw(|f| render_static(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                debug_log!(
                    "handle_input() - Key event: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                self.error_message.clear();
                let action = map_key(key, self.input_enabled);
                if action.is_none()
                    && key.kind == KeyEventKind::Press
                    && let KeyCode::Char(c) = key.code
                    && !c.is_ascii_alphabetic()
                    && !c.is_control()
                {
                    self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                }
                Ok(action)
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

/// Runs `undo` when `result` is an error, keeping the original error.
fn undo_on_error<T>(
    result: Result<T, io::Error>,
    undo: impl FnOnce() -> Result<(), io::Error>,
) -> Result<T, io::Error> {
    if result.is_err()
        && let Err(e) = undo()
    {
        debug_log!("Terminal restore failed: {}", e);
    }
    result
}

fn render_static(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Grid
            Constraint::Length(5),  // Keyboard
            Constraint::Min(3),     // Message
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], ctx.rows);
    render_keyboard(f, chunks[2], ctx.keyboard);
    render_message(f, chunks[3], ctx.message, ctx.error_message);
    render_instructions(f, chunks[4], ctx.input_enabled);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE")
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, rows: &[GridRow]) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (index, row) in rows.iter().enumerate() {
        let Ok(offset) = u16::try_from(index) else {
            break;
        };
        let y = inner.y + offset * ROW_SPACING;
        if y >= inner.y + inner.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in row.letters.iter().zip(row.states) {
            let (bg, fg) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
            ));
        }
        render_line(f, inner, y, spans);
    }
}

fn render_keyboard(f: &mut Frame, area: Rect, keyboard: &KeyboardState) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|keys| {
            let spans: Vec<Span> = keys
                .chars()
                .map(|c| {
                    let style = match keyboard.get(c) {
                        Some(label) => {
                            let (bg, fg) = CellState::Scored(label).colors();
                            Style::default().fg(fg).bg(bg)
                        }
                        None => Style::default().fg(Color::White),
                    };
                    Span::styled(format!(" {} ", c.to_ascii_uppercase()), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
    let paragraph = Paragraph::new(Line::from(spans));
    f.render_widget(
        paragraph,
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_message(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
    let mut lines = Vec::new();
    if !message.is_empty() {
        lines.push(Line::from(Span::styled(message, MESSAGE_STYLE)));
    }
    if !error_message.is_empty() {
        lines.push(Line::from(Span::styled(error_message, ERROR_STYLE)));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Message").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, input_enabled: bool) {
    let text = if input_enabled {
        "Type letters | BACKSPACE: Erase | ENTER: Submit | ESC: Quit"
    } else {
        "N / TAB: New Game | ESC: Quit"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn next_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("next_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.handle_input() {
                Ok(Some(action)) => {
                    debug_log!("next_action() - Action: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("next_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn render_guess(&mut self, row: usize, guess: &str) {
        if let Some(grid_row) = self.rows.get_mut(row) {
            grid_row.set_typed(guess);
        }
    }

    fn render_feedback(&mut self, row: usize, guess: &str, labels: &[Feedback]) {
        if let Some(grid_row) = self.rows.get_mut(row) {
            grid_row.set_scored(guess, labels);
        }
    }

    fn render_keyboard(&mut self, updates: &[(char, Feedback)]) {
        for &(c, label) in updates {
            self.keyboard.record(&c.to_string(), &[label]);
        }
    }

    fn show_message(&mut self, message: &str) {
        message.clone_into(&mut self.message);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.draw_or_log();
    }

    fn clear_board(&mut self) {
        self.rows = [GridRow::new(); MAX_ATTEMPTS];
        self.keyboard.clear();
        self.message.clear();
        self.error_message.clear();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(rows: &[GridRow], keyboard: &KeyboardState, message: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).unwrap();
        let ctx = RenderContext {
            rows,
            keyboard,
            message,
            error_message: "",
            input_enabled: true,
        };
        terminal.draw(|f| render_static(f, &ctx)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_map_key_letters_and_controls() {
        assert_eq!(
            map_key(press(KeyCode::Char('a')), true),
            Some(UserAction::Key(KeyInput::Letter('a')))
        );
        assert_eq!(map_key(press(KeyCode::Enter), true), Some(UserAction::Submit));
        assert_eq!(
            map_key(press(KeyCode::Backspace), true),
            Some(UserAction::Key(KeyInput::Backspace))
        );
        assert_eq!(
            map_key(press(KeyCode::Delete), true),
            Some(UserAction::Key(KeyInput::Backspace))
        );
        assert_eq!(map_key(press(KeyCode::Esc), true), Some(UserAction::Exit));
        assert_eq!(map_key(press(KeyCode::Char('7')), true), None);
    }

    #[test]
    fn test_map_key_new_game() {
        assert_eq!(map_key(press(KeyCode::Tab), true), Some(UserAction::NewGame));
        assert_eq!(
            map_key(press(KeyCode::Char('n')), true),
            Some(UserAction::Key(KeyInput::Letter('n')))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('n')), false),
            Some(UserAction::NewGame)
        );
    }

    #[test]
    fn test_map_key_modifiers() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, true), Some(UserAction::Exit));
        let alt_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(map_key(alt_a, true), None);
    }

    #[test]
    fn test_map_key_ignores_release() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, true), None);
    }

    #[test]
    fn test_grid_row_typing_clears_trailing_cells() {
        let mut row = GridRow::new();
        row.set_typed("crane");
        row.set_typed("cran");
        assert_eq!(row.letters, ['C', 'R', 'A', 'N', ' ']);
        assert_eq!(row.states[4], CellState::Empty);
        assert_eq!(row.states[3], CellState::Entered);
    }

    #[test]
    fn test_grid_row_scored() {
        let mut row = GridRow::new();
        row.set_scored("paper", &score("paper", "apple"));
        assert_eq!(row.states[2], CellState::Scored(Feedback::Correct));
        assert_eq!(row.states[4], CellState::Scored(Feedback::Absent));
    }

    #[test]
    fn test_render_shows_grid_keyboard_and_message() {
        let mut rows = [GridRow::new(); MAX_ATTEMPTS];
        rows[0].set_scored("paper", &score("paper", "apple"));
        rows[1].set_typed("cr");
        let keyboard = KeyboardState::new();
        let text = screen_text(&rows, &keyboard, "Guess the five-letter word.");
        assert!(text.contains(" P  A  P  E  R "));
        assert!(text.contains(" C  R "));
        assert!(!text.contains(" P   A "));
        assert!(text.contains(" Q  W  E  R  T  Y "));
        assert!(text.contains("Guess the five-letter word."));
    }

    #[test]
    fn test_undo_on_error_restores_after_failure() {
        let mut undone = false;
        let result: Result<(), io::Error> = undo_on_error(Err(io::Error::other("no tty")), || {
            undone = true;
            Ok(())
        });
        assert!(undone);
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }

    #[test]
    fn test_undo_on_error_skips_restore_on_success() {
        let mut undone = false;
        let result = undo_on_error(Ok(7), || {
            undone = true;
            Ok(())
        });
        assert!(!undone);
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_undo_failure_keeps_original_error() {
        let result: Result<(), io::Error> =
            undo_on_error(Err(io::Error::other("draw failed")), || Err(io::Error::other("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }
}
