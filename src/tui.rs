use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::model::QuestionKind;
use crate::report::{self, ReportMeta};
use crate::session::{Phase, Session};
use crate::store::Selection;
use crate::timer;

const LOW_TIME_WARNING_SECS: u64 = 120;
const PAGE_JUMP: isize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Exam,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    ConfirmSubmit,
    ConfirmQuit,
    LowTimeWarning,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Sidebar,
    Main,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_file: String,
    pub file_hash: String,
    pub report_path: Option<String>,
}

pub struct AppState {
    pub session: Session,
    pub screen: Screen,
    pub dialog_stack: Vec<Dialog>,
    pub active_panel: ActivePanel,
    pub sidebar_cursor: usize,
    pub text_cursor: usize,
    pub result_scroll: usize,
    pub warned_low_time: bool,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub source_file: String,
    pub file_hash: String,
    pub report_path: Option<String>,
    pub report_written: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: Session, cfg: RunConfig) -> Self {
        Self {
            session,
            screen: Screen::Start,
            dialog_stack: Vec::new(),
            active_panel: ActivePanel::Main,
            sidebar_cursor: 0,
            text_cursor: 0,
            result_scroll: 0,
            warned_low_time: false,
            started_at: None,
            finished_at: None,
            source_file: cfg.source_file,
            file_hash: cfg.file_hash,
            report_path: cfg.report_path,
            report_written: None,
            should_quit: false,
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }

    /// The numeric entry text of the current question, empty if none.
    pub fn current_text(&self) -> String {
        match self.session.current_status().selected {
            Some(Selection::Text(t)) => t,
            _ => String::new(),
        }
    }
}

pub fn run_tui(session: Session, cfg: RunConfig) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let mut state = AppState::new(session, cfg);
    let result = main_loop(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<(), String> {
    let mut ticker: Option<mpsc::Receiver<()>> = None;

    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                handle_key(key, state)?;
            }
        }

        // The clock starts with the session and stops with it. Dropping the
        // receiver makes the ticker thread exit on its next send; the
        // session's phase guard already makes any queued tick a no-op.
        if state.session.phase() == Phase::Running && ticker.is_none() {
            ticker = Some(timer::spawn_ticker());
        }
        if let Some(rx) = &ticker {
            while rx.try_recv().is_ok() {
                handle_tick(state)?;
            }
        }
        if state.session.phase() == Phase::Finished {
            ticker = None;
        }
    }

    Ok(())
}

fn handle_tick(state: &mut AppState) -> Result<(), String> {
    if state.screen != Screen::Exam {
        return Ok(());
    }
    state.session.tick();
    match state.session.phase() {
        Phase::Finished => enter_result(state)?,
        Phase::Running => {
            if state.session.remaining_seconds() <= LOW_TIME_WARNING_SECS
                && !state.warned_low_time
            {
                state.warned_low_time = true;
                state.push_dialog(Dialog::LowTimeWarning);
            }
        }
        Phase::NotStarted => {}
    }
    Ok(())
}

/// Running -> finished happened; show the report and export it if asked.
fn enter_result(state: &mut AppState) -> Result<(), String> {
    state.finished_at = Some(chrono::Utc::now().to_rfc3339());
    state.dialog_stack.clear();
    state.screen = Screen::Result;

    if let (Some(path), Some(graded)) = (state.report_path.clone(), state.session.report()) {
        let meta = ReportMeta {
            source_file: state.source_file.clone(),
            file_hash: state.file_hash.clone(),
            started_at: state.started_at.clone(),
            finished_at: state.finished_at.clone(),
            duration_seconds: state.session.duration_seconds(),
        };
        let yaml = report::build_report_yaml(state.session.exam(), graded, &meta);
        report::write_report(Path::new(&path), &yaml)?;
        state.report_written = Some(path);
    }
    Ok(())
}

fn handle_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    if state.has_dialog() {
        return handle_dialog_key(key, state);
    }

    match state.screen {
        Screen::Start => handle_start_key(key, state),
        Screen::Exam => handle_exam_key(key, state),
        Screen::Result => handle_result_key(key, state),
    }
}

fn handle_start_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    match key.code {
        KeyCode::Enter => {
            state.session.start();
            state.started_at = Some(chrono::Utc::now().to_rfc3339());
            state.screen = Screen::Exam;
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_result_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    match key.code {
        KeyCode::Enter => {
            state.should_quit = true;
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
        }
        KeyCode::Up => {
            state.result_scroll = state.result_scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            state.result_scroll += 1;
        }
        KeyCode::PageUp => {
            state.result_scroll = state.result_scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            state.result_scroll += 10;
        }
        _ => {}
    }
    Ok(())
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    match state.top_dialog() {
        Some(Dialog::ConfirmSubmit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.session.submit();
                enter_result(state)?;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::LowTimeWarning) => match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
    Ok(())
}

fn handle_exam_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match key.code {
            KeyCode::Char('q') => state.push_dialog(Dialog::ConfirmQuit),
            KeyCode::Char('s') => state.push_dialog(Dialog::ConfirmSubmit),
            KeyCode::Char('r') => {
                state.session.mark_for_review_and_next();
                after_navigation(state);
            }
            KeyCode::Char('x') => {
                state.session.clear_response();
                state.text_cursor = 0;
            }
            _ => {}
        }
        return Ok(());
    }

    if key.code == KeyCode::Tab {
        state.active_panel = match state.active_panel {
            ActivePanel::Main => {
                state.sidebar_cursor = state.session.index();
                ActivePanel::Sidebar
            }
            ActivePanel::Sidebar => ActivePanel::Main,
        };
        return Ok(());
    }

    if state.active_panel == ActivePanel::Sidebar {
        return handle_sidebar_key(key, state);
    }

    if key.code == KeyCode::Enter {
        state.session.save_and_next();
        after_navigation(state);
        return Ok(());
    }

    match state.session.current_question().kind {
        QuestionKind::SingleChoice | QuestionKind::MultiChoice => handle_choice_key(key, state),
        QuestionKind::Numeric => handle_numeric_key(key, state),
    }
}

fn handle_sidebar_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    let last = state.session.exam().questions.len() - 1;
    match key.code {
        KeyCode::Up => {
            state.sidebar_cursor = state.sidebar_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            state.sidebar_cursor = (state.sidebar_cursor + 1).min(last);
        }
        KeyCode::PageUp => {
            state.sidebar_cursor = state.sidebar_cursor.saturating_sub(PAGE_JUMP as usize);
        }
        KeyCode::PageDown => {
            state.sidebar_cursor = (state.sidebar_cursor + PAGE_JUMP as usize).min(last);
        }
        KeyCode::Home => {
            state.sidebar_cursor = 0;
        }
        KeyCode::End => {
            state.sidebar_cursor = last;
        }
        KeyCode::Enter => {
            state.session.jump_to(state.sidebar_cursor);
            after_navigation(state);
            state.active_panel = ActivePanel::Main;
        }
        KeyCode::Char('?') => {
            state.push_dialog(Dialog::Help);
        }
        _ => {}
    }
    Ok(())
}

fn handle_choice_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    match key.code {
        KeyCode::Up | KeyCode::Left => jump_relative(state, -1),
        KeyCode::Down | KeyCode::Right => jump_relative(state, 1),
        KeyCode::PageUp => jump_relative(state, -PAGE_JUMP),
        KeyCode::PageDown => jump_relative(state, PAGE_JUMP),
        KeyCode::Home => jump_to(state, 0),
        KeyCode::End => jump_to(state, state.session.exam().questions.len() - 1),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char(c) if c.is_ascii_lowercase() => {
            let idx = (c as u8 - b'a') as usize;
            let options = &state.session.current_question().options;
            if let Some(option) = options.get(idx).cloned() {
                state.session.select_answer(&option);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_numeric_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    match key.code {
        KeyCode::Char(c) => {
            let mut text = state.current_text();
            let at = state.text_cursor.min(text.len());
            text.insert(at, c);
            state.text_cursor = at + c.len_utf8();
            state.session.select_answer(&text);
        }
        KeyCode::Backspace => {
            let mut text = state.current_text();
            let at = state.text_cursor.min(text.len());
            if let Some(prev) = text[..at].chars().next_back() {
                let start = at - prev.len_utf8();
                text.remove(start);
                state.text_cursor = start;
                state.session.select_answer(&text);
            }
        }
        KeyCode::Delete => {
            let mut text = state.current_text();
            let at = state.text_cursor.min(text.len());
            if at < text.len() {
                text.remove(at);
                state.session.select_answer(&text);
            }
        }
        KeyCode::Left => {
            let text = state.current_text();
            let at = state.text_cursor.min(text.len());
            if let Some(prev) = text[..at].chars().next_back() {
                state.text_cursor = at - prev.len_utf8();
            }
        }
        KeyCode::Right => {
            let text = state.current_text();
            let at = state.text_cursor.min(text.len());
            if let Some(next) = text[at..].chars().next() {
                state.text_cursor = at + next.len_utf8();
            }
        }
        KeyCode::Home => {
            state.text_cursor = 0;
        }
        KeyCode::End => {
            state.text_cursor = state.current_text().len();
        }
        KeyCode::Up => jump_relative(state, -1),
        KeyCode::Down => jump_relative(state, 1),
        KeyCode::PageUp => jump_relative(state, -PAGE_JUMP),
        KeyCode::PageDown => jump_relative(state, PAGE_JUMP),
        _ => {}
    }
    Ok(())
}

fn jump_relative(state: &mut AppState, delta: isize) {
    let len = state.session.exam().questions.len() as isize;
    let target = (state.session.index() as isize + delta).clamp(0, len - 1);
    jump_to(state, target as usize);
}

fn jump_to(state: &mut AppState, index: usize) {
    state.session.jump_to(index);
    after_navigation(state);
}

fn after_navigation(state: &mut AppState) {
    state.sidebar_cursor = state.session.index();
    state.text_cursor = state.current_text().len();
}
