use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::QuestionKind;
use crate::timer::format_clock;
use crate::tui::AppState;

pub fn draw_start(f: &mut Frame, area: Rect, state: &AppState) {
    let exam = state.session.exam();
    let mut mcq = 0;
    let mut msq = 0;
    let mut nat = 0;
    for q in &exam.questions {
        match q.kind {
            QuestionKind::SingleChoice => mcq += 1,
            QuestionKind::MultiChoice => msq += 1,
            QuestionKind::Numeric => nat += 1,
        }
    }

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            exam.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} questions ({} MCQ, {} MSQ, {} NAT)",
            exam.questions.len(),
            mcq,
            msq,
            nat
        )),
        Line::from(format!(
            "Time allowed: {}",
            format_clock(state.session.duration_seconds())
        )),
        Line::from(""),
        Line::from("The clock starts when you begin and the exam"),
        Line::from("submits itself when time runs out."),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] Begin exam", Style::default().fg(Color::Green)),
            Span::raw("    "),
            Span::styled("[Ctrl+Q] Quit", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(widget, area);
}
